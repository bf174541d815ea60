use async_trait::async_trait;
use aws_sdk_dynamodb::operation::{
    create_table::{builders::CreateTableInputBuilder, CreateTableOutput},
    delete_item::{builders::DeleteItemInputBuilder, DeleteItemOutput},
    get_item::{builders::GetItemInputBuilder, GetItemOutput},
    put_item::{builders::PutItemInputBuilder, PutItemOutput},
    update_item::{builders::UpdateItemInputBuilder, UpdateItemOutput},
};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::time::Instant;

use super::database::DynamoService;
use crate::{
    context::Context,
    error::{ServiceError, ServiceErrorKind},
};

type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub enum Call {
    CreateTable(CreateTableInputBuilder),
    PutItem(PutItemInputBuilder),
    GetItem(GetItemInputBuilder),
    UpdateItem(UpdateItemInputBuilder),
    DeleteItem(DeleteItemInputBuilder),
}

/// In-memory stand-in for the service that records every request.
#[derive(Debug, Default)]
pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    deadlines: Mutex<Vec<Option<Instant>>>,
    tables: Mutex<HashMap<String, Vec<Item>>>,
    key_names: Mutex<HashMap<String, Vec<String>>>,
    failure: Mutex<Option<ServiceErrorKind>>,
    hang: Mutex<bool>,
}

impl RecordingService {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingService::default())
    }

    /// Stores `item` in `table` as if it had been put earlier.
    pub fn seed(&self, table: &str, item: Item) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(item);
    }

    /// Makes every following call fail with a service error of `kind`.
    pub fn fail_with(&self, kind: ServiceErrorKind) {
        *self.failure.lock().unwrap() = Some(kind);
    }

    /// Makes every following call wait forever.
    pub fn hang(&self) {
        *self.hang.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The deadline of the context each call observed.
    pub fn observed_deadlines(&self) -> Vec<Option<Instant>> {
        self.deadlines.lock().unwrap().clone()
    }

    pub fn items(&self, table: &str) -> Vec<Item> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    async fn record(&self, ctx: &Context, call: Call) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        self.deadlines.lock().unwrap().push(ctx.deadline());

        let hang = *self.hang.lock().unwrap();
        if hang {
            std::future::pending::<()>().await;
        }

        match *self.failure.lock().unwrap() {
            Some(kind) => Err(ServiceError::new(kind, format!("stubbed {:?} failure", kind))),
            None => Ok(()),
        }
    }

    fn find(&self, table: &str, key: &Item) -> Option<Item> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .and_then(|items| items.iter().find(|item| matches_key(item, key)).cloned())
    }

    /// Key attribute names of `table`, from its create call or failing that
    /// from an earlier keyed request.
    fn key_names(&self, table: &str) -> Option<Vec<String>> {
        if let Some(names) = self.key_names.lock().unwrap().get(table) {
            return Some(names.clone());
        }
        self.calls.lock().unwrap().iter().rev().find_map(|call| {
            let (name, key) = match call {
                Call::GetItem(input) => (input.get_table_name(), input.get_key()),
                Call::UpdateItem(input) => (input.get_table_name(), input.get_key()),
                Call::DeleteItem(input) => (input.get_table_name(), input.get_key()),
                _ => return None,
            };
            match (name.as_deref(), key) {
                (Some(name), Some(key)) if name == table => Some(key.keys().cloned().collect()),
                _ => None,
            }
        })
    }

    fn remove(&self, table: &str, key: &Item) -> Option<Item> {
        let mut tables = self.tables.lock().unwrap();
        let items = tables.get_mut(table)?;
        let position = items.iter().position(|item| matches_key(item, key))?;
        Some(items.remove(position))
    }
}

fn matches_key(item: &Item, key: &Item) -> bool {
    key.iter().all(|(name, value)| item.get(name) == Some(value))
}

#[async_trait]
impl DynamoService for RecordingService {
    async fn create_table(
        &self,
        ctx: &Context,
        input: CreateTableInputBuilder,
    ) -> Result<CreateTableOutput, ServiceError> {
        self.record(ctx, Call::CreateTable(input.clone())).await?;

        let name = input.get_table_name().clone().unwrap_or_default();
        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(&name) {
            return Err(ServiceError::new(
                ServiceErrorKind::ResourceInUse,
                format!("Table already exists: {}", name),
            ));
        }
        let names = input
            .get_key_schema()
            .iter()
            .flatten()
            .map(|element| element.attribute_name().to_string())
            .collect();
        self.key_names.lock().unwrap().insert(name.clone(), names);
        tables.insert(name, Vec::new());
        Ok(CreateTableOutput::builder().build())
    }

    async fn put_item(
        &self,
        ctx: &Context,
        input: PutItemInputBuilder,
    ) -> Result<PutItemOutput, ServiceError> {
        self.record(ctx, Call::PutItem(input.clone())).await?;

        let table = input.get_table_name().clone().unwrap_or_default();
        let item = input.get_item().clone().unwrap_or_default();
        let key_names = self.key_names(&table).filter(|names| !names.is_empty());
        let mut tables = self.tables.lock().unwrap();
        let items = tables.entry(table).or_default();
        if let Some(names) = key_names {
            items.retain(|stored| {
                !names
                    .iter()
                    .all(|name| stored.get(name).is_some() && stored.get(name) == item.get(name))
            });
        }
        items.push(item);
        Ok(PutItemOutput::builder().build())
    }

    async fn get_item(
        &self,
        ctx: &Context,
        input: GetItemInputBuilder,
    ) -> Result<GetItemOutput, ServiceError> {
        self.record(ctx, Call::GetItem(input.clone())).await?;

        let table = input.get_table_name().clone().unwrap_or_default();
        let key = input.get_key().clone().unwrap_or_default();
        Ok(GetItemOutput::builder()
            .set_item(self.find(&table, &key))
            .build())
    }

    async fn update_item(
        &self,
        ctx: &Context,
        input: UpdateItemInputBuilder,
    ) -> Result<UpdateItemOutput, ServiceError> {
        self.record(ctx, Call::UpdateItem(input.clone())).await?;

        let table = input.get_table_name().clone().unwrap_or_default();
        let key = input.get_key().clone().unwrap_or_default();
        let attributes = match input.get_return_values() {
            Some(ReturnValue::AllNew) => self.find(&table, &key),
            _ => None,
        };
        Ok(UpdateItemOutput::builder().set_attributes(attributes).build())
    }

    async fn delete_item(
        &self,
        ctx: &Context,
        input: DeleteItemInputBuilder,
    ) -> Result<DeleteItemOutput, ServiceError> {
        self.record(ctx, Call::DeleteItem(input.clone())).await?;

        let table = input.get_table_name().clone().unwrap_or_default();
        let key = input.get_key().clone().unwrap_or_default();
        let removed = self.remove(&table, &key);
        let attributes = match input.get_return_values() {
            Some(ReturnValue::AllOld) => removed,
            _ => None,
        };
        Ok(DeleteItemOutput::builder().set_attributes(attributes).build())
    }
}
