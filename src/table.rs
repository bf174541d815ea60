use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::Client,
    context::Context,
    error::Error,
    models::reflect::Reflect,
    operations::{
        delete_item::DeleteItem, get_item::GetItem, put_item::PutItem, update_item::UpdateItem,
    },
};

/// A named table. Each builder it hands out is single use.
#[derive(Debug, Clone)]
pub struct Table {
    client: Client,
    name: String,
}

impl Table {
    pub(crate) fn new(client: Client, name: String) -> Self {
        Table { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn put_item(&self) -> PutItem {
        PutItem::new(self.client.clone(), self.name.clone())
    }

    pub fn get_item(&self) -> GetItem {
        GetItem::new(self.client.clone(), self.name.clone())
    }

    pub fn update_item(&self) -> UpdateItem {
        UpdateItem::new(self.client.clone(), self.name.clone())
    }

    pub fn delete_item(&self) -> DeleteItem {
        DeleteItem::new(self.client.clone(), self.name.clone())
    }

    pub async fn put<T: Serialize + ?Sized>(&self, item: &T) -> Result<(), Error> {
        self.put_item().bind(item).execute().await
    }

    pub async fn put_with_context<T: Serialize + ?Sized>(
        &self,
        ctx: &Context,
        item: &T,
    ) -> Result<(), Error> {
        self.put_item().bind(item).execute_with_context(ctx).await
    }

    /// Reads the item whose key fields match `key`.
    pub async fn get<K, T>(&self, key: &K) -> Result<T, Error>
    where
        K: Reflect + Serialize,
        T: DeserializeOwned,
    {
        self.get_item().bind(key).execute().await
    }

    pub async fn get_with_context<K, T>(&self, ctx: &Context, key: &K) -> Result<T, Error>
    where
        K: Reflect + Serialize,
        T: DeserializeOwned,
    {
        self.get_item().bind(key).execute_with_context(ctx).await
    }
}
