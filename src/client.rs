use aws_config::SdkConfig;
use std::{fmt, sync::Arc, time::Duration};
use tracing::debug;

use crate::{
    config::{Config, TagVocabulary},
    context::Context,
    encoding::{key::KeyEncoder, schema::{SchemaEncoder, SchemaSource}},
    error::Error,
    infrastructure::database::{sdk_client, sdk_client_from_env, DynamoService},
    operations::create_table::CreateTable,
    table::Table,
};

/// A record type that knows which table it lives in.
pub trait TableItem {
    fn table_name() -> String;
}

/// Shared handle to the service plus the tag vocabulary and default timeout.
///
/// Cheap to clone and safe to use from many tasks at once.
#[derive(Clone)]
pub struct Client {
    service: Arc<dyn DynamoService>,
    timeout: Duration,
    vocabulary: TagVocabulary,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("timeout", &self.timeout)
            .field("vocabulary", &self.vocabulary)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(service: Arc<dyn DynamoService>, config: Config) -> Result<Self, Error> {
        let vocabulary = config.vocabulary()?;
        debug!(
            timeout = %humantime::format_duration(config.timeout),
            tag = vocabulary.tag_name(),
            "client configured"
        );
        Ok(Client {
            service,
            timeout: config.timeout,
            vocabulary,
        })
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, config: Config) -> Result<Self, Error> {
        Client::new(Arc::new(sdk_client(sdk_config)), config)
    }

    /// Loads credentials, region and endpoint from the environment.
    pub async fn from_env(config: Config) -> Result<Self, Error> {
        Client::new(Arc::new(sdk_client_from_env().await), config)
    }

    /// A fresh context bounded by the configured timeout.
    pub fn context(&self) -> Context {
        Context::with_timeout(self.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    pub fn key_encoder(&self) -> KeyEncoder {
        KeyEncoder::new(self.vocabulary.clone())
    }

    pub fn schema_encoder(&self) -> SchemaEncoder {
        SchemaEncoder::new(self.vocabulary.clone())
    }

    pub(crate) fn service(&self) -> &dyn DynamoService {
        self.service.as_ref()
    }

    pub fn table(&self, name: impl Into<String>) -> Table {
        Table::new(self.clone(), name.into())
    }

    pub fn table_for<T: TableItem>(&self) -> Table {
        self.table(T::table_name())
    }

    /// Creates `name` with a key schema derived from `shape` and the
    /// default provisioned throughput.
    pub async fn create_table<S: SchemaSource + ?Sized>(
        &self,
        name: impl Into<String>,
        shape: &S,
    ) -> Result<(), Error> {
        self.create_table_op(name).bind(shape).execute().await
    }

    pub async fn create_table_with_context<S: SchemaSource + ?Sized>(
        &self,
        ctx: &Context,
        name: impl Into<String>,
        shape: &S,
    ) -> Result<(), Error> {
        self.create_table_op(name)
            .bind(shape)
            .execute_with_context(ctx)
            .await
    }

    pub fn create_table_op(&self, name: impl Into<String>) -> CreateTable {
        CreateTable::new(self.clone(), name.into())
    }
}
