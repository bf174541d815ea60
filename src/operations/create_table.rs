use aws_sdk_dynamodb::{
    operation::create_table::{builders::CreateTableInputBuilder, CreateTableInput},
    types::{BillingMode, ProvisionedThroughput},
};
use tracing::info;

use super::dispatch;
use crate::{
    client::Client,
    context::Context,
    encoding::schema::SchemaSource,
    error::{Error, Operation, ServiceErrorKind},
};

pub const DEFAULT_READ_CAPACITY: i64 = 10;
pub const DEFAULT_WRITE_CAPACITY: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capacity {
    Provisioned { read: i64, write: i64 },
    OnDemand,
}

/// Creates a table whose key schema is derived from a record description.
///
/// Provisioned at 10 read and 10 write capacity units unless told otherwise.
#[derive(Debug)]
pub struct CreateTable {
    client: Client,
    table: String,
    input: CreateTableInputBuilder,
    capacity: Capacity,
    if_not_exists: bool,
    bound: Result<(), Error>,
}

impl CreateTable {
    pub(crate) fn new(client: Client, table: String) -> Self {
        let input = CreateTableInput::builder().table_name(table.clone());
        let bound = Err(Error::Config(format!(
            "no record description bound for table '{}'",
            table
        )));
        CreateTable {
            client,
            table,
            input,
            capacity: Capacity::Provisioned {
                read: DEFAULT_READ_CAPACITY,
                write: DEFAULT_WRITE_CAPACITY,
            },
            if_not_exists: false,
            bound,
        }
    }

    /// Derives attribute definitions and key schema from `shape`.
    pub fn bind<S: SchemaSource + ?Sized>(mut self, shape: &S) -> Self {
        let encoded = shape
            .table_schema(&self.client.schema_encoder())
            .and_then(|schema| Ok((schema.attribute_definitions()?, schema.key_schema()?)));
        self.bound = match encoded {
            Ok((definitions, key_schema)) => {
                self.input = self
                    .input
                    .set_attribute_definitions(Some(definitions))
                    .set_key_schema(Some(key_schema));
                Ok(())
            }
            Err(err) => Err(err),
        };
        self
    }

    pub fn provisioned_throughput(mut self, read: i64, write: i64) -> Self {
        self.capacity = Capacity::Provisioned { read, write };
        self
    }

    /// Switches between provisioned and on-demand capacity. Switching back
    /// to provisioned restores the default throughput.
    pub fn billing_mode(mut self, mode: BillingMode) -> Self {
        self.capacity = match mode {
            BillingMode::PayPerRequest => Capacity::OnDemand,
            _ => Capacity::Provisioned {
                read: DEFAULT_READ_CAPACITY,
                write: DEFAULT_WRITE_CAPACITY,
            },
        };
        self
    }

    /// Treats an already existing table as success.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn input(&self) -> &CreateTableInputBuilder {
        &self.input
    }

    pub async fn execute(self) -> Result<(), Error> {
        let ctx = self.client.context();
        self.execute_with_context(&ctx).await
    }

    pub async fn execute_with_context(self, ctx: &Context) -> Result<(), Error> {
        let CreateTable {
            client,
            table,
            input,
            capacity,
            if_not_exists,
            bound,
        } = self;
        bound?;

        let input = match capacity {
            Capacity::Provisioned { read, write } => input
                .billing_mode(BillingMode::Provisioned)
                .provisioned_throughput(
                    ProvisionedThroughput::builder()
                        .read_capacity_units(read)
                        .write_capacity_units(write)
                        .build()?,
                ),
            Capacity::OnDemand => input.billing_mode(BillingMode::PayPerRequest),
        };

        let result = dispatch(
            ctx,
            Operation::CreateTable,
            &table,
            client.service().create_table(ctx, input),
        )
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if if_not_exists && err.service_kind() == Some(ServiceErrorKind::ResourceInUse) =>
            {
                info!(table = %table, "table already exists");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
