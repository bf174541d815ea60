//! A thin typed layer over DynamoDB.
//!
//! Records describe their key attributes through per-field tags. From that
//! description the crate derives table schemas and key maps, and binds
//! records into fluent single-use request builders:
//!
//! ```no_run
//! use dynabind::{record, Client, Config};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Todo {
//!     #[serde(rename = "ID")]
//!     id: String,
//!     #[serde(rename = "Item")]
//!     item: String,
//! }
//!
//! record!(Todo {
//!     "ID" => id (dynamodb = "paritionkey"),
//!     "Item" => item,
//! });
//!
//! # async fn run() -> Result<(), dynabind::Error> {
//! let client = Client::from_env(Config::default()).await?;
//! client.create_table("todo", &Todo::default()).await?;
//!
//! let todo = Todo { id: "1".into(), item: "milk".into() };
//! client.table("todo").put_item().bind(&todo).execute().await?;
//! let found: Todo = client.table("todo").get_item().bind(&todo).execute().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod expression;
pub mod infrastructure;
pub mod models;
pub mod operations;
pub mod table;

pub use client::{Client, TableItem};
pub use config::{Config, TagVocabulary};
pub use context::Context;
pub use encoding::{
    key::KeyEncoder,
    schema::{SchemaEncoder, SchemaSource, TableSchema},
};
pub use error::{Error, ServiceError, ServiceErrorKind};
pub use expression::{Expression, ExpressionBuilder};
pub use infrastructure::database::DynamoService;
pub use models::{
    record::{Field, Kind, Record, RecordDescription},
    reflect::{Reflect, TypeShape, ValueShape},
};
pub use table::Table;

/// Re-exported so callers can build attribute values without a direct
/// dependency on the SDK.
pub use aws_sdk_dynamodb::types::AttributeValue;
