pub mod create_table;
pub mod delete_item;
pub mod get_item;
pub mod put_item;
pub mod update_item;

use serde::de::DeserializeOwned;
use std::{collections::HashMap, future::Future};
use tracing::{debug, warn};

use aws_sdk_dynamodb::types::AttributeValue;

use crate::{
    context::Context,
    error::{Error, Operation, ServiceError},
};

/// Runs one service call under `ctx`, labelling failures with `op`.
pub(crate) async fn dispatch<T, F>(
    ctx: &Context,
    op: Operation,
    table: &str,
    call: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    debug!(table, operation = %op, "dispatching request");

    let result = ctx
        .run(async { call.await.map_err(|source| Error::Service { op, source }) })
        .await;

    if let Err(err) = &result {
        warn!(table, operation = %op, error = %err, "request failed");
    }
    result
}

/// Decodes returned attributes into `T`, or `NotFound` when there are none.
pub(crate) fn decode<T: DeserializeOwned>(
    attributes: Option<HashMap<String, AttributeValue>>,
) -> Result<T, Error> {
    let attributes = attributes.ok_or(Error::NotFound)?;
    serde_dynamo::from_item(attributes).map_err(Error::Decode)
}
