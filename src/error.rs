use aws_sdk_dynamodb::error::BuildError;
use std::fmt;
use thiserror::Error;

use crate::models::record::Kind;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("encoder error: no partition key")]
    NoPartitionKey,
    #[error("encoder error: multiple {0} keys")]
    MultipleKeys(KeyRole),
    #[error("encode error: unsupported type {kind} for key field '{field}'")]
    UnsupportedScalar { field: String, kind: Kind },
    #[error("encode error: empty string for key field '{field}'")]
    EmptyString { field: String },
    #[error("bind error: {0}")]
    Bind(#[source] serde_dynamo::Error),
    #[error("failed to decode item: {0}")]
    Decode(#[source] serde_dynamo::Error),
    #[error("nothing found")]
    NotFound,
    #[error("failed to build request: {0}")]
    Build(#[from] BuildError),
    #[error("failed to {op}: {source}")]
    Service {
        op: Operation,
        #[source]
        source: ServiceError,
    },
    #[error("{0}")]
    Cancelled(Cancellation),
}

impl Error {
    /// The classification of the underlying service failure, if this is one.
    pub fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self {
            Error::Service { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}

/// The two key roles a record field can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Partition,
    Sort,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyRole::Partition => write!(f, "partition"),
            KeyRole::Sort => write!(f, "sort"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTable,
    PutItem,
    GetItem,
    UpdateItem,
    DeleteItem,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::CreateTable => write!(f, "create table"),
            Operation::PutItem => write!(f, "put item"),
            Operation::GetItem => write!(f, "get item"),
            Operation::UpdateItem => write!(f, "update item"),
            Operation::DeleteItem => write!(f, "delete item"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cancellation::Cancelled => write!(f, "context canceled"),
            Cancellation::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The table already exists, or is being created or deleted.
    ResourceInUse,
    ResourceNotFound,
    /// A condition attached through `use_expr` evaluated to false.
    ConditionalCheckFailed,
    Other,
}

/// A failure reported by the underlying service, with its cause kept intact.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct ServiceError {
    kind: ServiceErrorKind,
    #[source]
    source: BoxError,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}

impl From<aws_sdk_dynamodb::Error> for ServiceError {
    fn from(error: aws_sdk_dynamodb::Error) -> Self {
        let kind = match &error {
            aws_sdk_dynamodb::Error::ResourceInUseException(_) => ServiceErrorKind::ResourceInUse,
            aws_sdk_dynamodb::Error::ResourceNotFoundException(_) => {
                ServiceErrorKind::ResourceNotFound
            }
            aws_sdk_dynamodb::Error::ConditionalCheckFailedException(_) => {
                ServiceErrorKind::ConditionalCheckFailed
            }
            _ => ServiceErrorKind::Other,
        };
        ServiceError::new(kind, error)
    }
}
