use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use std::collections::HashMap;

use super::{discover_keys, scalar::encode_scalar};
use crate::{
    config::TagVocabulary,
    error::Error,
    models::{
        record::{Record, RecordDescription},
        reflect::{elem_of_value, Reflect, ValueShape},
    },
};

pub type Item = HashMap<String, AttributeValue>;

/// Builds the minimal key map that identifies a record's row.
#[derive(Debug, Clone, Default)]
pub struct KeyEncoder {
    vocabulary: TagVocabulary,
}

impl KeyEncoder {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        KeyEncoder { vocabulary }
    }

    /// Encodes the key fields of a record.
    ///
    /// Input that is not a record, such as an already built key map, is
    /// handed to the generic marshaller and returned as is.
    pub fn encode<T: Reflect + Serialize>(&self, input: &T) -> Result<Item, Error> {
        match elem_of_value(input) {
            ValueShape::Record(description, record) => self.encode_record(&description, record),
            _ => marshal(input),
        }
    }

    pub fn encode_record(
        &self,
        description: &RecordDescription,
        record: &dyn Record,
    ) -> Result<Item, Error> {
        let keys = discover_keys(description, &self.vocabulary)?;
        let mut item = HashMap::with_capacity(2);

        for field in std::iter::once(keys.partition).chain(keys.sort) {
            let value = record.field(field.name()).ok_or_else(|| {
                Error::Config(format!(
                    "record '{}' has no value for declared field '{}'",
                    description.name(),
                    field.name()
                ))
            })?;
            item.insert(field.name().to_string(), encode_scalar(field.name(), value)?);
        }

        Ok(item)
    }
}

/// Marshals any serializable value into a full attribute map.
pub fn marshal<T: Serialize + ?Sized>(input: &T) -> Result<Item, Error> {
    serde_dynamo::to_item(input).map_err(Error::Bind)
}
