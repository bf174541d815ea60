use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ScalarAttributeType,
};

use super::discover_keys;
use crate::{
    config::TagVocabulary,
    error::Error,
    models::{
        record::{Field, Kind, RecordDescription},
        reflect::{elem_of_type, elem_of_value, Reflect, TypeShape, ValueShape},
    },
};

/// Maps a key field's kind to the attribute type used in table definitions.
pub fn attribute_type(kind: Kind) -> ScalarAttributeType {
    match kind {
        Kind::U8 => ScalarAttributeType::B,
        Kind::String => ScalarAttributeType::S,
        _ => ScalarAttributeType::N,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: ScalarAttributeType,
}

impl KeyAttribute {
    fn from_field(field: &Field) -> Result<Self, Error> {
        if !field.kind().is_scalar() {
            return Err(Error::UnsupportedScalar {
                field: field.name().to_string(),
                kind: field.kind(),
            });
        }
        Ok(KeyAttribute {
            name: field.name().to_string(),
            attribute_type: attribute_type(field.kind()),
        })
    }
}

/// The primary key layout of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    partition: KeyAttribute,
    sort: Option<KeyAttribute>,
}

impl TableSchema {
    pub fn new(partition: KeyAttribute, sort: Option<KeyAttribute>) -> Self {
        TableSchema { partition, sort }
    }

    pub fn partition_key(&self) -> &KeyAttribute {
        &self.partition
    }

    pub fn sort_key(&self) -> Option<&KeyAttribute> {
        self.sort.as_ref()
    }

    pub fn key_names(&self) -> Vec<&str> {
        std::iter::once(&self.partition)
            .chain(self.sort.as_ref())
            .map(|key| key.name.as_str())
            .collect()
    }

    pub fn attribute_definitions(&self) -> Result<Vec<AttributeDefinition>, Error> {
        std::iter::once(&self.partition)
            .chain(self.sort.as_ref())
            .map(|key| {
                AttributeDefinition::builder()
                    .attribute_name(&key.name)
                    .attribute_type(key.attribute_type.clone())
                    .build()
                    .map_err(Error::from)
            })
            .collect()
    }

    pub fn key_schema(&self) -> Result<Vec<KeySchemaElement>, Error> {
        let roles = [(&self.partition, KeyType::Hash)]
            .into_iter()
            .chain(self.sort.as_ref().map(|sort| (sort, KeyType::Range)));

        roles
            .map(|(key, key_type)| {
                KeySchemaElement::builder()
                    .attribute_name(&key.name)
                    .key_type(key_type)
                    .build()
                    .map_err(Error::from)
            })
            .collect()
    }
}

/// Derives a [`TableSchema`] from a record description.
#[derive(Debug, Clone, Default)]
pub struct SchemaEncoder {
    vocabulary: TagVocabulary,
}

impl SchemaEncoder {
    pub fn new(vocabulary: TagVocabulary) -> Self {
        SchemaEncoder { vocabulary }
    }

    pub fn encode(&self, description: &RecordDescription) -> Result<TableSchema, Error> {
        let keys = discover_keys(description, &self.vocabulary)?;
        let partition = KeyAttribute::from_field(keys.partition)?;
        let sort = keys.sort.map(KeyAttribute::from_field).transpose()?;

        Ok(TableSchema { partition, sort })
    }

    pub fn encode_type<T: Reflect>(&self) -> Result<TableSchema, Error> {
        match elem_of_type(T::type_shape()) {
            TypeShape::Record(describe) => self.encode(&describe()),
            TypeShape::Kind(kind) => Err(not_a_record(kind)),
            TypeShape::Indirect(_) => Err(not_a_record(Kind::Record)),
        }
    }

    pub fn encode_value(&self, value: &dyn Reflect) -> Result<TableSchema, Error> {
        match elem_of_value(value) {
            ValueShape::Record(description, _) => self.encode(&description),
            ValueShape::Other(kind) => Err(not_a_record(kind)),
            _ => Err(Error::Config(
                "cannot derive a table schema from a scalar value".to_string(),
            )),
        }
    }
}

fn not_a_record(kind: Kind) -> Error {
    Error::Config(format!(
        "cannot derive a table schema from a value of kind {}",
        kind
    ))
}

/// Anything a table schema can be derived from.
pub trait SchemaSource {
    fn table_schema(&self, encoder: &SchemaEncoder) -> Result<TableSchema, Error>;
}

impl SchemaSource for RecordDescription {
    fn table_schema(&self, encoder: &SchemaEncoder) -> Result<TableSchema, Error> {
        encoder.encode(self)
    }
}

impl SchemaSource for TableSchema {
    fn table_schema(&self, _encoder: &SchemaEncoder) -> Result<TableSchema, Error> {
        Ok(self.clone())
    }
}

impl<T: Reflect> SchemaSource for T {
    fn table_schema(&self, encoder: &SchemaEncoder) -> Result<TableSchema, Error> {
        encoder.encode_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TagVocabulary, error::KeyRole, record};
    use std::collections::HashMap;

    #[derive(Default)]
    struct Todo {
        id: String,
        item: String,
    }

    record!(Todo {
        "ID" => id (dynamodb = "paritionkey"),
        "Item" => item,
    });

    #[derive(Default)]
    struct Reading {
        sensor: String,
        at: i64,
        value: f64,
    }

    record!(Reading {
        "sensor" => sensor (dynamodb = "paritionkey"),
        "at" => at (dynamodb = "sortkey"),
        "value" => value,
    });

    #[derive(Default)]
    struct TwoPartitions {
        a: String,
        b: String,
    }

    record!(TwoPartitions {
        "a" => a (dynamodb = "paritionkey"),
        "b" => b (dynamodb = "paritionkey"),
    });

    #[derive(Default)]
    struct MapKey {
        key: HashMap<String, String>,
    }

    record!(MapKey {
        "key" => key (dynamodb = "paritionkey"),
    });

    #[test]
    fn partition_only_schema() {
        let schema = SchemaEncoder::default().encode_type::<Todo>().unwrap();
        let keys = schema.key_schema().unwrap();
        let defs = schema.attribute_definitions().unwrap();

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].attribute_name(), "ID");
        assert_eq!(keys[0].key_type(), &KeyType::Hash);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].attribute_name(), "ID");
        assert_eq!(defs[0].attribute_type(), &ScalarAttributeType::S);
    }

    #[test]
    fn sort_key_is_appended_as_range() {
        let schema = SchemaEncoder::default()
            .encode_value(&Reading::default())
            .unwrap();
        let keys = schema.key_schema().unwrap();
        let defs = schema.attribute_definitions().unwrap();

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].attribute_name(), "at");
        assert_eq!(keys[1].key_type(), &KeyType::Range);
        assert_eq!(defs[1].attribute_name(), "at");
        assert_eq!(
            defs[1].attribute_type(),
            &ScalarAttributeType::N,
            "Expected an i64 sort key to be a number"
        );
        assert_eq!(schema.key_names(), vec!["sensor", "at"]);
    }

    #[test]
    fn schema_is_deterministic() {
        let encoder = SchemaEncoder::default();
        let first = encoder.encode_type::<Reading>().unwrap();
        let second = encoder.encode_type::<Reading>().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.key_schema().unwrap(), second.key_schema().unwrap());
    }

    #[test]
    fn indirection_is_peeled() {
        let boxed: Option<Box<Todo>> = Some(Box::new(Todo::default()));
        let schema = SchemaEncoder::default().encode_value(&boxed).unwrap();

        assert_eq!(schema.partition_key().name, "ID");
        assert_eq!(
            SchemaEncoder::default().encode_type::<&Box<Todo>>().unwrap(),
            schema
        );
    }

    #[test]
    fn multiple_partition_keys() {
        assert!(matches!(
            SchemaEncoder::default().encode_type::<TwoPartitions>(),
            Err(Error::MultipleKeys(KeyRole::Partition))
        ));
    }

    #[test]
    fn non_record_input_is_a_config_error() {
        let encoder = SchemaEncoder::default();

        assert!(matches!(encoder.encode_type::<String>(), Err(Error::Config(_))));
        assert!(matches!(encoder.encode_value(&42u32), Err(Error::Config(_))));
        assert!(matches!(
            encoder.encode_value(&HashMap::<String, String>::new()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn non_scalar_key_is_unsupported() {
        assert!(matches!(
            SchemaEncoder::default().encode_type::<MapKey>(),
            Err(Error::UnsupportedScalar { kind: Kind::Map, .. })
        ));
    }

    #[test]
    fn custom_vocabulary() {
        let desc = RecordDescription::new("Custom")
            .field(Field::new("pk", Kind::U64).tag("ddb", "hash"))
            .field(Field::new("sk", Kind::String).tag("ddb", "range"));
        let encoder = SchemaEncoder::new(TagVocabulary::new("ddb", "hash", "range").unwrap());
        let schema = encoder.encode(&desc).unwrap();

        assert_eq!(schema.partition_key().attribute_type, ScalarAttributeType::N);
        assert_eq!(
            schema.sort_key().map(|k| k.name.as_str()),
            Some("sk")
        );
        assert!(matches!(
            SchemaEncoder::default().encode(&desc),
            Err(Error::NoPartitionKey)
        ));
    }

    #[test]
    fn attribute_type_for_every_scalar_kind() {
        let cases = [
            (Kind::String, ScalarAttributeType::S),
            (Kind::U8, ScalarAttributeType::B),
            (Kind::Bool, ScalarAttributeType::N),
            (Kind::I8, ScalarAttributeType::N),
            (Kind::I16, ScalarAttributeType::N),
            (Kind::I32, ScalarAttributeType::N),
            (Kind::I64, ScalarAttributeType::N),
            (Kind::Isize, ScalarAttributeType::N),
            (Kind::U16, ScalarAttributeType::N),
            (Kind::U32, ScalarAttributeType::N),
            (Kind::U64, ScalarAttributeType::N),
            (Kind::Usize, ScalarAttributeType::N),
            (Kind::F32, ScalarAttributeType::N),
            (Kind::F64, ScalarAttributeType::N),
        ];

        for (kind, expected) in cases {
            assert!(kind.is_scalar());
            assert_eq!(
                attribute_type(kind),
                expected,
                "Unexpected attribute type for {}",
                kind
            );
        }
    }
}
