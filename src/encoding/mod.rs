pub mod key;
pub mod scalar;
pub mod schema;

use crate::{
    config::TagVocabulary,
    error::{Error, KeyRole},
    models::record::{Field, RecordDescription},
};

/// The fields of a record description that carry the key roles.
#[derive(Debug, Clone, Copy)]
pub struct KeyFields<'a> {
    pub partition: &'a Field,
    pub sort: Option<&'a Field>,
}

/// Scans every field of `description` for key role tags.
///
/// All fields are visited so a second partition or sort key is reported
/// even when it comes after a valid one.
pub fn discover_keys<'a>(
    description: &'a RecordDescription,
    vocabulary: &TagVocabulary,
) -> Result<KeyFields<'a>, Error> {
    let mut partition: Option<&Field> = None;
    let mut sort: Option<&Field> = None;

    for field in description.fields() {
        let Some(value) = field.lookup(vocabulary.tag_name()) else {
            continue;
        };

        if vocabulary.is_partition_key(value) {
            if partition.is_some() {
                return Err(Error::MultipleKeys(KeyRole::Partition));
            }
            partition = Some(field);
        } else if vocabulary.is_sort_key(value) {
            if sort.is_some() {
                return Err(Error::MultipleKeys(KeyRole::Sort));
            }
            sort = Some(field);
        }
    }

    match partition {
        Some(partition) => Ok(KeyFields { partition, sort }),
        None => Err(Error::NoPartitionKey),
    }
}
