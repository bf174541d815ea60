use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TAG_NAME: &str = "dynamodb";
// Misspelled on purpose: records tagged by earlier releases rely on it.
pub const DEFAULT_PARTITION_KEY_MARKER: &str = "paritionkey";
pub const PARTITION_KEY_ALIAS: &str = "partitionkey";
pub const DEFAULT_SORT_KEY_MARKER: &str = "sortkey";

/// Client configuration.
///
/// Can be deserialized from an application config file, with `timeout`
/// written as a human readable duration such as `"10s"` or `"1m 30s"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub tag_name: String,
    pub partition_key_marker: String,
    pub sort_key_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: DEFAULT_TIMEOUT,
            tag_name: DEFAULT_TAG_NAME.to_string(),
            partition_key_marker: DEFAULT_PARTITION_KEY_MARKER.to_string(),
            sort_key_marker: DEFAULT_SORT_KEY_MARKER.to_string(),
        }
    }
}

impl Config {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    pub fn with_partition_key_marker(mut self, marker: impl Into<String>) -> Self {
        self.partition_key_marker = marker.into();
        self
    }

    pub fn with_sort_key_marker(mut self, marker: impl Into<String>) -> Self {
        self.sort_key_marker = marker.into();
        self
    }

    pub fn vocabulary(&self) -> Result<TagVocabulary, Error> {
        TagVocabulary::new(
            &self.tag_name,
            &self.partition_key_marker,
            &self.sort_key_marker,
        )
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    humantime::parse_duration(&value).map_err(serde::de::Error::custom)
}

/// The strings used to recognize key roles on record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    tag_name: String,
    partition_key_marker: String,
    sort_key_marker: String,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        TagVocabulary {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            partition_key_marker: DEFAULT_PARTITION_KEY_MARKER.to_string(),
            sort_key_marker: DEFAULT_SORT_KEY_MARKER.to_string(),
        }
    }
}

impl TagVocabulary {
    pub fn new(
        tag_name: &str,
        partition_key_marker: &str,
        sort_key_marker: &str,
    ) -> Result<Self, Error> {
        if tag_name.trim().is_empty() {
            return Err(Error::Config("tag name must not be empty".to_string()));
        }
        if partition_key_marker.trim().is_empty() || sort_key_marker.trim().is_empty() {
            return Err(Error::Config("key markers must not be empty".to_string()));
        }
        if partition_key_marker == sort_key_marker {
            return Err(Error::Config(format!(
                "partition and sort key markers must differ, both are '{}'",
                partition_key_marker
            )));
        }
        if partition_key_marker == DEFAULT_PARTITION_KEY_MARKER
            && sort_key_marker == PARTITION_KEY_ALIAS
        {
            return Err(Error::Config(format!(
                "sort key marker '{}' is already a partition key alias",
                sort_key_marker
            )));
        }

        Ok(TagVocabulary {
            tag_name: tag_name.to_string(),
            partition_key_marker: partition_key_marker.to_string(),
            sort_key_marker: sort_key_marker.to_string(),
        })
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn is_partition_key(&self, value: &str) -> bool {
        value == self.partition_key_marker
            || (self.partition_key_marker == DEFAULT_PARTITION_KEY_MARKER
                && value == PARTITION_KEY_ALIAS)
    }

    pub fn is_sort_key(&self, value: &str) -> bool {
        value == self.sort_key_marker
    }
}
