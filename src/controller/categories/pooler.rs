//! # Connection Pooler
//!
//! The read endpoint lists one pooler per database; the category document is
//! the entry whose `database_type` is `PRIMARY`. The update endpoint answers
//! with the bare settings object.

use serde::de::Error as _;
use serde::Deserialize;

use super::Category;
use crate::model::{settings_document, ConfigCategory};

const PRIMARY_DATABASE: &str = "PRIMARY";

settings_document! {
    /// Pooler settings of the primary database
    pub struct PoolerSettings {
        default_pool_size as "default_pool_size": i64,
        pool_mode as "pool_mode": String,
    }
}

#[derive(Debug, Deserialize)]
struct PoolerEntry {
    #[serde(default)]
    database_type: Option<String>,
    #[serde(flatten)]
    settings: PoolerSettings,
}

#[derive(Debug)]
pub struct PoolerCategory;

impl Category for PoolerCategory {
    const KIND: ConfigCategory = ConfigCategory::Pooler;
    type Document = PoolerSettings;

    fn decode_read(body: &[u8]) -> Result<PoolerSettings, serde_json::Error> {
        let entries: Vec<PoolerEntry> = serde_json::from_slice(body)?;
        entries
            .into_iter()
            .find(|entry| entry.database_type.as_deref() == Some(PRIMARY_DATABASE))
            .map(|entry| entry.settings)
            .ok_or_else(|| serde_json::Error::custom("no PRIMARY database pooler in response"))
    }

    fn decode_echo(
        body: &[u8],
        _submitted: &PoolerSettings,
    ) -> Result<PoolerSettings, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
