//! Storage configuration (`/config/storage`).

use serde::{Deserialize, Serialize};

use super::Category;
use crate::model::{settings_document, ConfigCategory};

/// `{ "enabled": bool }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggle {
    pub enabled: bool,
}

/// Optional storage features; undeclared features are left out of writes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageFeatures {
    #[serde(
        rename = "imageTransformation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_transformation: Option<FeatureToggle>,
    #[serde(rename = "s3Protocol", default, skip_serializing_if = "Option::is_none")]
    pub s3_protocol: Option<FeatureToggle>,
}

settings_document! {
    /// Storage service settings
    pub struct StorageSettings {
        file_size_limit as "fileSizeLimit": i64,
        features as "features": StorageFeatures,
    }
}

#[derive(Debug)]
pub struct StorageCategory;

impl Category for StorageCategory {
    const KIND: ConfigCategory = ConfigCategory::Storage;
    type Document = StorageSettings;
}
