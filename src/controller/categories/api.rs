//! PostgREST configuration (`/postgrest`).
//!
//! The read endpoint also returns the project's JWT secret. It cannot be
//! updated through this endpoint, so it is not a field of the document and is
//! dropped on decode.

use super::Category;
use crate::model::{settings_document, ConfigCategory};

settings_document! {
    /// API gateway settings
    pub struct ApiSettings {
        db_schema as "db_schema": String,
        db_extra_search_path as "db_extra_search_path": String,
        max_rows as "max_rows": i64,
        db_pool as "db_pool": i64,
    }
}

#[derive(Debug)]
pub struct ApiCategory;

impl Category for ApiCategory {
    const KIND: ConfigCategory = ConfigCategory::Api;
    type Document = ApiSettings;
}
