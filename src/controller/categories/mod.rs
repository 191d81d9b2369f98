//! # Settings Categories
//!
//! One marker type per category. Each binds the category's document (and its
//! field registry) to the wire shapes of its read and write endpoints.
//!
//! Most categories read and write the document as-is. The exceptions:
//!
//! - `network` flattens `{config: {dbAllowedCidrs, dbAllowedCidrsV6}}` into a
//!   single `restrictions` list and validates ranges before writing
//! - `pooler` reads a list of poolers and keeps the `PRIMARY` entry
//! - `auth` carries write-only secrets

mod api;
mod auth;
mod database;
mod network;
mod pooler;
mod storage;

pub use api::{ApiCategory, ApiSettings};
pub use auth::{AuthCategory, AuthSettings, AUTH_SENSITIVE_FIELDS};
pub use database::{DatabaseCategory, DatabaseSettings};
pub use network::{classify_cidr, CidrFamily, NetworkCategory, NetworkSettings};
pub use pooler::{PoolerCategory, PoolerSettings};
pub use storage::{FeatureToggle, StorageCategory, StorageFeatures, StorageSettings};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{ConfigCategory, FieldRegistry};

/// A locally computed precondition failed before any remote call
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid CIDR provided for network restrictions: {cidr}: {source}")]
    InvalidCidr {
        cidr: String,
        #[source]
        source: ipnetwork::IpNetworkError,
    },
    #[error("invalid CIDR provided for network restrictions: {cidr}: missing prefix length")]
    MissingPrefix { cidr: String },
    #[error("private IP provided for network restrictions: {cidr}")]
    PrivateCidr { cidr: String },
    #[error("failed to encode write body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Binding between a category, its document type and its wire shapes
pub trait Category: Send + Sync + 'static {
    const KIND: ConfigCategory;

    type Document: FieldRegistry
        + Serialize
        + DeserializeOwned
        + Clone
        + std::fmt::Debug
        + Send
        + Sync;

    /// Decode the body of a successful read
    fn decode_read(body: &[u8]) -> Result<Self::Document, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Decode the body of a successful write
    ///
    /// `submitted` is the typed document that was sent.
    fn decode_echo(
        body: &[u8],
        _submitted: &Self::Document,
    ) -> Result<Self::Document, serde_json::Error> {
        Self::decode_read(body)
    }

    /// Build the request body, failing before any remote call on invalid input
    fn encode_write(document: &Self::Document) -> Result<Value, ValidationError> {
        serde_json::to_value(document).map_err(ValidationError::Encode)
    }
}
