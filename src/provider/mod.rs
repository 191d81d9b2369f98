//! # Provider
//!
//! Seam between the reconciliation core and the remote Management API.
//!
//! `ManagementApi` returns raw `{status, body}` responses. Deciding whether a
//! status means "orphaned", "write failed" or "project gone" belongs to the
//! callers in `controller`, so the REST client stays a thin transport.

pub mod management;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use paths::{ManagementOperation, PathBuilderError};
use serde_json::Value;
use thiserror::Error;

use crate::model::{ConfigCategory, ServiceName};

pub use management::ManagementApiClient;

/// A Management API response, classified by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a JSON body
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for error messages
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The remote call itself failed: no HTTP status was obtained
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build path for {operation}: {source}")]
    Path {
        operation: ManagementOperation,
        #[source]
        source: PathBuilderError,
    },
    #[error("{operation} request failed: {source}")]
    Request {
        operation: ManagementOperation,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProviderError {
    pub fn request(
        operation: ManagementOperation,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProviderError::Request {
            operation,
            source: source.into(),
        }
    }
}

/// Management API operations consumed by the reconciler and the waiters
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Fetch the full remote document of a category
    async fn read_settings(
        &self,
        project_ref: &str,
        category: ConfigCategory,
    ) -> Result<ApiResponse, ProviderError>;

    /// Submit a write body; the response echoes the full remote document
    async fn write_settings(
        &self,
        project_ref: &str,
        category: ConfigCategory,
        body: &Value,
    ) -> Result<ApiResponse, ProviderError>;

    /// Fetch the project, whose body carries `{status}`
    async fn project_status(&self, project_ref: &str) -> Result<ApiResponse, ProviderError>;

    /// Fetch the batch health of the given services
    async fn services_health(
        &self,
        project_ref: &str,
        services: &[ServiceName],
    ) -> Result<ApiResponse, ProviderError>;
}

/// Operation used to read a category
pub fn read_operation(category: ConfigCategory) -> ManagementOperation {
    match category {
        ConfigCategory::Database => ManagementOperation::GetPostgresConfig,
        ConfigCategory::Network => ManagementOperation::GetNetworkRestrictions,
        ConfigCategory::Api => ManagementOperation::GetPostgrestConfig,
        ConfigCategory::Auth => ManagementOperation::GetAuthConfig,
        ConfigCategory::Storage => ManagementOperation::GetStorageConfig,
        ConfigCategory::Pooler => ManagementOperation::GetPoolerConfig,
    }
}

/// Operation used to write a category
pub fn write_operation(category: ConfigCategory) -> ManagementOperation {
    match category {
        ConfigCategory::Database => ManagementOperation::UpdatePostgresConfig,
        ConfigCategory::Network => ManagementOperation::ApplyNetworkRestrictions,
        ConfigCategory::Api => ManagementOperation::UpdatePostgrestConfig,
        ConfigCategory::Auth => ManagementOperation::UpdateAuthConfig,
        ConfigCategory::Storage => ManagementOperation::UpdateStorageConfig,
        ConfigCategory::Pooler => ManagementOperation::UpdatePoolerConfig,
    }
}
