//! # Reconcile Errors
//!
//! Failures of a category read or write. Every variant names the category and,
//! where a remote call was involved, the project and the operation, so the
//! message is actionable without server-side logs.

use thiserror::Error;

use crate::controller::categories::ValidationError;
use crate::model::{ConfigCategory, FieldError};
use crate::provider::ProviderError;

/// Which half of a category reconcile failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "update",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("unable to {operation} {category} settings for project {project_ref}: {source}")]
    Transport {
        operation: Operation,
        category: ConfigCategory,
        project_ref: String,
        #[source]
        source: ProviderError,
    },
    #[error(
        "unable to {operation} {category} settings for project {project_ref}, got status {status}: {body}"
    )]
    UnexpectedStatus {
        operation: Operation,
        category: ConfigCategory,
        project_ref: String,
        status: u16,
        body: String,
    },
    #[error(
        "unable to {operation} {category} settings for project {project_ref}: malformed response: {source}"
    )]
    Decode {
        operation: Operation,
        category: ConfigCategory,
        project_ref: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {category} settings declaration: {source}")]
    Declaration {
        category: ConfigCategory,
        #[source]
        source: FieldError,
    },
    #[error("invalid {category} settings for project {project_ref}: {source}")]
    Validation {
        category: ConfigCategory,
        project_ref: String,
        #[source]
        source: ValidationError,
    },
    #[error("project {project_ref} not found")]
    ProjectNotFound { project_ref: String },
}

impl ReconcileError {
    /// Category the failure belongs to, if any
    pub fn category(&self) -> Option<ConfigCategory> {
        match self {
            ReconcileError::Transport { category, .. }
            | ReconcileError::UnexpectedStatus { category, .. }
            | ReconcileError::Decode { category, .. }
            | ReconcileError::Declaration { category, .. }
            | ReconcileError::Validation { category, .. } => Some(*category),
            ReconcileError::ProjectNotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_carries_context() {
        let error = ReconcileError::UnexpectedStatus {
            operation: Operation::Write,
            category: ConfigCategory::Auth,
            project_ref: "abcdefghijklmnop".to_owned(),
            status: 400,
            body: r#"{"message":"bad site_url"}"#.to_owned(),
        };
        assert_eq!(
            error.to_string(),
            r#"unable to update auth settings for project abcdefghijklmnop, got status 400: {"message":"bad site_url"}"#
        );
        assert_eq!(error.category(), Some(ConfigCategory::Auth));
    }
}
