//! # Wait Errors

use std::time::Duration;

use thiserror::Error;

use crate::model::ProjectStatus;
use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("project {project_ref} in terminal state: {status}")]
    Terminal {
        project_ref: String,
        status: ProjectStatus,
    },
    #[error(
        "project {project_ref} did not become {target} within {timeout:?} (last observed: {last_state})"
    )]
    Timeout {
        project_ref: String,
        target: &'static str,
        timeout: Duration,
        last_state: String,
    },
    #[error("project {project_ref} services are unhealthy: {}", .failures.join("; "))]
    Unhealthy {
        project_ref: String,
        failures: Vec<String>,
    },
    #[error("failed to {action} for project {project_ref}: {source}")]
    Transport {
        project_ref: String,
        action: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("failed to {action} for project {project_ref}, got status {status}: {body}")]
    UnexpectedStatus {
        project_ref: String,
        action: &'static str,
        status: u16,
        body: String,
    },
    #[error("failed to {action} for project {project_ref}: malformed response: {source}")]
    Decode {
        project_ref: String,
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("wait for project {project_ref} was cancelled")]
    Cancelled { project_ref: String },
}

impl WaitError {
    /// Metric label for the outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            WaitError::Terminal { .. } => "terminal",
            WaitError::Timeout { .. } => "timeout",
            WaitError::Unhealthy { .. } => "unhealthy",
            WaitError::Transport { .. }
            | WaitError::UnexpectedStatus { .. }
            | WaitError::Decode { .. } => "transport",
            WaitError::Cancelled { .. } => "cancelled",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WaitError::Terminal { .. })
    }
}
