//! # Project Readiness
//!
//! Polls the project status until it reports `ACTIVE_HEALTHY`.

use async_trait::async_trait;

use super::error::WaitError;
use super::machine::{StateSource, Verdict};
use crate::model::{ProjectResponse, ProjectStatus};
use crate::provider::ManagementApi;

const ACTION: &str = "retrieve project status";

/// Where a project status sits relative to readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Target,
    Pending,
    Terminal,
}

impl StatusClass {
    pub fn of(status: &ProjectStatus) -> Self {
        match status {
            ProjectStatus::ActiveHealthy => StatusClass::Target,
            ProjectStatus::GoingDown
            | ProjectStatus::InitFailed
            | ProjectStatus::Removed
            | ProjectStatus::Inactive
            | ProjectStatus::PauseFailed
            | ProjectStatus::RestoreFailed => StatusClass::Terminal,
            ProjectStatus::ActiveUnhealthy
            | ProjectStatus::ComingUp
            | ProjectStatus::Restoring
            | ProjectStatus::Upgrading
            | ProjectStatus::Pausing
            | ProjectStatus::Resizing
            | ProjectStatus::Restarting
            | ProjectStatus::Unknown => StatusClass::Pending,
            // New remote states are waited on rather than failed
            ProjectStatus::Unrecognized(_) => StatusClass::Pending,
        }
    }
}

pub(crate) struct ProjectReadiness<'a> {
    pub(crate) api: &'a dyn ManagementApi,
    pub(crate) project_ref: &'a str,
}

#[async_trait]
impl StateSource for ProjectReadiness<'_> {
    type Observation = ProjectStatus;

    fn waiter(&self) -> &'static str {
        "project"
    }

    fn target(&self) -> &'static str {
        "active"
    }

    fn project_ref(&self) -> &str {
        self.project_ref
    }

    async fn observe(&self) -> Result<ProjectStatus, WaitError> {
        let response = self
            .api
            .project_status(self.project_ref)
            .await
            .map_err(|source| WaitError::Transport {
                project_ref: self.project_ref.to_owned(),
                action: ACTION,
                source,
            })?;
        if !response.is_success() {
            return Err(WaitError::UnexpectedStatus {
                project_ref: self.project_ref.to_owned(),
                action: ACTION,
                status: response.status,
                body: response.body_text(),
            });
        }
        let project: ProjectResponse =
            serde_json::from_slice(&response.body).map_err(|source| WaitError::Decode {
                project_ref: self.project_ref.to_owned(),
                action: ACTION,
                source,
            })?;
        Ok(project.status)
    }

    fn transition(&self, status: &ProjectStatus) -> Verdict {
        match StatusClass::of(status) {
            StatusClass::Target => Verdict::Target,
            StatusClass::Pending => Verdict::Pending(status.to_string()),
            StatusClass::Terminal => Verdict::Terminal(WaitError::Terminal {
                project_ref: self.project_ref.to_owned(),
                status: status.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert_eq!(StatusClass::of(&ProjectStatus::ActiveHealthy), StatusClass::Target);
        for terminal in [
            ProjectStatus::GoingDown,
            ProjectStatus::InitFailed,
            ProjectStatus::Removed,
            ProjectStatus::Inactive,
            ProjectStatus::PauseFailed,
            ProjectStatus::RestoreFailed,
        ] {
            assert_eq!(StatusClass::of(&terminal), StatusClass::Terminal, "{terminal}");
        }
        for pending in [
            ProjectStatus::ComingUp,
            ProjectStatus::ActiveUnhealthy,
            ProjectStatus::Restoring,
            ProjectStatus::Unknown,
            ProjectStatus::from_wire("BRAND_NEW_STATE"),
        ] {
            assert_eq!(StatusClass::of(&pending), StatusClass::Pending, "{pending}");
        }
    }
}
