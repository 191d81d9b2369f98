//! # Services Health
//!
//! Polls the batch health endpoint until every requested service reports
//! `ACTIVE_HEALTHY`.
//!
//! An `UNHEALTHY` record carries a JSON detail `{"error": "..."}`. Two
//! details are treated as "not ready yet" instead of a failure:
//!
//! - the platform could not fetch health for the service
//! - the pooler was not found, which happens while it is still provisioning
//!
//! Any other unhealthy record fails the wait on the poll that observed it.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::WaitError;
use super::machine::{StateSource, Verdict};
use crate::model::{HealthStatus, ServiceHealthRecord, ServiceName};
use crate::provider::ManagementApi;

const ACTION: &str = "retrieve services health";
const NOT_FOUND: &str = "not found";

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    error: String,
}

/// Reason attached to an `UNHEALTHY` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnhealthyCause {
    /// No detail was supplied
    UnknownReason,
    NotFound,
    /// The platform could not fetch the service health
    HealthUnavailable,
    Other(String),
}

impl UnhealthyCause {
    pub fn parse(service: &str, detail: Option<&str>) -> Self {
        let Some(detail) = detail else {
            return UnhealthyCause::UnknownReason;
        };
        match serde_json::from_str::<ErrorDetail>(detail) {
            Err(_) => UnhealthyCause::Other(detail.to_owned()),
            Ok(parsed) if parsed.error == NOT_FOUND => UnhealthyCause::NotFound,
            Ok(parsed)
                if parsed.error == format!("Failed to retrieve project's {service} service health") =>
            {
                UnhealthyCause::HealthUnavailable
            }
            Ok(parsed) => UnhealthyCause::Other(parsed.error),
        }
    }
}

impl fmt::Display for UnhealthyCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnhealthyCause::UnknownReason => f.write_str("unknown reason"),
            UnhealthyCause::NotFound => f.write_str(NOT_FOUND),
            UnhealthyCause::HealthUnavailable => {
                f.write_str("failed to retrieve health information for the service")
            }
            UnhealthyCause::Other(detail) => f.write_str(detail),
        }
    }
}

/// Classification of a single health record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Healthy,
    Pending(String),
    Failed(String),
}

pub fn classify_record(record: &ServiceHealthRecord) -> ServiceState {
    let name = record.name.as_str();
    match record.status {
        HealthStatus::ActiveHealthy => ServiceState::Healthy,
        HealthStatus::ComingUp => ServiceState::Pending(format!("{name} coming up")),
        HealthStatus::Unrecognized => ServiceState::Pending(format!("{name} in unrecognized state")),
        HealthStatus::Unhealthy => {
            let cause = UnhealthyCause::parse(name, record.error.as_deref());
            let transient = match cause {
                UnhealthyCause::HealthUnavailable => true,
                // Compatibility shim keyed on the literal detail; the pooler
                // reports "not found" until it has been allocated
                UnhealthyCause::NotFound => name == ServiceName::Pooler.as_str(),
                UnhealthyCause::UnknownReason | UnhealthyCause::Other(_) => false,
            };
            if transient {
                ServiceState::Pending(format!("{name}: {cause}"))
            } else {
                ServiceState::Failed(format!("unhealthy service {name}: {cause}"))
            }
        }
    }
}

/// Aggregate verdict over one health response
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HealthSummary {
    pub pending: Vec<String>,
    pub failures: Vec<String>,
}

impl HealthSummary {
    pub fn of(records: &[ServiceHealthRecord]) -> Self {
        let mut summary = HealthSummary::default();
        for record in records {
            match classify_record(record) {
                ServiceState::Healthy => {}
                ServiceState::Pending(state) => summary.pending.push(state),
                ServiceState::Failed(failure) => summary.failures.push(failure),
            }
        }
        summary
    }
}

pub(crate) struct ServicesHealth<'a> {
    pub(crate) api: &'a dyn ManagementApi,
    pub(crate) project_ref: &'a str,
    pub(crate) services: &'a [ServiceName],
}

#[async_trait]
impl StateSource for ServicesHealth<'_> {
    type Observation = Vec<ServiceHealthRecord>;

    fn waiter(&self) -> &'static str {
        "services"
    }

    fn target(&self) -> &'static str {
        "healthy"
    }

    fn project_ref(&self) -> &str {
        self.project_ref
    }

    async fn observe(&self) -> Result<Vec<ServiceHealthRecord>, WaitError> {
        let response = self
            .api
            .services_health(self.project_ref, self.services)
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
        serde_json::from_slice(&response.body).map_err(|source| WaitError::Decode {
            project_ref: self.project_ref.to_owned(),
            action: ACTION,
            source,
        })
    }

    fn transition(&self, records: &Vec<ServiceHealthRecord>) -> Verdict {
        let summary = HealthSummary::of(records);
        if !summary.failures.is_empty() {
            return Verdict::Terminal(WaitError::Unhealthy {
                project_ref: self.project_ref.to_owned(),
                failures: summary.failures,
            });
        }
        if summary.pending.is_empty() {
            Verdict::Target
        } else {
            Verdict::Pending(summary.pending.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: HealthStatus, error: Option<&str>) -> ServiceHealthRecord {
        ServiceHealthRecord {
            name: name.to_owned(),
            status,
            error: error.map(str::to_owned),
        }
    }

    #[test]
    fn test_parse_unhealthy_causes() {
        assert_eq!(UnhealthyCause::parse("auth", None), UnhealthyCause::UnknownReason);
        assert_eq!(
            UnhealthyCause::parse("auth", Some("<html>bad gateway</html>")),
            UnhealthyCause::Other("<html>bad gateway</html>".to_owned())
        );
        assert_eq!(
            UnhealthyCause::parse("pooler", Some(r#"{"error":"not found"}"#)),
            UnhealthyCause::NotFound
        );
        assert_eq!(
            UnhealthyCause::parse(
                "rest",
                Some(r#"{"error":"Failed to retrieve project's rest service health"}"#)
            ),
            UnhealthyCause::HealthUnavailable
        );
        // The detail must name the same service
        assert_eq!(
            UnhealthyCause::parse(
                "auth",
                Some(r#"{"error":"Failed to retrieve project's rest service health"}"#)
            ),
            UnhealthyCause::Other("Failed to retrieve project's rest service health".to_owned())
        );
    }

    #[test]
    fn test_not_found_is_transient_only_for_pooler() {
        let detail = Some(r#"{"error":"not found"}"#);
        assert!(matches!(
            classify_record(&record("pooler", HealthStatus::Unhealthy, detail)),
            ServiceState::Pending(_)
        ));
        assert_eq!(
            classify_record(&record("auth", HealthStatus::Unhealthy, detail)),
            ServiceState::Failed("unhealthy service auth: not found".to_owned())
        );
    }

    #[test]
    fn test_unavailable_health_is_transient_for_any_service() {
        let detail = Some(r#"{"error":"Failed to retrieve project's rest service health"}"#);
        assert!(matches!(
            classify_record(&record("rest", HealthStatus::Unhealthy, detail)),
            ServiceState::Pending(_)
        ));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            classify_record(&record("db", HealthStatus::Unhealthy, None)),
            ServiceState::Failed("unhealthy service db: unknown reason".to_owned())
        );
        assert_eq!(
            classify_record(&record("db", HealthStatus::Unhealthy, Some("oops"))),
            ServiceState::Failed("unhealthy service db: oops".to_owned())
        );
        assert_eq!(
            classify_record(&record(
                "db",
                HealthStatus::Unhealthy,
                Some(r#"{"error":"disk full"}"#)
            )),
            ServiceState::Failed("unhealthy service db: disk full".to_owned())
        );
    }

    #[test]
    fn test_summary_collects_every_failure() {
        let summary = HealthSummary::of(&[
            record("auth", HealthStatus::ActiveHealthy, None),
            record("rest", HealthStatus::ComingUp, None),
            record("db", HealthStatus::Unhealthy, None),
            record("storage", HealthStatus::Unhealthy, Some("crashed")),
        ]);
        assert_eq!(summary.pending, vec!["rest coming up".to_owned()]);
        assert_eq!(
            summary.failures,
            vec![
                "unhealthy service db: unknown reason".to_owned(),
                "unhealthy service storage: crashed".to_owned(),
            ]
        );
    }
}
