//! # Project Lifecycle and Service Health
//!
//! Wire types for the project status endpoint and the batch services health
//! endpoint. Project statuses are a closed enum with one catch-all variant for
//! strings this crate does not know yet, so classification stays an exhaustive
//! match (see `controller::wait::project`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Remote lifecycle state of a project
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    ActiveHealthy,
    ActiveUnhealthy,
    ComingUp,
    GoingDown,
    InitFailed,
    Removed,
    Restoring,
    Upgrading,
    Pausing,
    PauseFailed,
    RestoreFailed,
    Resizing,
    Restarting,
    Inactive,
    Unknown,
    /// A status string introduced remotely after this crate was built
    Unrecognized(String),
}

impl ProjectStatus {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "ACTIVE_HEALTHY" => ProjectStatus::ActiveHealthy,
            "ACTIVE_UNHEALTHY" => ProjectStatus::ActiveUnhealthy,
            "COMING_UP" => ProjectStatus::ComingUp,
            "GOING_DOWN" => ProjectStatus::GoingDown,
            "INIT_FAILED" => ProjectStatus::InitFailed,
            "REMOVED" => ProjectStatus::Removed,
            "RESTORING" => ProjectStatus::Restoring,
            "UPGRADING" => ProjectStatus::Upgrading,
            "PAUSING" => ProjectStatus::Pausing,
            "PAUSE_FAILED" => ProjectStatus::PauseFailed,
            "RESTORE_FAILED" => ProjectStatus::RestoreFailed,
            "RESIZING" => ProjectStatus::Resizing,
            "RESTARTING" => ProjectStatus::Restarting,
            "INACTIVE" => ProjectStatus::Inactive,
            "UNKNOWN" => ProjectStatus::Unknown,
            other => ProjectStatus::Unrecognized(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::ActiveHealthy => "ACTIVE_HEALTHY",
            ProjectStatus::ActiveUnhealthy => "ACTIVE_UNHEALTHY",
            ProjectStatus::ComingUp => "COMING_UP",
            ProjectStatus::GoingDown => "GOING_DOWN",
            ProjectStatus::InitFailed => "INIT_FAILED",
            ProjectStatus::Removed => "REMOVED",
            ProjectStatus::Restoring => "RESTORING",
            ProjectStatus::Upgrading => "UPGRADING",
            ProjectStatus::Pausing => "PAUSING",
            ProjectStatus::PauseFailed => "PAUSE_FAILED",
            ProjectStatus::RestoreFailed => "RESTORE_FAILED",
            ProjectStatus::Resizing => "RESIZING",
            ProjectStatus::Restarting => "RESTARTING",
            ProjectStatus::Inactive => "INACTIVE",
            ProjectStatus::Unknown => "UNKNOWN",
            ProjectStatus::Unrecognized(status) => status,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(ProjectStatus::from_wire(&status))
    }
}

/// Body of `GET /v1/projects/{ref}`; only the status is consumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub status: ProjectStatus,
}

/// Health of a single sub-service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "ACTIVE_HEALTHY")]
    ActiveHealthy,
    #[serde(rename = "COMING_UP")]
    ComingUp,
    #[serde(rename = "UNHEALTHY")]
    Unhealthy,
    /// Anything else the health endpoint starts returning
    #[serde(other)]
    Unrecognized,
}

/// Sub-services whose health gates a provisioning operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceName {
    Auth,
    Db,
    DbPostgresUser,
    PgBouncer,
    Pooler,
    Realtime,
    Rest,
    Storage,
}

impl ServiceName {
    pub const ALL: [ServiceName; 8] = [
        ServiceName::Auth,
        ServiceName::Db,
        ServiceName::DbPostgresUser,
        ServiceName::PgBouncer,
        ServiceName::Pooler,
        ServiceName::Realtime,
        ServiceName::Rest,
        ServiceName::Storage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceName::Auth => "auth",
            ServiceName::Db => "db",
            ServiceName::DbPostgresUser => "db_postgres_user",
            ServiceName::PgBouncer => "pg_bouncer",
            ServiceName::Pooler => "pooler",
            ServiceName::Realtime => "realtime",
            ServiceName::Rest => "rest",
            ServiceName::Storage => "storage",
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the batch health response
///
/// `name` stays a string: the endpoint may report services outside
/// `ServiceName`. `error` is a JSON-encoded `{"error": "..."}` detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealthRecord {
    pub name: String,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
