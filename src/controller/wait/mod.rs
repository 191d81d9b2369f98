//! # Eventual Consistency Waits
//!
//! Project creation returns before the project is usable. [`ProjectWaiter`]
//! blocks until the project status is `ACTIVE_HEALTHY` and, separately, until
//! every sub-service reports healthy.
//!
//! ## Sub-modules
//!
//! - `machine` - Generic fixed-interval poll loop with deadline and cancellation
//! - `project` - Project status classification
//! - `health` - Service health classification
//! - `error` - Wait failures

pub mod error;
pub mod health;
pub mod machine;
pub mod project;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

use crate::config::WaitConfig;
use crate::model::ServiceName;
use crate::provider::ManagementApi;

pub use error::WaitError;
pub use health::{classify_record, HealthSummary, ServiceState, UnhealthyCause};
pub use machine::{StateChangeWaiter, StateSource, Verdict, WaitReport};
pub use project::StatusClass;

use health::ServicesHealth;
use project::ProjectReadiness;

/// Waits for a project and its services to finish provisioning
#[derive(Clone)]
pub struct ProjectWaiter {
    api: Arc<dyn ManagementApi>,
    poll_interval: Duration,
    default_timeout: Duration,
    services: Vec<ServiceName>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ProjectWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectWaiter")
            .field("poll_interval", &self.poll_interval)
            .field("default_timeout", &self.default_timeout)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

impl ProjectWaiter {
    pub fn new(api: Arc<dyn ManagementApi>, config: &WaitConfig) -> Self {
        Self {
            api,
            poll_interval: config.poll_interval(),
            default_timeout: config.timeout(),
            services: ServiceName::ALL.to_vec(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Restrict the health wait to a subset of services
    #[must_use]
    pub fn with_services(mut self, services: impl IntoIterator<Item = ServiceName>) -> Self {
        self.services = services.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts every wait started from this waiter
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Block until the project status is `ACTIVE_HEALTHY`
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::Terminal`] as soon as the project enters a state it
    /// cannot recover from, [`WaitError::Timeout`] when `timeout` elapses first,
    /// and transport errors unchanged.
    pub async fn wait_until_ready(
        &self,
        project_ref: &str,
        timeout: Duration,
    ) -> Result<WaitReport, WaitError> {
        let span = info_span!("wait.project", project_ref = project_ref);
        async move {
            info!(
                "Waiting up to {:?} for project {} to become active",
                timeout, project_ref
            );
            let source = ProjectReadiness {
                api: self.api.as_ref(),
                project_ref,
            };
            self.machine(timeout).wait(&source).await
        }
        .instrument(span)
        .await
    }

    /// Block until every configured service reports `ACTIVE_HEALTHY`
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::Unhealthy`] listing every failed service as soon as
    /// one is observed, [`WaitError::Timeout`] when `timeout` elapses first.
    pub async fn wait_until_healthy(
        &self,
        project_ref: &str,
        timeout: Duration,
    ) -> Result<WaitReport, WaitError> {
        let span = info_span!(
            "wait.services",
            project_ref = project_ref,
            services = self.services.len()
        );
        async move {
            info!(
                "Waiting up to {:?} for project {} services to become healthy",
                timeout, project_ref
            );
            let source = ServicesHealth {
                api: self.api.as_ref(),
                project_ref,
                services: &self.services,
            };
            self.machine(timeout).wait(&source).await
        }
        .instrument(span)
        .await
    }

    fn machine(&self, timeout: Duration) -> StateChangeWaiter {
        StateChangeWaiter::new(self.poll_interval, timeout, self.cancel.clone())
    }
}
