//! # State Change Waiter
//!
//! Generic poll loop shared by the project readiness and services health
//! waits. A [`StateSource`] fetches an observation and classifies it as
//! `Target`, `Pending` or `Terminal`; the waiter owns timing, cancellation
//! and metrics.
//!
//! - the first poll always happens, even with a zero timeout
//! - cancellation is checked before every poll and raced against both the
//!   in-flight observation and the sleep, dropping whichever is pending
//! - the deadline is checked before every poll after the first and raced
//!   against in-flight observations after the first; sleeps never overshoot it

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::error::WaitError;
use crate::observability::metrics;

/// Classification of one observation
#[derive(Debug)]
pub enum Verdict {
    /// Done
    Target,
    /// Keep polling; carries a description of what was seen
    Pending(String),
    /// Stop immediately with this error
    Terminal(WaitError),
}

/// A remote state polled by [`StateChangeWaiter`]
#[async_trait]
pub trait StateSource: Send + Sync {
    type Observation: Send;

    /// Metric label and log name of the waiter
    fn waiter(&self) -> &'static str;

    /// Description of the target used in timeout errors
    fn target(&self) -> &'static str;

    fn project_ref(&self) -> &str;

    /// Fetch the current state; an error ends the wait
    async fn observe(&self) -> Result<Self::Observation, WaitError>;

    fn transition(&self, observation: &Self::Observation) -> Verdict;
}

/// Summary of a successful wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitReport {
    pub polls: u32,
    pub elapsed: Duration,
}

/// Fixed-interval poller with a wall-clock deadline
#[derive(Debug, Clone)]
pub struct StateChangeWaiter {
    poll_interval: Duration,
    timeout: Duration,
    cancel: CancellationToken,
}

impl StateChangeWaiter {
    pub fn new(poll_interval: Duration, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            poll_interval,
            timeout,
            cancel,
        }
    }

    /// Poll `source` until it reaches its target
    ///
    /// # Errors
    ///
    /// Terminal verdicts, observation failures, the deadline and cancellation
    /// each end the wait with the corresponding [`WaitError`].
    pub async fn wait<S: StateSource>(&self, source: &S) -> Result<WaitReport, WaitError> {
        let waiter = source.waiter();
        let start = Instant::now();
        let deadline = start + self.timeout;
        let mut polls: u32 = 0;
        let mut last_state: Option<String> = None;

        let result = loop {
            if self.cancel.is_cancelled() {
                break Err(self.cancelled(source));
            }
            if polls > 0 && Instant::now() >= deadline {
                break Err(self.timed_out(source, last_state.take()));
            }

            polls += 1;
            metrics::increment_wait_polls(waiter);
            // The first poll runs to completion; later ones are cut off at the deadline
            let observed = if polls == 1 {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => break Err(self.cancelled(source)),
                    observed = source.observe() => observed,
                }
            } else {
                tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => break Err(self.cancelled(source)),
                    () = tokio::time::sleep_until(deadline) => {
                        break Err(self.timed_out(source, last_state.take()));
                    }
                    observed = source.observe() => observed,
                }
            };
            let observation = match observed {
                Ok(observation) => observation,
                Err(e) => break Err(e),
            };

            match source.transition(&observation) {
                Verdict::Target => {
                    break Ok(WaitReport {
                        polls,
                        elapsed: start.elapsed(),
                    })
                }
                Verdict::Terminal(e) => break Err(e),
                Verdict::Pending(state) => {
                    debug!(
                        waiter,
                        poll = polls,
                        project_ref = source.project_ref(),
                        "Still waiting: {}",
                        state
                    );
                    last_state = Some(state);
                }
            }

            let pause = self
                .poll_interval
                .min(deadline.saturating_duration_since(Instant::now()));
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break Err(self.cancelled(source)),
                () = tokio::time::sleep(pause) => {}
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        match &result {
            Ok(report) => {
                info!(
                    "✅ {} wait for project {} finished after {} poll(s)",
                    waiter,
                    source.project_ref(),
                    report.polls
                );
                metrics::record_wait_outcome(waiter, "ready", elapsed);
            }
            Err(e) => {
                error!("{} wait failed: {}", waiter, e);
                metrics::record_wait_outcome(waiter, e.outcome(), elapsed);
            }
        }
        result
    }

    fn timed_out<S: StateSource>(&self, source: &S, last_state: Option<String>) -> WaitError {
        WaitError::Timeout {
            project_ref: source.project_ref().to_owned(),
            target: source.target(),
            timeout: self.timeout,
            last_state: last_state.unwrap_or_else(|| "nothing".to_owned()),
        }
    }

    fn cancelled<S: StateSource>(&self, source: &S) -> WaitError {
        WaitError::Cancelled {
            project_ref: source.project_ref().to_owned(),
        }
    }
}
