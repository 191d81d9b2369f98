//! # Wait Configuration
//!
//! Poll cadence and default budget for readiness and health waits.

use std::time::Duration;

use super::env_var_or_default;

/// Poller configuration
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Fixed sleep between polls (milliseconds)
    pub poll_interval_ms: u64,
    /// Budget used when the caller does not pass one (seconds)
    pub timeout_secs: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            poll_interval_ms: DEFAULT_WAIT_POLL_INTERVAL_MS,
            timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
        }
    }
}

impl WaitConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        Self {
            poll_interval_ms: env_var_or_default(
                "WAIT_POLL_INTERVAL_MS",
                DEFAULT_WAIT_POLL_INTERVAL_MS,
            ),
            timeout_secs: env_var_or_default("WAIT_TIMEOUT_SECS", DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }

    /// A zero interval falls back to the default cadence
    pub fn poll_interval(&self) -> Duration {
        match self.poll_interval_ms {
            0 => Duration::from_millis(crate::constants::DEFAULT_WAIT_POLL_INTERVAL_MS),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
