//! # Client Configuration
//!
//! Management API endpoint and credentials loaded from environment variables.

use std::time::Duration;

use zeroize::Zeroizing;

use super::env_var_or_default;

/// Management API client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Management API, without a trailing slash
    pub api_url: String,
    /// Personal access token sent as a bearer token
    pub access_token: Zeroizing<String>,
    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            api_url: DEFAULT_MANAGEMENT_API_URL.to_owned(),
            access_token: Zeroizing::new(String::new()),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        let access_token = ACCESS_TOKEN_ENV_VARS
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_default();
        Self {
            api_url: env_var_or_default("MANAGEMENT_API_URL", DEFAULT_MANAGEMENT_API_URL.to_owned()),
            access_token: Zeroizing::new(access_token.trim().to_owned()),
            request_timeout_secs: env_var_or_default(
                "MANAGEMENT_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
        }
    }

    /// Configuration pointing at an explicit endpoint, used by tests and embedders
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: Zeroizing::new(access_token.into()),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
