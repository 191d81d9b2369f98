//! # Constants
//!
//! Default values for configuration loaded from the environment.

/// Management API base URL
pub const DEFAULT_MANAGEMENT_API_URL: &str = "https://api.supabase.com";

/// Per-request timeout for Management API calls (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Interval between polls of project status or services health (milliseconds)
pub const DEFAULT_WAIT_POLL_INTERVAL_MS: u64 = 3000;

/// Overall budget for a readiness or health wait (seconds)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 300;

/// Environment variables holding the Management API access token, in lookup order
pub const ACCESS_TOKEN_ENV_VARS: [&str; 2] = ["MANAGEMENT_ACCESS_TOKEN", "SUPABASE_ACCESS_TOKEN"];

/// Default `EnvFilter` directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "project_settings_controller=info";
