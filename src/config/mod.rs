//! # Configuration
//!
//! Client and wait configuration loaded from environment variables.
//!
//! All configuration has sensible defaults and can be overridden via environment variables.
//! Loading never fails: values that do not parse fall back to their defaults.

mod client;
mod wait;

pub use client::ClientConfig;
pub use wait::WaitConfig;

/// Load configuration from environment variables with defaults
pub fn load_config() -> (ClientConfig, WaitConfig) {
    (ClientConfig::from_env(), WaitConfig::from_env())
}

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
