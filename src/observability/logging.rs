//! # Logging
//!
//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_DIRECTIVE;

/// Install the fmt subscriber with an `EnvFilter`
///
/// `RUST_LOG` wins over the default `project_settings_controller=info`.
/// Returns `false` when a global subscriber was already installed, which
/// makes repeated calls from tests and embedders harmless.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.into()),
        )
        .try_init()
        .is_ok()
}
