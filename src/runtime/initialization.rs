//! # Initialization
//!
//! Controller initialization logic including rustls setup, tracing, metrics
//! registration and Management API client setup.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{load_config, ClientConfig, WaitConfig};
use crate::controller::reconciler::SettingsReconciler;
use crate::controller::wait::ProjectWaiter;
use crate::observability;
use crate::provider::{ManagementApi, ManagementApiClient};

/// Everything needed to reconcile settings and wait on projects
#[derive(Debug)]
pub struct Runtime {
    pub settings: SettingsReconciler,
    pub waiter: ProjectWaiter,
    pub wait_config: WaitConfig,
}

/// Initialize from environment variables
///
/// # Errors
///
/// Fails when metrics cannot be registered or the client cannot be built
/// (for example, no access token is configured).
pub fn initialize() -> Result<Runtime> {
    let (client_config, wait_config) = load_config();
    initialize_with(&client_config, wait_config)
}

/// Initialize with explicit configuration
///
/// Handles:
/// - rustls crypto provider setup
/// - tracing subscriber setup
/// - metrics registration
/// - Management API client creation
///
/// # Errors
///
/// Same as [`initialize`].
pub fn initialize_with(client_config: &ClientConfig, wait_config: WaitConfig) -> Result<Runtime> {
    // Must run before any rustls client is built
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    observability::init_tracing();
    observability::metrics::register_metrics().context("Failed to register metrics")?;

    let client = ManagementApiClient::new(client_config)
        .context("Failed to create Management API client")?;
    info!(
        "Starting Project Settings Controller v{} against {}",
        env!("CARGO_PKG_VERSION"),
        client.base_url()
    );

    let api: Arc<dyn ManagementApi> = Arc::new(client);
    Ok(Runtime {
        settings: SettingsReconciler::new(Arc::clone(&api)),
        waiter: ProjectWaiter::new(api, &wait_config),
        wait_config,
    })
}
