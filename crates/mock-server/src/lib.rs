//! # Management API Mock Server
//!
//! Axum server that imitates the Management API endpoints used by the
//! settings controller. Routes come from the shared `paths` crate so the mock
//! and the client agree on them.
//!
//! State lives in memory ([`MockState`]); tests seed projects, script
//! lifecycle transitions and inspect request counters through it.

pub mod handlers;
pub mod store;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use paths::management;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use store::{MockState, SettingsKind};

/// Build the router for `state`
pub fn router(state: MockState) -> Router {
    use handlers::*;

    let api = Router::new()
        .route(management::PROJECT, get(get_project))
        .route(management::SERVICES_HEALTH, get(get_services_health))
        .route(
            management::POSTGRES_CONFIG,
            get(get_postgres).put(update_postgres),
        )
        .route(management::NETWORK_RESTRICTIONS, get(get_network))
        .route(management::NETWORK_RESTRICTIONS_APPLY, post(apply_network))
        .route(
            management::POSTGREST_CONFIG,
            get(get_postgrest).patch(update_postgrest),
        )
        .route(management::AUTH_CONFIG, get(get_auth).patch(update_auth))
        .route(
            management::STORAGE_CONFIG,
            get(get_storage).patch(update_storage),
        )
        .route(
            management::POOLER_CONFIG,
            get(get_pooler).patch(update_pooler),
        )
        .layer(axum::middleware::from_fn(require_bearer));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Bind `addr` and serve in a background task
///
/// # Errors
///
/// Fails when the address cannot be bound.
pub async fn serve(state: MockState, addr: SocketAddr) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Mock server error: {}", e);
        }
    });
    info!("✅ Management API mock ready at http://{}", local_addr);
    Ok((local_addr, handle))
}

/// Serve on an ephemeral loopback port
///
/// # Errors
///
/// Fails when no loopback port can be bound.
pub async fn serve_ephemeral(state: MockState) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    serve(state, SocketAddr::from(([127, 0, 0, 1], 0))).await
}
