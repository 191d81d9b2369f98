//! Management API Mock Server
//!
//! Serves an in-memory Management API for local development.
//!
//! Environment Variables:
//! - PORT: Port to listen on (default: 1234)
//! - MOCK_PROJECTS: Comma-separated project refs to create at startup (default: mockproject)

use std::env;
use std::net::SocketAddr;

use mock_server::{serve, MockState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(1234);
    let projects = env::var("MOCK_PROJECTS").unwrap_or_else(|_| "mockproject".to_owned());

    let state = MockState::new();
    for project_ref in projects.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        state.add_project(project_ref).await;
        info!("Seeded project {}", project_ref);
    }

    let (_, handle) = serve(state, SocketAddr::from(([0, 0, 0, 0], port))).await?;
    handle.await?;
    Ok(())
}
