//! Shared setup for integration tests: an in-process Management API mock and
//! a real REST client pointed at it.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::sync::Arc;
use std::time::Duration;

use mock_server::{serve_ephemeral, MockState};
use project_settings_controller::config::{ClientConfig, WaitConfig};
use project_settings_controller::controller::reconciler::SettingsReconciler;
use project_settings_controller::controller::wait::ProjectWaiter;
use project_settings_controller::model::PartialDocument;
use project_settings_controller::provider::{ManagementApi, ManagementApiClient};
use serde_json::Value;
use tokio::task::JoinHandle;

pub const PROJECT: &str = "mockproject";

pub struct Harness {
    pub mock: MockState,
    pub settings: SettingsReconciler,
    pub waiter: ProjectWaiter,
    server: JoinHandle<()>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Start a mock with [`PROJECT`] seeded and a client polling every 10ms
pub async fn start() -> Harness {
    let mock = MockState::new();
    mock.add_project(PROJECT).await;
    let (addr, server) = serve_ephemeral(mock.clone()).await.unwrap();

    let config = ClientConfig::new(format!("http://{addr}"), "sbp_integration_token");
    let client = ManagementApiClient::new(&config).unwrap();
    let api: Arc<dyn ManagementApi> = Arc::new(client);
    let wait = WaitConfig {
        poll_interval_ms: 10,
        timeout_secs: 5,
    };

    Harness {
        mock,
        settings: SettingsReconciler::new(Arc::clone(&api)),
        waiter: ProjectWaiter::new(api, &wait).with_poll_interval(Duration::from_millis(10)),
        server,
    }
}

pub fn doc(value: Value) -> PartialDocument {
    serde_json::from_value(value).unwrap()
}
