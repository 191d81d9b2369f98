//! Settings lifecycle against the mock Management API.

mod common;

use common::{doc, start, PROJECT};
use mock_server::SettingsKind;
use paths::ManagementOperation;
use project_settings_controller::controller::reconciler::{ReconcileError, SettingsState};
use project_settings_controller::model::ConfigCategory;
use serde_json::json;

fn declared() -> SettingsState {
    SettingsState::new(PROJECT)
        .with_category(ConfigCategory::Database, doc(json!({"max_connections": 200})))
        .with_category(
            ConfigCategory::Network,
            doc(json!({"restrictions": ["8.8.8.8/32", "2001:db8::/32"]})),
        )
        .with_category(ConfigCategory::Api, doc(json!({"max_rows": 500})))
        .with_category(
            ConfigCategory::Auth,
            doc(json!({"site_url": "https://example.com", "smtp_pass": "hunter2"})),
        )
        .with_category(
            ConfigCategory::Storage,
            doc(json!({
                "fileSizeLimit": 1_048_576,
                "features": {"imageTransformation": {"enabled": false}}
            })),
        )
        .with_category(ConfigCategory::Pooler, doc(json!({"default_pool_size": 30})))
}

const WRITES: [ManagementOperation; 6] = [
    ManagementOperation::UpdatePostgresConfig,
    ManagementOperation::ApplyNetworkRestrictions,
    ManagementOperation::UpdatePostgrestConfig,
    ManagementOperation::UpdateAuthConfig,
    ManagementOperation::UpdateStorageConfig,
    ManagementOperation::UpdatePoolerConfig,
];

#[tokio::test]
async fn apply_then_refresh_is_stable() {
    let harness = start().await;
    let planned = declared();

    let applied = harness.settings.apply(&planned, None).await.unwrap();
    assert_eq!(applied, planned);
    for operation in WRITES {
        assert_eq!(harness.mock.request_count(operation).await, 1, "{operation}");
    }

    // Secrets are stored in clear text but only ever read back hashed
    let auth = harness.mock.settings(PROJECT, SettingsKind::Auth).await.unwrap();
    assert_eq!(auth["smtp_pass"], "hunter2");

    let report = harness.settings.refresh(&applied).await.unwrap();
    assert!(report.orphaned.is_empty());
    assert_eq!(report.state, applied);

    let reapplied = harness
        .settings
        .apply(&planned, Some(&report.state))
        .await
        .unwrap();
    assert_eq!(reapplied, planned);
    for operation in WRITES {
        assert_eq!(harness.mock.request_count(operation).await, 1, "{operation}");
    }
}

#[tokio::test]
async fn out_of_band_change_shows_up_as_drift() {
    let harness = start().await;
    let planned = declared();
    let applied = harness.settings.apply(&planned, None).await.unwrap();

    harness
        .mock
        .set_settings(
            PROJECT,
            SettingsKind::Postgres,
            json!({"max_connections": 100, "work_mem": "4MB"}),
        )
        .await;

    let report = harness.settings.refresh(&applied).await.unwrap();
    assert_eq!(
        report.state.category(ConfigCategory::Database),
        Some(&doc(json!({"max_connections": 100})))
    );

    harness
        .settings
        .apply(&planned, Some(&report.state))
        .await
        .unwrap();
    assert_eq!(
        harness
            .mock
            .request_count(ManagementOperation::UpdatePostgresConfig)
            .await,
        2
    );
    assert_eq!(
        harness
            .mock
            .request_count(ManagementOperation::UpdateAuthConfig)
            .await,
        1
    );
    let stored = harness
        .mock
        .settings(PROJECT, SettingsKind::Postgres)
        .await
        .unwrap();
    assert_eq!(stored["max_connections"], 200);
}

#[tokio::test]
async fn import_adopts_remote_settings() {
    let harness = start().await;

    let state = harness.settings.import(PROJECT).await.unwrap();

    assert_eq!(state.categories.len(), 6);
    assert_eq!(
        state.category(ConfigCategory::Network),
        Some(&doc(json!({"restrictions": ["0.0.0.0/0", "::/0"]})))
    );
    assert_eq!(
        state.category(ConfigCategory::Pooler),
        Some(&doc(json!({"default_pool_size": 15, "pool_mode": "transaction"})))
    );
    let storage = state.category(ConfigCategory::Storage).unwrap();
    assert_eq!(storage.get("fileSizeLimit"), Some(&json!(52_428_800)));
    assert_eq!(
        storage.get("features"),
        Some(&json!({
            "imageTransformation": {"enabled": true},
            "s3Protocol": {"enabled": true}
        }))
    );
}

#[tokio::test]
async fn import_of_unknown_project_fails() {
    let harness = start().await;
    let error = harness.settings.import("unknownproject").await.unwrap_err();
    assert!(matches!(error, ReconcileError::ProjectNotFound { .. }));
    assert_eq!(error.to_string(), "project unknownproject not found");
}

#[tokio::test]
async fn refresh_after_project_removal_orphans_everything() {
    let harness = start().await;
    let applied = harness.settings.apply(&declared(), None).await.unwrap();

    harness.mock.remove_project(PROJECT).await;
    let report = harness.settings.refresh(&applied).await.unwrap();

    assert!(report.project_gone());
    assert_eq!(report.orphaned, ConfigCategory::ALL.to_vec());
}

#[tokio::test]
async fn private_ranges_are_rejected_before_any_request() {
    let harness = start().await;
    let planned = SettingsState::new(PROJECT).with_category(
        ConfigCategory::Network,
        doc(json!({"restrictions": ["8.8.8.8/32", "10.0.0.0/8"]})),
    );

    let error = harness.settings.apply(&planned, None).await.unwrap_err();

    assert!(matches!(error, ReconcileError::Validation { .. }));
    assert!(error
        .to_string()
        .contains("private IP provided for network restrictions: 10.0.0.0/8"));
    assert_eq!(
        harness
            .mock
            .request_count(ManagementOperation::ApplyNetworkRestrictions)
            .await,
        0
    );
}
