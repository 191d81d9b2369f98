//! # Settings Reconciler
//!
//! Resource-level lifecycle over all six categories of one project. Categories
//! run one at a time in a fixed order (database, network, api, auth, storage,
//! pooler) and the first failure stops the pass.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::category::{CategoryReconcile, CategoryReconciler, ReadOutcome};
use super::error::ReconcileError;
use crate::controller::categories::{
    ApiCategory, AuthCategory, DatabaseCategory, NetworkCategory, PoolerCategory,
    StorageCategory,
};
use crate::model::{ConfigCategory, PartialDocument};
use crate::observability::metrics;
use crate::provider::ManagementApi;

/// Durable local state: the managed declaration of each category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsState {
    pub project_ref: String,
    #[serde(default)]
    pub categories: BTreeMap<ConfigCategory, PartialDocument>,
}

impl SettingsState {
    pub fn new(project_ref: impl Into<String>) -> Self {
        Self {
            project_ref: project_ref.into(),
            categories: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: ConfigCategory, document: PartialDocument) -> Self {
        self.categories.insert(category, document);
        self
    }

    pub fn category(&self, category: ConfigCategory) -> Option<&PartialDocument> {
        self.categories.get(&category)
    }
}

/// Outcome of a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub state: SettingsState,
    /// Categories whose read found the project gone; dropped from `state`
    pub orphaned: Vec<ConfigCategory>,
}

impl RefreshReport {
    /// Every managed category was orphaned
    pub fn project_gone(&self) -> bool {
        !self.orphaned.is_empty() && self.state.categories.is_empty()
    }
}

/// Drives the category reconcilers for a whole project
#[derive(Debug)]
pub struct SettingsReconciler {
    reconcilers: Vec<Box<dyn CategoryReconcile>>,
}

impl SettingsReconciler {
    pub fn new(api: Arc<dyn ManagementApi>) -> Self {
        let reconcilers: Vec<Box<dyn CategoryReconcile>> = vec![
            Box::new(CategoryReconciler::<DatabaseCategory>::new(Arc::clone(&api))),
            Box::new(CategoryReconciler::<NetworkCategory>::new(Arc::clone(&api))),
            Box::new(CategoryReconciler::<ApiCategory>::new(Arc::clone(&api))),
            Box::new(CategoryReconciler::<AuthCategory>::new(Arc::clone(&api))),
            Box::new(CategoryReconciler::<StorageCategory>::new(Arc::clone(&api))),
            Box::new(CategoryReconciler::<PoolerCategory>::new(api)),
        ];
        Self { reconcilers }
    }

    /// Category reconciler by kind
    pub fn category(&self, category: ConfigCategory) -> Option<&dyn CategoryReconcile> {
        self.reconcilers
            .iter()
            .find(|reconciler| reconciler.category() == category)
            .map(|reconciler| &**reconciler)
    }

    /// Write every category whose plan drifted from `prior`
    ///
    /// Categories that did not drift keep their planned document without a
    /// remote call. Categories absent from `planned` are no longer managed.
    ///
    /// # Errors
    ///
    /// Stops at the first category that fails validation or whose write fails.
    pub async fn apply(
        &self,
        planned: &SettingsState,
        prior: Option<&SettingsState>,
    ) -> Result<SettingsState, ReconcileError> {
        let project_ref = planned.project_ref.as_str();
        let mut state = SettingsState::new(project_ref);

        for reconciler in &self.reconcilers {
            let category = reconciler.category();
            let Some(planned_doc) = planned.category(category) else {
                continue;
            };
            let prior_doc = prior.and_then(|prior| prior.category(category));

            let document = if reconciler.drift(Some(planned_doc), prior_doc) {
                reconciler.write_and_merge(project_ref, planned_doc).await?
            } else {
                info!(
                    "No changes to {} settings for project {}, skipping update",
                    category, project_ref
                );
                metrics::increment_writes_skipped(category.as_str());
                planned_doc.clone()
            };
            state.categories.insert(category, document);
        }

        Ok(state)
    }

    /// Re-read every managed category
    ///
    /// # Errors
    ///
    /// Stops at the first read that fails for a reason other than the project
    /// being gone.
    pub async fn refresh(&self, state: &SettingsState) -> Result<RefreshReport, ReconcileError> {
        let project_ref = state.project_ref.as_str();
        let mut refreshed = SettingsState::new(project_ref);
        let mut orphaned = Vec::new();

        for reconciler in &self.reconcilers {
            let category = reconciler.category();
            let Some(prior) = state.category(category) else {
                continue;
            };
            match reconciler.read_and_merge(project_ref, Some(prior)).await? {
                ReadOutcome::Merged(document) => {
                    refreshed.categories.insert(category, document);
                }
                ReadOutcome::Orphaned => orphaned.push(category),
            }
        }

        if !orphaned.is_empty() {
            warn!(
                "Dropped orphaned settings categories for project {}: {:?}",
                project_ref, orphaned
            );
        }
        Ok(RefreshReport {
            state: refreshed,
            orphaned,
        })
    }

    /// Adopt the current remote settings of every category
    ///
    /// # Errors
    ///
    /// Fails with [`ReconcileError::ProjectNotFound`] when every category read
    /// reports the project gone, or on the first failing read.
    pub async fn import(&self, project_ref: &str) -> Result<SettingsState, ReconcileError> {
        let mut state = SettingsState::new(project_ref);

        for reconciler in &self.reconcilers {
            if let ReadOutcome::Merged(document) =
                reconciler.read_and_merge(project_ref, None).await?
            {
                state.categories.insert(reconciler.category(), document);
            }
        }

        if state.categories.is_empty() {
            return Err(ReconcileError::ProjectNotFound {
                project_ref: project_ref.to_owned(),
            });
        }
        info!(
            "Imported {} settings categories for project {}",
            state.categories.len(),
            project_ref
        );
        Ok(state)
    }

    /// Stop managing the settings
    ///
    /// Settings are owned by the project's own lifecycle and have no remote
    /// delete, so nothing is sent.
    pub fn destroy(&self, state: &SettingsState) {
        info!(
            "Removing settings for project {} from management; remote settings are left unchanged",
            state.project_ref
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::{json, status_only, Channel, ScriptedApi};
    use serde_json::{json, Value};

    const PROJECT: &str = "abcdefghijklmnopqrst";

    fn doc(value: Value) -> PartialDocument {
        serde_json::from_value(value).unwrap()
    }

    fn reconciler(api: &Arc<ScriptedApi>) -> SettingsReconciler {
        SettingsReconciler::new(Arc::clone(api) as Arc<dyn ManagementApi>)
    }

    #[tokio::test]
    async fn test_apply_skips_categories_without_drift() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Write(ConfigCategory::Api),
            [json(200, &json!({"db_schema": "public,api", "max_rows": 500}))],
        ));
        let prior = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Auth, doc(json!({"jwt_exp": 3600})))
            .with_category(ConfigCategory::Api, doc(json!({"max_rows": 1000})));
        let planned = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Auth, doc(json!({"jwt_exp": 3600})))
            .with_category(ConfigCategory::Api, doc(json!({"max_rows": 500})));

        let state = reconciler(&api).apply(&planned, Some(&prior)).await.unwrap();

        assert_eq!(api.calls(Channel::Write(ConfigCategory::Auth)), 0);
        assert_eq!(api.calls(Channel::Write(ConfigCategory::Api)), 1);
        assert_eq!(api.total_writes(), 1);
        assert_eq!(state, planned);
    }

    #[tokio::test]
    async fn test_apply_identical_plan_issues_no_writes() {
        let api = Arc::new(ScriptedApi::new());
        let planned = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Database, doc(json!({"statement_timeout": "10s"})))
            .with_category(ConfigCategory::Network, doc(json!({"restrictions": ["0.0.0.0/0"]})));

        let state = reconciler(&api)
            .apply(&planned, Some(&planned.clone()))
            .await
            .unwrap();

        assert_eq!(api.total_writes(), 0);
        assert_eq!(state, planned);
    }

    #[tokio::test]
    async fn test_apply_emptied_declaration_is_recorded_without_write() {
        let api = Arc::new(ScriptedApi::new());
        let prior = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Auth, doc(json!({"jwt_exp": 3600})));
        let planned =
            SettingsState::new(PROJECT).with_category(ConfigCategory::Auth, doc(json!({})));

        let state = reconciler(&api).apply(&planned, Some(&prior)).await.unwrap();

        assert_eq!(api.total_writes(), 0);
        assert_eq!(state, planned);
    }

    #[tokio::test]
    async fn test_apply_stops_at_first_failure_in_order() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Write(ConfigCategory::Auth),
            [json(200, &json!({"site_url": "x"}))],
        ));
        let planned = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Network, doc(json!({"restrictions": ["10.0.0.1/32"]})))
            .with_category(ConfigCategory::Auth, doc(json!({"site_url": "x"})));

        let error = reconciler(&api).apply(&planned, None).await.unwrap_err();

        assert_eq!(error.category(), Some(ConfigCategory::Network));
        assert_eq!(api.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_refresh_drops_orphaned_categories() {
        let api = Arc::new(
            ScriptedApi::new()
                .script(Channel::Read(ConfigCategory::Auth), [status_only(404)])
                .script(
                    Channel::Read(ConfigCategory::Api),
                    [json(200, &json!({"max_rows": 1000, "db_schema": "public"}))],
                ),
        );
        let state = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Auth, doc(json!({"site_url": "x"})))
            .with_category(ConfigCategory::Api, doc(json!({"max_rows": 10})));

        let report = reconciler(&api).refresh(&state).await.unwrap();

        assert_eq!(report.orphaned, vec![ConfigCategory::Auth]);
        assert!(!report.project_gone());
        assert_eq!(
            report.state,
            SettingsState::new(PROJECT)
                .with_category(ConfigCategory::Api, doc(json!({"max_rows": 1000})))
        );
        assert_eq!(api.calls(Channel::Read(ConfigCategory::Database)), 0);
    }

    #[tokio::test]
    async fn test_refresh_reports_project_gone() {
        let api = Arc::new(
            ScriptedApi::new().script(Channel::Read(ConfigCategory::Auth), [status_only(406)]),
        );
        let state = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Auth, doc(json!({"site_url": "x"})));
        let report = reconciler(&api).refresh(&state).await.unwrap();
        assert!(report.project_gone());
    }

    #[tokio::test]
    async fn test_import_reads_every_category() {
        let mut api = ScriptedApi::new();
        for category in ConfigCategory::ALL {
            if category != ConfigCategory::Storage {
                api = api.script(Channel::Read(category), [status_only(404)]);
            }
        }
        let api = Arc::new(api.script(
            Channel::Read(ConfigCategory::Storage),
            [json(200, &json!({"fileSizeLimit": 52_428_800}))],
        ));

        let state = reconciler(&api).import(PROJECT).await.unwrap();

        for category in ConfigCategory::ALL {
            assert_eq!(api.calls(Channel::Read(category)), 1);
        }
        assert_eq!(
            state,
            SettingsState::new(PROJECT).with_category(
                ConfigCategory::Storage,
                doc(json!({"fileSizeLimit": 52_428_800}))
            )
        );
    }

    #[tokio::test]
    async fn test_import_of_missing_project_fails() {
        let mut api = ScriptedApi::new();
        for category in ConfigCategory::ALL {
            api = api.script(Channel::Read(category), [status_only(404)]);
        }
        let error = reconciler(&Arc::new(api)).import(PROJECT).await.unwrap_err();
        assert_eq!(error.to_string(), "project abcdefghijklmnopqrst not found");
    }

    #[test]
    fn test_state_serializes_categories_by_name_in_order() {
        let state = SettingsState::new(PROJECT)
            .with_category(ConfigCategory::Pooler, doc(json!({"pool_mode": "session"})))
            .with_category(ConfigCategory::Database, doc(json!({"work_mem": "4MB"})));
        let rendered = serde_json::to_string(&state).unwrap();
        assert_eq!(
            rendered,
            r#"{"project_ref":"abcdefghijklmnopqrst","categories":{"database":{"work_mem":"4MB"},"pooler":{"pool_mode":"session"}}}"#
        );
        let parsed: SettingsState = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_destroy_issues_no_calls() {
        let api = Arc::new(ScriptedApi::new());
        reconciler(&api).destroy(&SettingsState::new(PROJECT));
        assert_eq!(api.total_writes(), 0);
    }
}
