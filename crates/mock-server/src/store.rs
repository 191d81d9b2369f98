//! In-memory project store
//!
//! Holds the settings documents, lifecycle scripts and request counters for
//! every mocked project. Scripts replay in order and then repeat their last
//! entry.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use paths::ManagementOperation;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

/// Settings groups served by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKind {
    Postgres,
    Network,
    Postgrest,
    Auth,
    Storage,
    Pooler,
}

impl SettingsKind {
    pub const ALL: [SettingsKind; 6] = [
        SettingsKind::Postgres,
        SettingsKind::Network,
        SettingsKind::Postgrest,
        SettingsKind::Auth,
        SettingsKind::Storage,
        SettingsKind::Pooler,
    ];

    /// Document a freshly created project starts with
    fn initial(self) -> Value {
        match self {
            SettingsKind::Postgres | SettingsKind::Postgrest | SettingsKind::Auth => json!({}),
            SettingsKind::Network => json!({
                "dbAllowedCidrs": ["0.0.0.0/0"],
                "dbAllowedCidrsV6": ["::/0"],
            }),
            SettingsKind::Storage => json!({
                "fileSizeLimit": 52_428_800,
                "features": {
                    "imageTransformation": {"enabled": true},
                    "s3Protocol": {"enabled": true},
                },
            }),
            SettingsKind::Pooler => json!({
                "default_pool_size": 15,
                "pool_mode": "transaction",
            }),
        }
    }
}

#[derive(Debug, Clone)]
struct Script<T> {
    entries: VecDeque<T>,
}

impl<T: Clone> Script<T> {
    fn new(entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    fn next(&mut self) -> Option<T> {
        if self.entries.len() > 1 {
            self.entries.pop_front()
        } else {
            self.entries.front().cloned()
        }
    }
}

#[derive(Debug)]
struct Project {
    settings: HashMap<SettingsKind, Value>,
    statuses: Script<String>,
    health: Option<Script<Value>>,
}

impl Project {
    fn new() -> Self {
        Self {
            settings: SettingsKind::ALL
                .into_iter()
                .map(|kind| (kind, kind.initial()))
                .collect(),
            statuses: Script::new(["ACTIVE_HEALTHY".to_owned()]),
            health: None,
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    projects: HashMap<String, Project>,
    requests: HashMap<ManagementOperation, usize>,
}

/// Shared handle to the mock's state
#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<RwLock<Store>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a project that is `ACTIVE_HEALTHY` with default settings
    pub async fn add_project(&self, project_ref: &str) {
        self.inner
            .write()
            .await
            .projects
            .insert(project_ref.to_owned(), Project::new());
    }

    pub async fn remove_project(&self, project_ref: &str) {
        self.inner.write().await.projects.remove(project_ref);
    }

    pub async fn has_project(&self, project_ref: &str) -> bool {
        self.inner.read().await.projects.contains_key(project_ref)
    }

    /// Replace a stored document, bypassing write semantics
    pub async fn set_settings(&self, project_ref: &str, kind: SettingsKind, document: Value) {
        if let Some(project) = self.inner.write().await.projects.get_mut(project_ref) {
            project.settings.insert(kind, document);
        }
    }

    /// Stored document, unredacted
    pub async fn settings(&self, project_ref: &str, kind: SettingsKind) -> Option<Value> {
        self.inner
            .read()
            .await
            .projects
            .get(project_ref)
            .and_then(|project| project.settings.get(&kind).cloned())
    }

    pub async fn script_status<S: Into<String>>(
        &self,
        project_ref: &str,
        statuses: impl IntoIterator<Item = S>,
    ) {
        if let Some(project) = self.inner.write().await.projects.get_mut(project_ref) {
            project.statuses = Script::new(statuses.into_iter().map(Into::into));
        }
    }

    /// Script health responses; each entry is the full JSON array returned
    pub async fn script_health(&self, project_ref: &str, responses: impl IntoIterator<Item = Value>) {
        if let Some(project) = self.inner.write().await.projects.get_mut(project_ref) {
            project.health = Some(Script::new(responses));
        }
    }

    pub async fn request_count(&self, operation: ManagementOperation) -> usize {
        self.inner
            .read()
            .await
            .requests
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) async fn record(&self, operation: ManagementOperation) {
        *self
            .inner
            .write()
            .await
            .requests
            .entry(operation)
            .or_default() += 1;
    }

    pub(crate) async fn next_status(&self, project_ref: &str) -> Option<String> {
        let mut store = self.inner.write().await;
        let project = store.projects.get_mut(project_ref)?;
        Some(
            project
                .statuses
                .next()
                .unwrap_or_else(|| "ACTIVE_HEALTHY".to_owned()),
        )
    }

    /// Next scripted health response, or all requested services healthy
    pub(crate) async fn next_health(&self, project_ref: &str, services: &[&str]) -> Option<Value> {
        let mut store = self.inner.write().await;
        let project = store.projects.get_mut(project_ref)?;
        let scripted = project.health.as_mut().and_then(Script::next);
        Some(scripted.unwrap_or_else(|| {
            Value::Array(
                services
                    .iter()
                    .map(|name| json!({"name": name, "healthy": true, "status": "ACTIVE_HEALTHY"}))
                    .collect(),
            )
        }))
    }

    /// Merge `patch` into the stored document and return the result
    pub(crate) async fn merge_settings(
        &self,
        project_ref: &str,
        kind: SettingsKind,
        patch: Value,
    ) -> Option<Value> {
        let mut store = self.inner.write().await;
        let project = store.projects.get_mut(project_ref)?;
        let document = project
            .settings
            .entry(kind)
            .or_insert_with(|| Value::Object(Map::new()));
        merge(document, patch);
        Some(document.clone())
    }
}

/// Recursive merge of JSON objects; anything else replaces the target
pub fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge(existing, value);
                    }
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_recurses_into_objects() {
        let mut document = json!({"a": 1, "features": {"x": {"enabled": true}, "y": {"enabled": true}}});
        merge(&mut document, json!({"b": 2, "features": {"y": {"enabled": false}}}));
        assert_eq!(
            document,
            json!({"a": 1, "b": 2, "features": {"x": {"enabled": true}, "y": {"enabled": false}}})
        );
    }

    #[tokio::test]
    async fn test_status_script_repeats_last_entry() {
        let state = MockState::new();
        state.add_project("abc").await;
        state.script_status("abc", ["COMING_UP", "ACTIVE_HEALTHY"]).await;
        assert_eq!(state.next_status("abc").await.as_deref(), Some("COMING_UP"));
        assert_eq!(state.next_status("abc").await.as_deref(), Some("ACTIVE_HEALTHY"));
        assert_eq!(state.next_status("abc").await.as_deref(), Some("ACTIVE_HEALTHY"));
        assert_eq!(state.next_status("missing").await, None);
    }
}
