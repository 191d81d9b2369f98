//! # Category Reconciler
//!
//! Read and write paths for one settings category.
//!
//! Read: fetch the full document, report `Orphaned` on 404/406, otherwise
//! pick into the prior declaration (or copy everything on import) and restore
//! write-only fields.
//!
//! Write: decode the declaration into the typed write shape (unknown fields
//! rejected), validate, submit, then pick the echoed document back into the
//! declaration and restore write-only fields.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, info_span, warn, Instrument};

use super::error::{Operation, ReconcileError};
use super::{drift, import, pick, sensitive};
use crate::controller::categories::Category;
use crate::model::{ConfigCategory, FieldRegistry, PartialDocument};
use crate::observability::metrics;
use crate::provider::{ApiResponse, ManagementApi};

/// HTTP statuses meaning the parent project no longer exists
const ORPHAN_STATUSES: [u16; 2] = [404, 406];

/// Result of a category read
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// Refreshed declaration
    Merged(PartialDocument),
    /// The project is gone; drop the category from state
    Orphaned,
}

/// Whether a read response means the category's project is gone
pub fn mark_orphaned_if_absent(response: &ApiResponse) -> bool {
    ORPHAN_STATUSES.contains(&response.status)
}

/// Object-safe view of a category reconciler
#[async_trait]
pub trait CategoryReconcile: Send + Sync + std::fmt::Debug {
    fn category(&self) -> ConfigCategory;

    /// Read the remote document and merge it into `prior`
    ///
    /// With no prior declaration every set remote field is imported.
    async fn read_and_merge(
        &self,
        project_ref: &str,
        prior: Option<&PartialDocument>,
    ) -> Result<ReadOutcome, ReconcileError>;

    /// Write `planned` and return it refreshed from the echoed document
    async fn write_and_merge(
        &self,
        project_ref: &str,
        planned: &PartialDocument,
    ) -> Result<PartialDocument, ReconcileError>;

    fn drift(&self, planned: Option<&PartialDocument>, prior: Option<&PartialDocument>) -> bool {
        drift::should_write(planned, prior)
    }

    fn mark_orphaned_if_absent(&self, response: &ApiResponse) -> bool {
        mark_orphaned_if_absent(response)
    }
}

/// Reconciler for category `C`
pub struct CategoryReconciler<C> {
    api: Arc<dyn ManagementApi>,
    _category: PhantomData<fn() -> C>,
}

impl<C: Category> CategoryReconciler<C> {
    pub fn new(api: Arc<dyn ManagementApi>) -> Self {
        Self {
            api,
            _category: PhantomData,
        }
    }

    fn merge(
        full: &C::Document,
        declared: Option<&PartialDocument>,
    ) -> Result<PartialDocument, serde_json::Error> {
        let Some(declared) = declared else {
            return import::copy(full);
        };
        let mut merged = pick::pick(full, declared)?;
        sensitive::overlay::<C::Document>(&mut merged, declared);
        Ok(merged)
    }
}

impl<C> std::fmt::Debug for CategoryReconciler<C>
where
    C: Category,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryReconciler")
            .field("category", &C::KIND)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: Category> CategoryReconcile for CategoryReconciler<C> {
    fn category(&self) -> ConfigCategory {
        C::KIND
    }

    async fn read_and_merge(
        &self,
        project_ref: &str,
        prior: Option<&PartialDocument>,
    ) -> Result<ReadOutcome, ReconcileError> {
        let category = C::KIND;
        let operation = Operation::Read;
        let span = info_span!(
            "settings.read",
            project_ref = project_ref,
            category = category.as_str()
        );

        async move {
            let response = self
                .api
                .read_settings(project_ref, category)
                .await
                .map_err(|source| ReconcileError::Transport {
                    operation,
                    category,
                    project_ref: project_ref.to_owned(),
                    source,
                })?;

            if self.mark_orphaned_if_absent(&response) {
                warn!(
                    "Project {} not found while reading {} settings (status {}), treating as orphaned",
                    project_ref, category, response.status
                );
                metrics::increment_orphaned(category.as_str());
                return Ok(ReadOutcome::Orphaned);
            }
            if !response.is_success() {
                return Err(ReconcileError::UnexpectedStatus {
                    operation,
                    category,
                    project_ref: project_ref.to_owned(),
                    status: response.status,
                    body: response.body_text(),
                });
            }

            let decode_error = |source| ReconcileError::Decode {
                operation,
                category,
                project_ref: project_ref.to_owned(),
                source,
            };
            let full = C::decode_read(&response.body).map_err(decode_error)?;
            let merged = Self::merge(&full, prior).map_err(decode_error)?;

            debug!(
                fields = merged.len(),
                imported = prior.is_none(),
                "Merged remote {} settings",
                category
            );
            metrics::increment_reconciliations(category.as_str(), operation.as_str());
            Ok(ReadOutcome::Merged(merged))
        }
        .instrument(span)
        .await
    }

    async fn write_and_merge(
        &self,
        project_ref: &str,
        planned: &PartialDocument,
    ) -> Result<PartialDocument, ReconcileError> {
        let category = C::KIND;
        let operation = Operation::Write;
        let span = info_span!(
            "settings.write",
            project_ref = project_ref,
            category = category.as_str()
        );

        async move {
            let typed = C::Document::from_partial(planned)
                .map_err(|source| ReconcileError::Declaration { category, source })?;
            let body = C::encode_write(&typed).map_err(|source| ReconcileError::Validation {
                category,
                project_ref: project_ref.to_owned(),
                source,
            })?;

            let response = self
                .api
                .write_settings(project_ref, category, &body)
                .await
                .map_err(|source| ReconcileError::Transport {
                    operation,
                    category,
                    project_ref: project_ref.to_owned(),
                    source,
                })?;
            if !response.is_success() {
                return Err(ReconcileError::UnexpectedStatus {
                    operation,
                    category,
                    project_ref: project_ref.to_owned(),
                    status: response.status,
                    body: response.body_text(),
                });
            }

            let decode_error = |source| ReconcileError::Decode {
                operation,
                category,
                project_ref: project_ref.to_owned(),
                source,
            };
            let echo = C::decode_echo(&response.body, &typed).map_err(decode_error)?;
            let merged = Self::merge(&echo, Some(planned)).map_err(decode_error)?;

            let fields: Vec<&str> = planned.keys().map(String::as_str).collect();
            info!(
                "Updated {} settings for project {} (fields: {})",
                category,
                project_ref,
                fields.join(", ")
            );
            metrics::increment_reconciliations(category.as_str(), operation.as_str());
            Ok(merged)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::categories::{AuthCategory, NetworkCategory, PoolerCategory};
    use crate::provider::testing::{json, status_only, Channel, Reply, ScriptedApi};
    use serde_json::{json, Value};

    const PROJECT: &str = "abcdefghijklmnopqrst";

    fn doc(value: Value) -> PartialDocument {
        serde_json::from_value(value).unwrap()
    }

    fn auth(api: &Arc<ScriptedApi>) -> CategoryReconciler<AuthCategory> {
        CategoryReconciler::new(Arc::clone(api) as Arc<dyn ManagementApi>)
    }

    #[tokio::test]
    async fn test_read_orphaned_on_not_found_and_not_acceptable() {
        for status in [404, 406] {
            let api = Arc::new(
                ScriptedApi::new().script(Channel::Read(ConfigCategory::Auth), [status_only(status)]),
            );
            let outcome = auth(&api)
                .read_and_merge(PROJECT, Some(&doc(json!({"site_url": "x"}))))
                .await
                .unwrap();
            assert_eq!(outcome, ReadOutcome::Orphaned);
        }
    }

    #[tokio::test]
    async fn test_read_unexpected_status_is_error() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Read(ConfigCategory::Auth),
            [Reply::Respond(ApiResponse::new(500, "upstream exploded"))],
        ));
        let error = auth(&api).read_and_merge(PROJECT, None).await.unwrap_err();
        assert!(matches!(
            error,
            ReconcileError::UnexpectedStatus { status: 500, .. }
        ));
        assert!(error.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_read_transport_failure_names_operation_and_category() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Read(ConfigCategory::Auth),
            [Reply::Fail("connection reset by peer")],
        ));
        let error = auth(&api).read_and_merge(PROJECT, None).await.unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("unable to read auth settings for project abcdefghijklmnopqrst"));
        assert!(message.contains("connection reset by peer"));
    }

    #[tokio::test]
    async fn test_read_imports_without_prior() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Read(ConfigCategory::Auth),
            [json(200, &json!({"site_url": "http://localhost:3000", "jwt_exp": 3600, "smtp_pass": null}))],
        ));
        let outcome = auth(&api).read_and_merge(PROJECT, None).await.unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Merged(doc(json!({"site_url": "http://localhost:3000", "jwt_exp": 3600})))
        );
    }

    #[tokio::test]
    async fn test_sensitive_value_survives_write_then_reads() {
        let remote = json!({"site_url": "https://example.com", "smtp_pass": null});
        let api = Arc::new(
            ScriptedApi::new()
                .script(Channel::Write(ConfigCategory::Auth), [json(200, &remote)])
                .script(Channel::Read(ConfigCategory::Auth), [json(200, &remote)]),
        );
        let reconciler = auth(&api);

        let planned = doc(json!({"site_url": "https://example.com", "smtp_pass": "hunter2"}));
        let mut state = reconciler.write_and_merge(PROJECT, &planned).await.unwrap();
        assert_eq!(state.get("smtp_pass"), Some(&json!("hunter2")));

        for _ in 0..3 {
            match reconciler.read_and_merge(PROJECT, Some(&state)).await.unwrap() {
                ReadOutcome::Merged(merged) => state = merged,
                ReadOutcome::Orphaned => panic!("Expected merged document"),
            }
            assert_eq!(state.get("smtp_pass"), Some(&json!("hunter2")));
        }
        assert_eq!(api.calls(Channel::Read(ConfigCategory::Auth)), 3);
    }

    #[tokio::test]
    async fn test_write_rejects_unknown_field_without_calling_api() {
        let api = Arc::new(ScriptedApi::new());
        let error = auth(&api)
            .write_and_merge(PROJECT, &doc(json!({"site_url": "x", "jwt_expiry": 1})))
            .await
            .unwrap_err();
        assert!(matches!(error, ReconcileError::Declaration { .. }));
        assert_eq!(api.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_private_cidr_rejected_before_write() {
        let api = Arc::new(ScriptedApi::new());
        let network: CategoryReconciler<NetworkCategory> =
            CategoryReconciler::new(Arc::clone(&api) as Arc<dyn ManagementApi>);
        let error = network
            .write_and_merge(
                PROJECT,
                &doc(json!({"restrictions": ["203.0.113.1/32", "10.0.0.1/32"]})),
            )
            .await
            .unwrap_err();
        assert!(matches!(error, ReconcileError::Validation { .. }));
        assert_eq!(api.calls(Channel::Write(ConfigCategory::Network)), 0);
    }

    #[tokio::test]
    async fn test_network_write_sends_split_lists() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Write(ConfigCategory::Network),
            [json(201, &json!({"config": {"dbAllowedCidrs": [], "dbAllowedCidrsV6": []}, "status": "stored"}))],
        ));
        let network: CategoryReconciler<NetworkCategory> =
            CategoryReconciler::new(Arc::clone(&api) as Arc<dyn ManagementApi>);
        let planned = doc(json!({"restrictions": ["203.0.113.1/32", "::/0"]}));
        let merged = network.write_and_merge(PROJECT, &planned).await.unwrap();

        assert_eq!(merged, planned);
        assert_eq!(
            api.written(),
            vec![(
                ConfigCategory::Network,
                json!({"dbAllowedCidrs": ["203.0.113.1/32"], "dbAllowedCidrsV6": ["::/0"]})
            )]
        );
    }

    #[tokio::test]
    async fn test_pooler_read_uses_primary_entry() {
        let api = Arc::new(ScriptedApi::new().script(
            Channel::Read(ConfigCategory::Pooler),
            [json(200, &json!([{"database_type": "PRIMARY", "default_pool_size": 15, "pool_mode": "transaction"}]))],
        ));
        let pooler: CategoryReconciler<PoolerCategory> =
            CategoryReconciler::new(Arc::clone(&api) as Arc<dyn ManagementApi>);
        let outcome = pooler
            .read_and_merge(PROJECT, Some(&doc(json!({"pool_mode": "session"}))))
            .await
            .unwrap();
        assert_eq!(outcome, ReadOutcome::Merged(doc(json!({"pool_mode": "transaction"}))));
    }

    #[test]
    fn test_orphan_statuses() {
        assert!(mark_orphaned_if_absent(&ApiResponse::new(404, "")));
        assert!(mark_orphaned_if_absent(&ApiResponse::new(406, "")));
        assert!(!mark_orphaned_if_absent(&ApiResponse::new(403, "")));
        assert!(!mark_orphaned_if_absent(&ApiResponse::new(200, "")));
    }
}
