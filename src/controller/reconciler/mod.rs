//! # Reconciler
//!
//! Partial-configuration reconciliation engine.
//!
//! - `pick` - refresh a partial document from a full remote document
//! - `import` - build a partial document on first contact
//! - `sensitive` - restore write-only fields after a merge
//! - `drift` - decide whether a category needs a write
//! - `category` - read/write paths of one category
//! - `settings` - apply/refresh/import/destroy over all categories

pub mod category;
pub mod drift;
pub mod error;
pub mod import;
pub mod pick;
pub mod sensitive;
pub mod settings;

pub use category::{mark_orphaned_if_absent, CategoryReconcile, CategoryReconciler, ReadOutcome};
pub use drift::should_write;
pub use error::{Operation, ReconcileError};
pub use settings::{RefreshReport, SettingsReconciler, SettingsState};
