//! # Project Settings Controller
//!
//! Reconciles operator-declared, partial project settings against the
//! Management API and waits for asynchronously provisioned projects to
//! become usable.
//!
//! ## Overview
//!
//! Settings are split into six categories (database, network, api, auth,
//! storage, pooler), each read and written independently. The operator
//! declares only the fields they care about; every read is projected back
//! onto that declaration so unrelated remote fields never show up as drift.
//!
//! 1. **Pick** - project a full remote document onto the declared keys
//! 2. **Import** - on first contact, adopt every non-null remote field
//! 3. **Sensitive overlay** - restore write-only secrets from the last declaration
//! 4. **Drift gate** - skip writes whose planned document matches the prior one
//! 5. **Waits** - poll project status and service health until ready, failing
//!    fast on terminal states
//!
//! ## Usage
//!
//! Build a [`runtime::Runtime`] with [`runtime::initialize`] and drive
//! [`controller::reconciler::SettingsReconciler`] and
//! [`controller::wait::ProjectWaiter`] from it.

pub mod config;
pub mod constants;
pub mod controller;
pub mod model;
pub mod observability;
pub mod provider;
pub mod runtime;

pub use config::{ClientConfig, WaitConfig};
pub use controller::reconciler::{ReconcileError, SettingsReconciler, SettingsState};
pub use controller::wait::{ProjectWaiter, WaitError, WaitReport};
pub use model::{ConfigCategory, PartialDocument};
pub use provider::{ManagementApi, ManagementApiClient};
pub use runtime::{initialize, initialize_with, Runtime};
