//! # Controller
//!
//! Core reconciliation logic.
//!
//! - `categories` - Per-category documents and wire shapes
//! - `reconciler` - Pick, import, sensitive overlay, drift gate and the settings orchestrator
//! - `wait` - Project readiness and service health polling

pub mod categories;
pub mod reconciler;
pub mod wait;
