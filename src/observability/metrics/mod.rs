//! # Metrics Module
//!
//! Prometheus metrics, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text export
//! - `settings_metrics` - Category reads, writes, drift skips and orphans
//! - `wait_metrics` - Readiness and health poll loops

pub mod registry;
pub mod settings_metrics;
pub mod wait_metrics;

pub use registry::*;
pub use settings_metrics::*;
pub use wait_metrics::*;
