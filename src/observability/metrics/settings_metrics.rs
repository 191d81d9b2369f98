//! # Settings Metrics
//!
//! Metrics for category reconciliation: reads, writes, drift skips and
//! orphaned categories.

use crate::observability::metrics::registry::register;
use anyhow::Result;
use prometheus::IntCounterVec;
use std::sync::LazyLock;

static RECONCILIATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "settings_reconciliations_total",
            "Total number of category reads and writes that completed",
        ),
        &["category", "operation"],
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static WRITES_SKIPPED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "settings_writes_skipped_total",
            "Total number of category writes skipped because nothing drifted",
        ),
        &["category"],
    )
    .expect("Failed to create WRITES_SKIPPED_TOTAL metric - this should never happen")
});

static ORPHANED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "settings_orphaned_total",
            "Total number of category reads that found the project gone",
        ),
        &["category"],
    )
    .expect("Failed to create ORPHANED_TOTAL metric - this should never happen")
});

/// Register settings metrics with the registry
pub(crate) fn register_settings_metrics() -> Result<()> {
    register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    register(Box::new(WRITES_SKIPPED_TOTAL.clone()))?;
    register(Box::new(ORPHANED_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_reconciliations(category: &str, operation: &str) {
    RECONCILIATIONS_TOTAL
        .with_label_values(&[category, operation])
        .inc();
}

pub fn increment_writes_skipped(category: &str) {
    WRITES_SKIPPED_TOTAL.with_label_values(&[category]).inc();
}

pub fn increment_orphaned(category: &str) {
    ORPHANED_TOTAL.with_label_values(&[category]).inc();
}
