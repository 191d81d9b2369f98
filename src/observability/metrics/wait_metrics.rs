//! # Wait Metrics
//!
//! Metrics for the readiness and health poll loops.

use crate::observability::metrics::registry::register;
use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec};
use std::sync::LazyLock;

static WAIT_POLLS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "settings_wait_polls_total",
            "Total number of status or health polls issued",
        ),
        &["waiter"],
    )
    .expect("Failed to create WAIT_POLLS_TOTAL metric - this should never happen")
});

static WAIT_OUTCOMES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "settings_wait_outcomes_total",
            "Total number of finished waits by outcome",
        ),
        &["waiter", "outcome"],
    )
    .expect("Failed to create WAIT_OUTCOMES_TOTAL metric - this should never happen")
});

static WAIT_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "settings_wait_duration_seconds",
            "Duration of readiness and health waits in seconds",
        )
        .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["waiter"],
    )
    .expect("Failed to create WAIT_DURATION metric - this should never happen")
});

/// Register wait metrics with the registry
pub(crate) fn register_wait_metrics() -> Result<()> {
    register(Box::new(WAIT_POLLS_TOTAL.clone()))?;
    register(Box::new(WAIT_OUTCOMES_TOTAL.clone()))?;
    register(Box::new(WAIT_DURATION.clone()))?;
    Ok(())
}

pub fn increment_wait_polls(waiter: &str) {
    WAIT_POLLS_TOTAL.with_label_values(&[waiter]).inc();
}

pub fn record_wait_outcome(waiter: &str, outcome: &str, duration: f64) {
    WAIT_OUTCOMES_TOTAL
        .with_label_values(&[waiter, outcome])
        .inc();
    WAIT_DURATION.with_label_values(&[waiter]).observe(duration);
}
