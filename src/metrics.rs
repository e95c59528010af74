// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for zonesync.
//!
//! All metrics use the namespace prefix `zonesync_` and are exposed by the
//! trigger server on `/metrics`.
//!
//! # Example
//!
//! ```rust,no_run
//! use zonesync::metrics::{gather_metrics, record_run_success};
//!
//! record_run_success(std::time::Duration::from_secs(1));
//! let text = gather_metrics().unwrap();
//! assert!(text.contains("zonesync_runs_total"));
//! ```

use prometheus::{CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all zonesync metrics
const METRICS_NAMESPACE: &str = "zonesync";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Run Metrics
// ============================================================================

/// Total number of pipeline runs by outcome
///
/// Labels:
/// - `status`: `success` or `error`
pub static RUNS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_runs_total"),
        "Total number of pipeline runs by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of pipeline runs in seconds
pub static RUN_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_run_duration_seconds"),
        "Duration of pipeline runs in seconds",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]);
    let histogram = Histogram::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of failed runs by failure kind
///
/// Labels:
/// - `kind`: `InventoryUnavailable`, `InvalidAddress`, `InvalidName` or `WriteFailure`
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of failed runs by failure kind",
    );
    let counter = CounterVec::new(opts, &["kind"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Record Metrics
// ============================================================================

/// Address records seen in the last successful inventory fetch
///
/// Labels:
/// - `kind`: `fetched` (all records) or `named` (records with a DNS name)
pub static INVENTORY_RECORDS: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_inventory_records"),
        "Address records returned by the last inventory fetch",
    );
    let gauge = GaugeVec::new(opts, &["kind"]).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Records written to each zone file by the last run
///
/// Labels:
/// - `zone`: zone name
pub static ZONE_RECORDS: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_zone_records"),
        "Records written to each zone file by the last run",
    );
    let gauge = GaugeVec::new(opts, &["zone"]).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful run
pub fn record_run_success(duration: Duration) {
    RUNS_TOTAL.with_label_values(&["success"]).inc();
    RUN_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record a failed run and its failure kind
pub fn record_run_error(kind: &str, duration: Duration) {
    RUNS_TOTAL.with_label_values(&["error"]).inc();
    ERRORS_TOTAL.with_label_values(&[kind]).inc();
    RUN_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record the size of an inventory fetch
#[allow(clippy::cast_precision_loss)]
pub fn record_inventory_size(fetched: usize, named: usize) {
    INVENTORY_RECORDS
        .with_label_values(&["fetched"])
        .set(fetched as f64);
    INVENTORY_RECORDS
        .with_label_values(&["named"])
        .set(named as f64);
}

/// Record how many records were written to a zone file
#[allow(clippy::cast_precision_loss)]
pub fn record_zone_written(zone: &str, records: usize) {
    ZONE_RECORDS.with_label_values(&[zone]).set(records as f64);
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
///
/// Returns an error if metrics cannot be encoded
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    // Run metrics are exported with zero values before the first run
    for status in ["success", "error"] {
        let _ = RUNS_TOTAL.with_label_values(&[status]);
    }
    LazyLock::force(&RUN_DURATION_SECONDS);

    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
