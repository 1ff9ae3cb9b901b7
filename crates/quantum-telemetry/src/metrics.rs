//! Prometheus metrics for the name service.
//!
//! All metrics follow the naming convention: `qc_ns_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Resolutions by path and outcome
    pub static ref RESOLUTIONS: CounterVec = CounterVec::new(
        Opts::new("qc_ns_resolutions_total", "Name resolutions performed"),
        &["path", "outcome"]  // path: wire/direct, outcome: found/not_found/error
    ).expect("metric creation failed");

    /// Off-chain gateway requests
    pub static ref GATEWAY_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("qc_ns_gateway_requests_total", "Off-chain gateway requests"),
        &["outcome"]  // outcome: ok/timeout/rejected/failed
    ).expect("metric creation failed");

    /// Rejected off-chain attestations (for alerting)
    pub static ref PROOF_FAILURES: Counter = Counter::new(
        "qc_ns_proof_failures_total",
        "Off-chain attestations rejected"
    ).expect("metric creation failed");

    /// Batch slots by call kind and outcome
    pub static ref BATCH_CALLS: CounterVec = CounterVec::new(
        Opts::new("qc_ns_batch_calls_total", "Batch call slots processed"),
        &["kind", "outcome"]  // kind: universal/direct, outcome: success/empty/failed
    ).expect("metric creation failed");

    /// End-to-end resolution latency
    pub static ref RESOLUTION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "qc_ns_resolution_duration_seconds",
            "Time spent resolving a single name"
        ).buckets(exponential_buckets(0.0005, 2.0, 14).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(RESOLUTIONS.clone()),
        Box::new(GATEWAY_REQUESTS.clone()),
        Box::new(PROOF_FAILURES.clone()),
        Box::new(BATCH_CALLS.clone()),
        Box::new(RESOLUTION_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram
            .observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
