//! # Quantum Telemetry
//!
//! Observability for the Quantum-Chain name service.
//!
//! ## Components
//!
//! - Structured logging through `tracing-subscriber` (pretty or JSON)
//! - Prometheus metrics for resolutions, gateway round trips, proof checks
//!   and batch slots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | - | Overrides the configured level |
//! | `QC_NS_SERVICE_NAME` | `qc-name-service` | Service name in logs |
//! | `QC_NS_LOG_LEVEL` | `info` | Log level filter |
//! | `QC_NS_JSON_LOGS` | `false` | Emit JSON lines |
//! | `QC_NS_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |
//! | `QC_NS_METRICS` | `true` | Register Prometheus collectors |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BATCH_CALLS, GATEWAY_REQUESTS,
    PROOF_FAILURES, RESOLUTIONS, RESOLUTION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and, when enabled, register metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };
    init_logging(&config)?;

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Shutting down telemetry");
    }
}
