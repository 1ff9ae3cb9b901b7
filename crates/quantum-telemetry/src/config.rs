//! Telemetry configuration.

use std::env;

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

/// Logging and metrics settings for the name service.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Attached to the startup log line
    pub service_name: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,

    /// Write log lines to stderr at all
    pub console_output: bool,

    /// JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Register the Prometheus collectors
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "qc-name-service".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Defaults overlaid with:
    ///
    /// - `QC_NS_SERVICE_NAME`
    /// - `QC_NS_LOG_LEVEL`
    /// - `QC_NS_CONSOLE_OUTPUT`
    /// - `QC_NS_JSON_LOGS` (defaults on inside containers)
    /// - `QC_NS_METRICS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let in_container = env::var_os("KUBERNETES_SERVICE_HOST").is_some()
            || env::var_os("DOCKER_CONTAINER").is_some();

        Self {
            service_name: env::var("QC_NS_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: env::var("QC_NS_LOG_LEVEL").unwrap_or(defaults.log_level),
            console_output: env_flag("QC_NS_CONSOLE_OUTPUT").unwrap_or(defaults.console_output),
            json_logs: env_flag("QC_NS_JSON_LOGS").unwrap_or(in_container),
            metrics_enabled: env_flag("QC_NS_METRICS").unwrap_or(defaults.metrics_enabled),
        }
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }
}
