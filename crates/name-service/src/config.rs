//! # Service Configuration
//!
//! Layering, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `QC_NS_*` environment variables (resolution and telemetry)
//! 3. TOML file given with `--config`
//! 4. Command-line flags (`--rpc-url`, `--registry`, also read from
//!    `QC_NS_RPC_URL` / `QC_NS_REGISTRY`)
//!
//! ```toml
//! [rpc]
//! url = "http://127.0.0.1:8545"
//! registry = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"
//! timeout_secs = 15
//!
//! [resolution]
//! max_labels = 255
//! gateway_timeout_ms = 10000
//! max_concurrent_calls = 8
//! reverse_suffix = "addr.reverse"
//!
//! [telemetry]
//! log_level = "info"
//! json_logs = false
//! ```

use qc_18_name_resolution::ResolutionConfig;
use quantum_telemetry::TelemetryConfig;
use serde::Deserialize;
use shared_types::{Address, Name};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Registry address used when none is configured.
pub const DEFAULT_REGISTRY: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub rpc: RpcSection,
    pub resolution: ResolutionSection,
    pub telemetry: TelemetrySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RpcSection {
    pub url: Option<String>,
    pub registry: Option<Address>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionSection {
    pub max_labels: Option<usize>,
    pub gateway_timeout_ms: Option<u64>,
    pub max_concurrent_calls: Option<usize>,
    pub reverse_suffix: Option<Name>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetrySection {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl ConfigFile {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

/// JSON-RPC endpoint and registry location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub url: String,
    pub registry: Address,
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            registry: DEFAULT_REGISTRY.parse().unwrap_or_default(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub rpc: RpcConfig,
    pub resolution: ResolutionConfig,
    pub telemetry: TelemetryConfig,
}

impl ServiceConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        Self {
            rpc: RpcConfig::default(),
            resolution: ResolutionConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Overlay values present in `file`.
    #[must_use]
    pub fn merge(mut self, file: ConfigFile) -> Self {
        let ConfigFile {
            rpc,
            resolution,
            telemetry,
        } = file;

        if let Some(url) = rpc.url {
            self.rpc.url = url;
        }
        if let Some(registry) = rpc.registry {
            self.rpc.registry = registry;
        }
        if let Some(secs) = rpc.timeout_secs {
            self.rpc.timeout = Duration::from_secs(secs);
        }

        if let Some(max) = resolution.max_labels {
            self.resolution = self.resolution.with_max_labels(max);
        }
        if let Some(ms) = resolution.gateway_timeout_ms {
            self.resolution = self
                .resolution
                .with_gateway_timeout(Duration::from_millis(ms));
        }
        if let Some(calls) = resolution.max_concurrent_calls {
            self.resolution = self.resolution.with_max_concurrent_calls(calls);
        }
        if let Some(suffix) = resolution.reverse_suffix {
            self.resolution = self.resolution.with_reverse_suffix(suffix);
        }

        if let Some(level) = telemetry.log_level {
            self.telemetry = self.telemetry.with_log_level(level);
        }
        if let Some(json) = telemetry.json_logs {
            self.telemetry = self.telemetry.with_json_logs(json);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc.url.starts_with("http://") || self.rpc.url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "rpc.url must be an http(s) URL, got {:?}",
                self.rpc.url
            )));
        }
        if self.rpc.registry.is_zero() {
            return Err(ConfigError::Invalid("rpc.registry is the zero address".into()));
        }
        if self.resolution.max_labels == 0 {
            return Err(ConfigError::Invalid("resolution.max_labels must be positive".into()));
        }
        if self.resolution.gateway_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "resolution.gateway_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
