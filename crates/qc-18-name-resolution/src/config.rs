//! Resolution limits and timeouts.

use shared_types::{Name, MAX_LABEL_LEN};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Tunables for the resolution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Longest name (in labels) the authority walk accepts.
    pub max_labels: usize,

    /// Budget for each gateway URL before moving to the next one.
    pub gateway_timeout: Duration,

    /// Batch slots executed concurrently. Results keep input order regardless.
    pub max_concurrent_calls: usize,

    /// Namespace holding reverse records.
    pub reverse_suffix: Name,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_labels: MAX_LABEL_LEN,
            gateway_timeout: Duration::from_secs(10),
            max_concurrent_calls: 8,
            reverse_suffix: Name::default_reverse_suffix(),
        }
    }
}

impl ResolutionConfig {
    /// Create configuration from environment variables.
    ///
    /// - `QC_NS_MAX_LABELS`: label bound for the authority walk (default: 255)
    /// - `QC_NS_GATEWAY_TIMEOUT_MS`: per-URL gateway timeout (default: 10000)
    /// - `QC_NS_MAX_CONCURRENT_CALLS`: batch concurrency (default: 8)
    /// - `QC_NS_REVERSE_SUFFIX`: reverse namespace (default: addr.reverse)
    ///
    /// Unparseable values are logged and fall back to the default. Values
    /// go through the builders, so their bounds apply.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        defaults
            .clone()
            .with_max_labels(env_parse("QC_NS_MAX_LABELS").unwrap_or(defaults.max_labels))
            .with_gateway_timeout(
                env_parse("QC_NS_GATEWAY_TIMEOUT_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.gateway_timeout),
            )
            .with_max_concurrent_calls(
                env_parse("QC_NS_MAX_CONCURRENT_CALLS").unwrap_or(defaults.max_concurrent_calls),
            )
            .with_reverse_suffix(
                env_parse("QC_NS_REVERSE_SUFFIX").unwrap_or(defaults.reverse_suffix),
            )
    }

    /// Set the label bound. Capped at [`MAX_LABEL_LEN`].
    #[must_use]
    pub fn with_max_labels(mut self, max_labels: usize) -> Self {
        self.max_labels = max_labels.min(MAX_LABEL_LEN);
        self
    }

    #[must_use]
    pub fn with_gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = timeout;
        self
    }

    /// Set batch concurrency. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrent_calls(mut self, calls: usize) -> Self {
        self.max_concurrent_calls = calls.max(1);
        self
    }

    #[must_use]
    pub fn with_reverse_suffix(mut self, suffix: Name) -> Self {
        self.reverse_suffix = suffix;
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| parse_setting(key, &raw))
}

fn parse_setting<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = raw, "Ignoring unparseable setting, using default");
    }
    parsed
}
