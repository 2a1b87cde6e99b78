//! Serializable logger configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Name used when no default log name (or a blank one) is given
pub const DEFAULT_LOG_NAME: &str = "default";

/// Flush period used when none is configured (1 second)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest allowed flush period; shorter requests are raised to this
pub const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(100);

/// Logger settings that can be loaded from a config file
///
/// Missing fields take their defaults, so an empty document is valid.
///
/// # Example
///
/// ```
/// use batch_logger::LoggerConfig;
///
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{ "default_log_name": "app", "flush_interval_ms": 250 }"#).unwrap();
/// assert_eq!(config.default_log_name, "app");
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Log that `record` writes to
    pub default_log_name: String,

    /// Requested flush period in milliseconds, clamped to at least 100
    pub flush_interval_ms: u64,

    /// Set to false to turn every logger operation into a no-op
    pub enabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_log_name: DEFAULT_LOG_NAME.to_string(),
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL.as_millis() as u64,
            enabled: true,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The flush period the logger will actually use
    pub fn effective_flush_interval(&self) -> Duration {
        clamp_flush_interval(Duration::from_millis(self.flush_interval_ms))
    }
}

/// Raise `requested` to [`MIN_FLUSH_INTERVAL`] if it is shorter
#[inline]
pub fn clamp_flush_interval(requested: Duration) -> Duration {
    requested.max(MIN_FLUSH_INTERVAL)
}

/// Resolve a possibly blank log name to a usable one
#[inline]
pub(crate) fn resolve_log_name<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    if name.trim().is_empty() {
        fallback
    } else {
        name
    }
}
