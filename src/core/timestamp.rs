//! Timestamp formatting utilities
//!
//! Writers render an entry's creation instant with one of these formats.
//! Entries always carry UTC; the `Legacy` layout is rendered in local time.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Layout used by the original CSV log files: `Jan 08, 25 - 10:30:45:123`
const LEGACY_LAYOUT: &str = "%b %d, %y - %H:%M:%S:%3f";

/// Timestamp format options for writers
///
/// # Examples
///
/// ```
/// use batch_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now()).unwrap();
/// assert!(timestamp.ends_with('Z'));
///
/// let broken = TimestampFormat::Custom("%Q".to_string());
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time, `Jan 08, 25 - 10:30:45:123`
    ///
    /// The layout CSV log files have always used.
    Legacy,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in UTC
    ///
    /// ```
    /// use batch_logger::core::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// Fails only for a `Custom` layout chrono cannot render.
    pub fn format(&self, datetime: &DateTime<Utc>) -> Result<String> {
        match self {
            TimestampFormat::Legacy => Ok(format_legacy(datetime)),
            TimestampFormat::Iso8601 => Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(format_str) => {
                let mut output = String::new();
                write!(output, "{}", datetime.format(format_str))
                    .map_err(|_| invalid_layout(format_str))?;
                Ok(output)
            }
        }
    }

    /// Check that a `Custom` layout only uses known strftime specifiers
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(format_str)
                if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) =>
            {
                Err(invalid_layout(format_str))
            }
            _ => Ok(()),
        }
    }

    /// Check if this is a numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}

/// Render the legacy CSV layout, which is always valid
pub(crate) fn format_legacy(datetime: &DateTime<Utc>) -> String {
    datetime
        .with_timezone(&Local)
        .format(LEGACY_LAYOUT)
        .to_string()
}

fn invalid_layout(format_str: &str) -> LoggerError {
    LoggerError::config(
        "TimestampFormat",
        format!("invalid strftime layout '{}'", format_str),
    )
}
