//! Log entry structure

use super::extension::LogExtension;
use super::timestamp::format_legacy;
use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Quote a CSV field, doubling embedded quotes
pub(crate) fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Source location that produced an entry
///
/// Build one by hand, or let the [`origin!`](crate::origin) macro capture
/// the calling file, function and line at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub file: Cow<'static, str>,
    pub function: Cow<'static, str>,
    pub line: u32,
}

impl Origin {
    pub fn new(
        file: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }

    /// Origin with empty file and function and line 0
    pub const fn unknown() -> Self {
        Self {
            file: Cow::Borrowed(""),
            function: Cow::Borrowed(""),
            line: 0,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// One recorded log event
///
/// Entries are immutable. The timestamp is taken when the entry is created,
/// not when it is flushed.
#[derive(Debug, Clone)]
pub struct LogEntry {
    timestamp: DateTime<Utc>,
    origin: Origin,
    message: String,
    extension: Option<Arc<dyn LogExtension>>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one entry always occupies one line of output. Clean messages are
    /// returned as is.
    fn sanitize_message(message: String) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message;
        }

        let mut sanitized = String::with_capacity(message.len() + 8);
        for c in message.chars() {
            match c {
                '\n' => sanitized.push_str("\\n"),
                '\r' => sanitized.push_str("\\r"),
                '\t' => sanitized.push_str("\\t"),
                _ => sanitized.push(c),
            }
        }
        sanitized
    }

    pub fn new(message: impl Into<String>, origin: Origin) -> Self {
        Self {
            timestamp: Utc::now(),
            origin,
            message: Self::sanitize_message(message.into()),
            extension: None,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Arc<dyn LogExtension>) -> Self {
        self.extension = Some(extension);
        self
    }

    #[inline]
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    #[inline]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn extension(&self) -> Option<&dyn LogExtension> {
        self.extension.as_deref()
    }

    /// Serialize the entry as `"timestamp",line,"function","file","message"`
    ///
    /// Uses the legacy local-time timestamp layout. Extensions are not
    /// included; writers decide where their columns go.
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            csv_quote(&format_legacy(&self.timestamp)),
            self.origin.line,
            csv_quote(&self.origin.function),
            csv_quote(&self.origin.file),
            csv_quote(&self.message),
        )
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extension = match &self.extension {
            Some(ext) => Some(ext.render().map_err(S::Error::custom)?),
            None => None,
        };

        let mut state = serializer.serialize_struct("LogEntry", 6)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("file", &self.origin.file)?;
        state.serialize_field("function", &self.origin.function)?;
        state.serialize_field("line", &self.origin.line)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("extension", &extension)?;
        state.end()
    }
}
