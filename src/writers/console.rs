//! Console writer implementation

use crate::core::{LogEntry, LogWriter, Result, TimestampFormat};
use colored::Colorize;
use std::io::Write;

/// Writer printing each entry as one line on stdout
///
/// Format: `[timestamp] [log_name] message (file:line)`.
pub struct ConsoleWriter {
    use_colors: bool,
    show_origin: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            show_origin: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Append the entry's origin to each line
    #[must_use]
    pub fn with_origin(mut self, show_origin: bool) -> Self {
        self.show_origin = show_origin;
        self
    }

    /// Set the timestamp format for this writer
    ///
    /// Rejects a `Custom` layout chrono cannot render.
    ///
    /// # Examples
    ///
    /// ```
    /// use batch_logger::writers::ConsoleWriter;
    /// use batch_logger::TimestampFormat;
    ///
    /// let writer = ConsoleWriter::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339)
    ///     .unwrap();
    /// ```
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Result<Self> {
        format.validate()?;
        self.timestamp_format = format;
        Ok(self)
    }

    fn format_line(&self, log_name: &str, entry: &LogEntry) -> Result<String> {
        let name = if self.use_colors {
            log_name.cyan().to_string()
        } else {
            log_name.to_string()
        };

        let mut line = format!(
            "[{}] [{}] {}",
            self.timestamp_format.format(entry.timestamp())?,
            name,
            entry.message()
        );

        if self.show_origin {
            let origin = entry.origin();
            line.push_str(&format!(" ({}:{})", origin.file, origin.line));
        }

        Ok(line)
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    fn write(&mut self, log_name: &str, entries: &[LogEntry]) -> Result<()> {
        let mut output = String::new();
        for entry in entries {
            output.push_str(&self.format_line(log_name, entry)?);
            output.push('\n');
        }

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
