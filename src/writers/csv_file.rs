//! CSV file writer implementation
//!
//! Appends each batch to a per-log, per-day file:
//! `<directory>/<log_name>-<YYYY-MM-DD>.csv`.

use crate::core::{LogEntry, LogWriter, LoggerError, Result, TimestampFormat};
use crate::core::log_entry::csv_quote;
use chrono::Local;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writer producing one CSV line per entry
///
/// Columns: `"timestamp","message"`, then the rendered extension fragment
/// when the entry has one, then `line,"function","file"` when verbose.
pub struct CsvFileWriter {
    directory: PathBuf,
    verbose: bool,
    timestamp_format: TimestampFormat,
}

impl CsvFileWriter {
    /// Create a writer saving into `directory`, creating it if missing
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                directory.display().to_string(),
                e,
            )
        })?;

        Ok(Self {
            directory,
            verbose: true,
            timestamp_format: TimestampFormat::Legacy,
        })
    }

    /// Include or omit the origin columns (on by default)
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the timestamp format for the first column
    ///
    /// Rejects a `Custom` layout chrono cannot render.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use batch_logger::writers::CsvFileWriter;
    /// use batch_logger::TimestampFormat;
    ///
    /// let writer = CsvFileWriter::new("/var/log/app")
    ///     .and_then(|w| w.with_timestamp_format(TimestampFormat::Iso8601))
    ///     .unwrap();
    /// ```
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Result<Self> {
        format.validate()?;
        self.timestamp_format = format;
        Ok(self)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Today's file for `log_name`
    pub fn file_path(&self, log_name: &str) -> PathBuf {
        let stem: String = log_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        let date = Local::now().format("%Y-%m-%d");
        self.directory.join(format!("{}-{}.csv", stem, date))
    }

    fn format_entry(&self, entry: &LogEntry, output: &mut String) -> Result<()> {
        output.push_str(&csv_quote(&self.timestamp_format.format(entry.timestamp())?));
        output.push(',');
        output.push_str(&csv_quote(entry.message()));

        if let Some(extension) = entry.extension() {
            output.push(',');
            output.push_str(&extension.render()?);
        }

        if self.verbose {
            let origin = entry.origin();
            output.push_str(&format!(
                ",{},{},{}",
                origin.line,
                csv_quote(&origin.function),
                csv_quote(&origin.file)
            ));
        }

        output.push('\n');
        Ok(())
    }
}

impl LogWriter for CsvFileWriter {
    fn write(&mut self, log_name: &str, entries: &[LogEntry]) -> Result<()> {
        // Render everything first so a failing extension leaves the file untouched
        let mut output = String::new();
        for entry in entries {
            self.format_entry(entry, &mut output)?;
        }

        let path = self.file_path(log_name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening csv log", path.display().to_string(), e)
            })?;

        FileExt::lock_exclusive(&file)
            .map_err(|e| LoggerError::file_lock(path.display().to_string(), e))?;
        let written = file
            .write_all(output.as_bytes())
            .and_then(|()| file.flush());
        let _ = FileExt::unlock(&file);

        written.map_err(|e| {
            LoggerError::io_operation("appending csv batch", path.display().to_string(), e)
        })
    }

    fn name(&self) -> &str {
        "csv_file"
    }
}
