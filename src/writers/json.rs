//! JSON Lines writer for structured logging

use crate::core::{LogEntry, LogWriter, LoggerError, Result};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// JSON file writer for structured logging
///
/// Each log gets its own `<directory>/<log_name>.jsonl` file with one JSON
/// object per entry. Compatible with log aggregation tools like ELK, Loki,
/// etc. Files stay open between batches. A batch is serialized in full
/// before anything is written, so a failing entry leaves the file untouched.
pub struct JsonWriter {
    directory: PathBuf,
    pretty: bool,
    files: HashMap<String, File>,
}

impl JsonWriter {
    /// Create a new JSON writer saving into `directory`
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        Ok(Self {
            directory,
            pretty: false,
            files: HashMap::new(),
        })
    }

    /// Create a new JSON writer with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let mut writer = Self::new(directory)?;
        writer.pretty = true;
        Ok(writer)
    }

    pub fn file_path(&self, log_name: &str) -> PathBuf {
        let stem: String = log_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.directory.join(format!("{}.jsonl", stem))
    }

    fn file_for(&mut self, log_name: &str) -> Result<&mut File> {
        if !self.files.contains_key(log_name) {
            let path = self.file_path(log_name);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::io_operation("opening json log", path.display().to_string(), e)
                })?;
            self.files.insert(log_name.to_string(), file);
        }

        self.files
            .get_mut(log_name)
            .ok_or_else(|| LoggerError::other("json log file missing after open"))
    }
}

impl LogWriter for JsonWriter {
    fn write(&mut self, log_name: &str, entries: &[LogEntry]) -> Result<()> {
        let mut output = Vec::new();
        for entry in entries {
            if self.pretty {
                serde_json::to_writer_pretty(&mut output, entry)?;
            } else {
                serde_json::to_writer(&mut output, entry)?;
            }
            output.push(b'\n');
        }

        let path = self.file_path(log_name);
        let file = self.file_for(log_name)?;
        let written = file.write_all(&output).and_then(|()| file.flush());

        if let Err(e) = written {
            // Reopen on the next batch rather than reuse a handle in an unknown state
            self.files.remove(log_name);
            return Err(LoggerError::io_operation(
                "appending json batch",
                path.display().to_string(),
                e,
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CsvFields, LogExtension, Origin};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_json_writer() -> Result<()> {
        let dir = tempdir()?;
        let mut writer = JsonWriter::new(dir.path())?;

        let entry = LogEntry::new("User logged in", Origin::new("src/auth.rs", "auth::login", 12))
            .with_extension(Arc::new(CsvFields::new().with_field(123)));

        writer.write("auth", &[entry])?;

        let content = fs::read_to_string(writer.file_path("auth"))?;
        assert!(content.contains("User logged in"));
        assert!(content.contains("auth::login"));
        assert!(content.contains("123"));

        Ok(())
    }

    #[test]
    fn test_json_writer_multiple_batches() -> Result<()> {
        let dir = tempdir()?;
        let mut writer = JsonWriter::new(dir.path())?;

        for batch in 0..3 {
            let entries: Vec<LogEntry> = (0..5)
                .map(|i| LogEntry::new(format!("Batch {} entry {}", batch, i), Origin::unknown()))
                .collect();
            writer.write("app", &entries)?;
        }

        let content = fs::read_to_string(writer.file_path("app"))?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 15);

        // Each line should be valid JSON
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["message"].is_string());
            assert!(parsed["timestamp"].is_string());
            assert!(parsed["extension"].is_null());
        }

        Ok(())
    }

    #[test]
    fn test_failed_batch_leaves_no_partial_output() -> Result<()> {
        #[derive(Debug)]
        struct Broken;

        impl LogExtension for Broken {
            fn render(&self) -> Result<String> {
                Err(LoggerError::render("cannot render"))
            }
        }

        let dir = tempdir()?;
        let mut writer = JsonWriter::new(dir.path())?;

        let result = writer.write(
            "app",
            &[
                LogEntry::new("first", Origin::unknown()),
                LogEntry::new("second", Origin::unknown()).with_extension(Arc::new(Broken)),
            ],
        );
        assert!(matches!(result, Err(LoggerError::JsonError(_))));

        writer.write("app", &[LogEntry::new("third", Origin::unknown())])?;
        drop(writer);

        let content = fs::read_to_string(dir.path().join("app.jsonl"))?;
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(serde_json::from_str)
            .collect::<std::result::Result<_, _>>()?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], "third");
        Ok(())
    }

    #[test]
    fn test_logs_get_separate_files() -> Result<()> {
        let dir = tempdir()?;
        let mut writer = JsonWriter::new(dir.path())?;

        writer.write("a", &[LogEntry::new("to a", Origin::unknown())])?;
        writer.write("b", &[LogEntry::new("to b", Origin::unknown())])?;

        assert!(fs::read_to_string(writer.file_path("a"))?.contains("to a"));
        assert!(!fs::read_to_string(writer.file_path("b"))?.contains("to a"));
        Ok(())
    }
}
