//! # Batch Logger
//!
//! An in-process logger for concurrent programs. Producer threads record
//! entries into per-log queues without blocking on I/O; a background timer
//! periodically drains every queue and hands each batch to a pluggable
//! [`LogWriter`].
//!
//! ## Features
//!
//! - **Non-blocking recording**: enqueueing never waits on a flush or a file
//! - **Named logs**: one FIFO queue per log name, created on first use
//! - **Timed batches**: one writer call per non-empty log per flush
//! - **Pluggable output**: CSV, JSON Lines and console writers, or your own
//!
//! ## Example
//!
//! ```no_run
//! use batch_logger::prelude::*;
//! use batch_logger::writers::CsvFileWriter;
//!
//! fn main() -> Result<()> {
//!     let logger = Logger::builder()
//!         .default_log_name("app")
//!         .flush_interval_ms(500)
//!         .writer(CsvFileWriter::new("./logs")?)
//!         .build();
//!
//!     logger.start()?;
//!     record!(logger, "service started on port {}", 8080);
//!     record_to!(logger, "audit", "user {} signed in", 42);
//!     logger.stop()
//! }
//! ```

pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        CsvFields, LogEntry, LogExtension, LogWriter, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, Origin, Result, TimestampFormat,
    };
    pub use crate::{origin, record, record_to};
}

pub use core::{
    CsvFields, LogEntry, LogExtension, LogWriter, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Origin, Result, TimestampFormat, DEFAULT_FLUSH_INTERVAL,
    DEFAULT_LOG_NAME, MIN_FLUSH_INTERVAL,
};
