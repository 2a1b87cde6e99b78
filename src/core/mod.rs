//! Core logger types and traits

pub mod config;
pub mod error;
pub mod extension;
pub mod log_entry;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod timestamp;
pub mod writer;

pub use config::{
    LoggerConfig, DEFAULT_FLUSH_INTERVAL, DEFAULT_LOG_NAME, MIN_FLUSH_INTERVAL,
};
pub use error::{LoggerError, Result};
pub use extension::{CsvFields, LogExtension};
pub use log_entry::{LogEntry, Origin};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use registry::{LogQueue, LogRegistry};
pub use timestamp::TimestampFormat;
pub use writer::LogWriter;
