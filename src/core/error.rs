//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A writer failed to persist a batch
    #[error("Failed to write batch for log '{log_name}': {message}")]
    WriteFailed { log_name: String, message: String },

    /// An entry extension could not be rendered
    #[error("Extension render failed: {0}")]
    RenderFailed(String),

    /// A writer panicked while persisting a batch
    #[error("Writer '{writer}' panicked: {message}")]
    WriterPanicked { writer: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileLockError {
            path: path.into(),
            source,
        }
    }

    /// Create a batch write failure for the given log
    pub fn write_failed(log_name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WriteFailed {
            log_name: log_name.into(),
            message: message.into(),
        }
    }

    /// Create an extension render error
    pub fn render<S: Into<String>>(msg: S) -> Self {
        LoggerError::RenderFailed(msg.into())
    }

    /// Create a writer panic error
    pub fn writer_panicked(writer: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WriterPanicked {
            writer: writer.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
