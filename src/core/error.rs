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

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Level-signal listener could not be started
    #[error("Level signal listener failed: {0}")]
    ListenerError(String),
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

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn listener<S: Into<String>>(msg: S) -> Self {
        LoggerError::ListenerError(msg.into())
    }
}

impl From<LoggerError> for std::io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::IoError(io) => io,
            other => std::io::Error::other(other),
        }
    }
}
