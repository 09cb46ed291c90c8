//! Core logger types and traits

pub mod active_level;
pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use active_level::ActiveLevel;
pub use appender::Appender;
pub use config::LogConfiguration;
pub use error::{LoggerError, Result};
pub use formatter::{FormatterOptions, LineFormatter, MESSAGE_COLUMN_WIDTH};
pub use log_entry::{CallSite, CallTrail, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, CONSOLE_CALL_DEPTH, FILE_CALL_DEPTH};
pub use metrics::LoggerMetrics;
pub use timestamp::{TimestampFormat, DEFAULT_TIMESTAMP_LAYOUT};
