//! Sink trait for rendered log output

use super::{error::Result, formatter::LineFormatter, log_entry::LogEntry};

/// A destination for log entries: the console output or a file hook.
///
/// Sinks render entries themselves, each with its own [`LineFormatter`], since
/// the console and file paths reach their sinks through different call depths.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Formatter this sink renders with, if it renders text lines
    fn formatter(&self) -> Option<&LineFormatter> {
        None
    }
}
