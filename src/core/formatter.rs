//! Single-line text rendering of log entries
//!
//! A rendered line has the shape
//!
//! ```text
//! <timestamp> [<file>:<line>] [TAG] <message padded to 44> \n
//! ```
//!
//! where the timestamp and position segments are optional and the tag may be
//! wrapped in an ANSI color escape.

use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::{TimestampFormat, DEFAULT_TIMESTAMP_LAYOUT};
use std::fmt::Write;

/// Minimum width of the message column
pub const MESSAGE_COLUMN_WIDTH: usize = 44;

/// Per-sink rendering options. Immutable once a formatter is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterOptions {
    pub enable_timestamp: bool,
    pub enable_position: bool,
    pub enable_color: bool,
    /// strftime or reference-time layout, see [`TimestampFormat::from_pattern`]
    pub timestamp_format: String,
    /// Frames between the sink's invocation point and the application call site
    pub call_site_depth: usize,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            enable_timestamp: true,
            enable_position: true,
            enable_color: false,
            timestamp_format: DEFAULT_TIMESTAMP_LAYOUT.to_string(),
            call_site_depth: 0,
        }
    }
}

/// Renders entries according to a fixed set of [`FormatterOptions`].
///
/// # Example
///
/// ```
/// use reloadable_logger::{FormatterOptions, LineFormatter, LogEntry, LogLevel};
///
/// let formatter = LineFormatter::new(FormatterOptions {
///     enable_timestamp: false,
///     enable_position: false,
///     ..FormatterOptions::default()
/// });
/// let line = formatter.format(&LogEntry::new(LogLevel::Warn, "disk low".to_string()));
/// assert!(line.starts_with("[WARN] disk low"));
/// assert!(line.ends_with(" \n"));
/// ```
#[derive(Debug, Clone)]
pub struct LineFormatter {
    options: FormatterOptions,
    timestamp: TimestampFormat,
}

impl LineFormatter {
    pub fn new(options: FormatterOptions) -> Self {
        let timestamp = TimestampFormat::from_pattern(&options.timestamp_format);
        Self { options, timestamp }
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// Render one newline-terminated line. Never fails.
    pub fn format(&self, entry: &LogEntry) -> String {
        let mut line = String::with_capacity(96 + entry.message.len());

        if self.options.enable_timestamp {
            line.push_str(&self.timestamp.format(&entry.timestamp));
            line.push(' ');
        }

        if self.options.enable_position {
            let site = entry.trail.caller(self.options.call_site_depth);
            let _ = write!(line, "[{}:{}] ", site.basename(), site.line);
        }

        if self.options.enable_color {
            let _ = write!(
                line,
                "[\x1b[{}m{}\x1b[0m] ",
                Self::color_code(entry.level),
                entry.level.tag()
            );
        } else {
            let _ = write!(line, "[{}] ", entry.level.tag());
        }

        let _ = write!(
            line,
            "{:<width$} ",
            entry.message,
            width = MESSAGE_COLUMN_WIDTH
        );
        line.push('\n');
        line
    }

    fn color_code(level: LogLevel) -> std::borrow::Cow<'static, str> {
        level.color_code().to_fg_str()
    }
}
