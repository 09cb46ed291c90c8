//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::panic::Location;

/// A source position a log entry passed through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Placeholder reported when a frame is not available
    pub const UNKNOWN: CallSite = CallSite {
        file: "unknown",
        line: 0,
    };

    /// Position of the calling expression, or of its caller when called from
    /// a `#[track_caller]` function
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    /// Final path component of the source file
    pub fn basename(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Frames recorded while an entry travels from the application call site
/// through the engine's dispatch layers.
///
/// The first frame is the application call site; each dispatch layer pushes
/// its own frame afterwards. Sinks walk back a fixed number of frames from the
/// innermost one, so adding a dispatch layer shifts every sink's depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallTrail {
    frames: Vec<CallSite>,
}

impl CallTrail {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(4),
        }
    }

    pub fn push(&mut self, site: CallSite) {
        self.frames.push(site);
    }

    /// Walk `depth` frames back from the innermost frame.
    pub fn caller(&self, depth: usize) -> CallSite {
        self.frames
            .len()
            .checked_sub(depth + 1)
            .and_then(|idx| self.frames.get(idx))
            .copied()
            .unwrap_or(CallSite::UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub trail: CallTrail,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a record always renders to a single line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            timestamp: Local::now(),
            trail: CallTrail::new(),
        }
    }

    /// Record the application call site as the outermost frame
    pub fn called_from(mut self, location: &'static Location<'static>) -> Self {
        self.trail.push(CallSite::from(location));
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "a\nb\tc\r".to_string());
        assert_eq!(entry.message, "a\\nb\\tc\\r");
    }

    #[test]
    fn test_trail_walks_back_from_innermost() {
        let mut trail = CallTrail::new();
        trail.push(CallSite { file: "src/app.rs", line: 10 });
        trail.push(CallSite { file: "src/core/logger.rs", line: 20 });
        trail.push(CallSite { file: "src/core/logger.rs", line: 30 });

        assert_eq!(trail.caller(0).line, 30);
        assert_eq!(trail.caller(2).file, "src/app.rs");
        assert_eq!(trail.caller(3), CallSite::UNKNOWN);
    }

    #[test]
    fn test_empty_trail_is_unknown() {
        assert_eq!(CallTrail::new().caller(0), CallSite::UNKNOWN);
    }

    #[test]
    fn test_basename() {
        let site = CallSite { file: "src/lifecycle/controller.rs", line: 1 };
        assert_eq!(site.basename(), "controller.rs");
        let site = CallSite { file: r"src\win\main.rs", line: 1 };
        assert_eq!(site.basename(), "main.rs");
        assert_eq!(CallSite::UNKNOWN.basename(), "unknown");
    }

    #[test]
    fn test_called_from_records_location() {
        let entry = LogEntry::new(LogLevel::Warn, "x".to_string()).called_from(Location::caller());
        assert_eq!(entry.trail.len(), 1);
        assert!(entry.trail.caller(0).file.ends_with("log_entry.rs"));
    }
}
