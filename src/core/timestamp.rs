//! Timestamp formatting utilities
//!
//! Configuration carries timestamp patterns as plain strings. Two pattern
//! dialects are accepted: strftime (`%Y-%m-%d %H:%M:%S`) and reference-time
//! layouts (`2006-01-02 15:04:05`), where each field is written as the
//! corresponding part of Mon Jan 2 15:04:05 MST 2006.

use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// Default pattern used for rendered log lines
pub const DEFAULT_TIMESTAMP_LAYOUT: &str = "2006-01-02 15:04:05";

/// A timestamp pattern, held in strftime form
///
/// # Examples
///
/// ```
/// use reloadable_logger::TimestampFormat;
///
/// let format = TimestampFormat::from_pattern("2006-01-02 15:04:05");
/// assert_eq!(format.pattern(), "%Y-%m-%d %H:%M:%S");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    strftime: String,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::from_pattern(DEFAULT_TIMESTAMP_LAYOUT)
    }
}

/// Reference-layout tokens and their strftime equivalents, longest first so
/// that e.g. `2006` wins over `2` and `002` over `02`.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("-0700", "%z"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("002", "%j"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

impl TimestampFormat {
    /// Interpret a configured timestamp pattern.
    ///
    /// Patterns containing `%` are taken as strftime; anything else is read as
    /// a reference-time layout and translated.
    #[must_use]
    pub fn from_pattern(pattern: &str) -> Self {
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            Self::translate_layout(pattern)
        };
        Self { strftime }
    }

    /// The strftime pattern timestamps are rendered with
    pub fn pattern(&self) -> &str {
        &self.strftime
    }

    fn translate_layout(layout: &str) -> String {
        let mut out = String::with_capacity(layout.len() * 2);
        let mut rest = layout;

        'scan: while let Some(ch) = rest.chars().next() {
            for (token, spec) in LAYOUT_TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    out.push_str(spec);
                    rest = tail;
                    continue 'scan;
                }
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }

        out
    }

    /// Render `datetime`. A pattern chrono cannot render is printed as is.
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut rendered = String::new();
        // Unknown strftime specifiers make the formatter report an error
        if write!(rendered, "{}", datetime.format(&self.strftime)).is_err() {
            rendered.clear();
            rendered.push_str(&self.strftime);
        }
        rendered
    }
}
