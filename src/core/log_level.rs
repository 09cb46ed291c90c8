//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

/// Human-readable level names accepted in configuration, matched ignoring case.
const LEVEL_TABLE: [(&str, LogLevel); 4] = [
    ("debug", LogLevel::Debug),
    ("info", LogLevel::Info),
    ("warn", LogLevel::Warn),
    ("error", LogLevel::Error),
];

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Resolve a configured level name, falling back to `Info` for anything
    /// not in the level table.
    ///
    /// ```
    /// use reloadable_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::lookup("DEBUG"), LogLevel::Debug);
    /// assert_eq!(LogLevel::lookup("verbose"), LogLevel::Info);
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Self {
        name.parse().unwrap_or(LogLevel::Info)
    }

    /// Four-character tag used in rendered lines ("DEBU", "INFO", "WARN", "ERRO").
    pub fn tag(&self) -> &'static str {
        &self.to_str()[..4]
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => White,
            LogLevel::Info => Cyan,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }

    pub(crate) fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVEL_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, level)| *level)
            .ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        for (name, level) in LEVEL_TABLE {
            assert_eq!(LogLevel::lookup(name), level);
            assert_eq!(LogLevel::lookup(&name.to_uppercase()), level);
        }
        assert_eq!(LogLevel::lookup("Warn"), LogLevel::Warn);
    }

    #[test]
    fn test_lookup_defaults_to_info() {
        assert_eq!(LogLevel::lookup(""), LogLevel::Info);
        assert_eq!(LogLevel::lookup("warning"), LogLevel::Info);
        assert_eq!(LogLevel::lookup("trace"), LogLevel::Info);
        assert!("fatal".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_tags() {
        assert_eq!(LogLevel::Debug.tag(), "DEBU");
        assert_eq!(LogLevel::Info.tag(), "INFO");
        assert_eq!(LogLevel::Warn.tag(), "WARN");
        assert_eq!(LogLevel::Error.tag(), "ERRO");
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_repr_roundtrip() {
        for (_, level) in LEVEL_TABLE {
            assert_eq!(LogLevel::from_repr(level as u8), Some(level));
        }
        assert_eq!(LogLevel::from_repr(9), None);
    }
}
