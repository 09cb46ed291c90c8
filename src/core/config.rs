//! Logging configuration snapshot

use super::error::Result;
use super::log_level::LogLevel;
use super::timestamp::DEFAULT_TIMESTAMP_LAYOUT;
use serde::{Deserialize, Serialize};

/// Logging section of the host configuration.
///
/// Owned by the configuration collaborator and handed to
/// [`LifecycleController::reload`](crate::LifecycleController::reload) as a
/// whole; the logger never edits it. Missing keys take their default values.
///
/// # Example
///
/// ```
/// use reloadable_logger::LogConfiguration;
///
/// let config = LogConfiguration::from_json(r#"{"level": "debug", "enable_color": false}"#).unwrap();
/// assert_eq!(config.level, "debug");
/// assert!(!config.enable_color);
/// assert_eq!(config.max_backups, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfiguration {
    /// Print to stdout
    pub enable_console: bool,
    #[serde(rename = "enable_time")]
    pub enable_timestamp: bool,
    /// Prefix lines with `[file:line]`
    #[serde(rename = "enable_pos")]
    pub enable_position: bool,
    /// ANSI-colored level tags on the console
    pub enable_color: bool,
    pub timestamp_format: String,
    pub log_file: String,
    pub level: String,
    /// Rotate once the file reaches this many megabytes
    #[serde(rename = "max_size")]
    pub max_size_mb: u64,
    /// Remove backups older than this many days, 0 keeps them forever
    #[serde(rename = "max_days")]
    pub max_age_days: u64,
    /// Rotation is enabled when more than one backup is kept
    #[serde(alias = "mac_backups")]
    pub max_backups: usize,
    /// Gzip rotated backups
    pub compress: bool,
}

impl LogConfiguration {
    /// Name of the configuration section this struct is registered under
    pub const SECTION: &'static str = "log";

    /// Parse a JSON document holding the logging section
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Threshold named by `level`, `Info` if the name is not recognised
    pub fn level(&self) -> LogLevel {
        LogLevel::lookup(&self.level)
    }

    /// Whether the file sink should be a rotating one
    pub fn rotates(&self) -> bool {
        self.max_backups > 1
    }
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            enable_console: true,
            enable_timestamp: true,
            enable_position: true,
            enable_color: true,
            timestamp_format: DEFAULT_TIMESTAMP_LAYOUT.to_string(),
            log_file: "log/app.log".to_string(),
            level: "info".to_string(),
            max_size_mb: 5,
            max_age_days: 30,
            max_backups: 5,
            compress: true,
        }
    }
}
