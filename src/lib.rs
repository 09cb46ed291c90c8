//! # Reloadable Logger
//!
//! A leveled logger whose configuration can be swapped on a live process.
//!
//! ## Features
//!
//! - **Hot Reload**: [`LifecycleController::reload`] re-applies a configuration
//!   snapshot without restarting the process or losing log continuity
//! - **Runtime Overrides**: SIGUSR1 raises the threshold to debug, SIGUSR2
//!   lowers it to error-only
//! - **Aligned Output**: one line per record with optional timestamp, call site
//!   and colored level tag
//! - **File Rotation**: size-based rollover with age/count pruning and gzip
//!
//! ## Example
//!
//! ```no_run
//! use reloadable_logger::{info, LifecycleController, LogConfiguration, Logger};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new());
//! let controller = LifecycleController::new(Arc::clone(&logger));
//!
//! let config = LogConfiguration::from_json(r#"{"level": "debug", "log_file": "log/app.log"}"#).unwrap();
//! controller.reload(config);
//!
//! info!(logger, "listening on port {}", 8080);
//!
//! controller.destroy();
//! ```

pub mod appenders;
pub mod core;
pub mod lifecycle;
pub mod macros;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        ActiveLevel, Appender, FormatterOptions, LineFormatter, LogConfiguration, LogEntry, LogLevel,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::lifecycle::{LevelOverride, LifecycleController, ManualSignalSource};
}

pub use crate::appenders::{ConsoleAppender, FileAppender};
pub use crate::core::{
    ActiveLevel, Appender, FormatterOptions, LineFormatter, LogConfiguration, LogEntry, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat, CONSOLE_CALL_DEPTH,
    FILE_CALL_DEPTH,
};
pub use crate::lifecycle::LifecycleController;
