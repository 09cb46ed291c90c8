//! Logging macros with `format!`-style arguments.
//!
//! The call site reported in rendered lines is the line the macro is invoked
//! on.
//!
//! # Examples
//!
//! ```
//! use reloadable_logger::prelude::*;
//! use reloadable_logger::info;
//!
//! let logger = Logger::builder().output(ConsoleAppender::discard()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use reloadable_logger::prelude::*;
/// # let logger = Logger::builder().output(ConsoleAppender::discard()).build();
/// use reloadable_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use reloadable_logger::prelude::*;
/// # let logger = Logger::builder().output(ConsoleAppender::discard()).build();
/// use reloadable_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use reloadable_logger::prelude::*;
/// # let logger = Logger::builder().output(ConsoleAppender::discard()).build();
/// use reloadable_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
