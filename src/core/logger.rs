//! Main logger implementation

use super::{
    active_level::ActiveLevel,
    appender::Appender,
    error::Result,
    log_entry::{CallSite, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::panic::Location;

/// Trail frames between the console output and the application call site.
///
/// Dispatch pushes one frame before writing the output. Recalibrate when a
/// layer is added between [`Logger::log`] and the output.
pub const CONSOLE_CALL_DEPTH: usize = 1;

/// Trail frames between a file hook and the application call site.
///
/// Hooks are reached through dispatch and then hook firing, one frame each.
pub const FILE_CALL_DEPTH: usize = 2;

/// Leveled logger with one replaceable output and any number of hooks.
///
/// The logger is an owned context object: share it as `Arc<Logger>` between
/// application code and the
/// [`LifecycleController`](crate::LifecycleController) that reconfigures it.
pub struct Logger {
    level: ActiveLevel,
    output: RwLock<Box<dyn Appender>>,
    hooks: RwLock<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: ActiveLevel::default(),
            output: RwLock::new(Box::new(ConsoleAppender::default())),
            hooks: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    /// Handle to the threshold, for writers that outlive a borrow of the logger
    pub fn active_level(&self) -> ActiveLevel {
        self.level.clone()
    }

    /// Replace the output; the previous one is flushed and dropped
    pub fn set_output<A: Appender + 'static>(&self, output: A) {
        let mut previous = std::mem::replace(&mut *self.output.write(), Box::new(output));
        if let Err(e) = previous.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush replaced output '{}': {}",
                previous.name(),
                e
            );
        }
    }

    pub fn output_name(&self) -> String {
        self.output.read().name().to_string()
    }

    pub fn add_hook(&self, hook: Box<dyn Appender>) {
        self.hooks.write().push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    /// Run `f` over the installed hooks
    pub fn with_hooks<R>(&self, f: impl FnOnce(&[Box<dyn Appender>]) -> R) -> R {
        f(&self.hooks.read())
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.level.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::new(level, message.into()).called_from(Location::caller());
        self.dispatch(entry);
    }

    fn dispatch(&self, mut entry: LogEntry) {
        entry.trail.push(CallSite::here());

        let mut has_error = !Self::append_isolated(self.output.write().as_mut(), &entry);
        has_error |= self.fire_hooks(entry);

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    /// Returns true if any hook failed
    fn fire_hooks(&self, mut entry: LogEntry) -> bool {
        let mut hooks = self.hooks.write();
        if hooks.is_empty() {
            return false;
        }

        entry.trail.push(CallSite::here());

        let mut has_error = false;
        for hook in hooks.iter_mut() {
            has_error |= !Self::append_isolated(hook.as_mut(), &entry);
        }
        has_error
    }

    /// Write one entry to one sink with panic isolation, so a failing sink
    /// never stops the others. Returns false on error or panic.
    fn append_isolated(appender: &mut dyn Appender, entry: &LogEntry) -> bool {
        let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(entry)
        }));

        match append_result {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                false
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                     Other appenders continue to function.",
                    appender.name(),
                    panic_msg
                );
                false
            }
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.output.write().flush()?;
        for hook in self.hooks.write().iter_mut() {
            hook.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use reloadable_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .output(ConsoleAppender::discard())
///     .build();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    output: Option<Box<dyn Appender>>,
    hooks: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            output: None,
            hooks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<A: Appender + 'static>(mut self, output: A) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook<A: Appender + 'static>(mut self, hook: A) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_level(self.level);
        if let Some(output) = self.output {
            *logger.output.write() = output;
        }
        for hook in self.hooks {
            logger.add_hook(hook);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
