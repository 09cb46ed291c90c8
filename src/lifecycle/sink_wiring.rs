//! Turning a configuration snapshot into installed sinks

use crate::appenders::{ConsoleAppender, FileAppender, RotatingFile, RotatingFileAppender, RotationPolicy};
use crate::core::{
    Appender, FormatterOptions, LineFormatter, LogConfiguration, CONSOLE_CALL_DEPTH, FILE_CALL_DEPTH,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Formatter for the console output: colored when configured
pub fn console_formatter(config: &LogConfiguration) -> LineFormatter {
    LineFormatter::new(FormatterOptions {
        enable_timestamp: config.enable_timestamp,
        enable_position: config.enable_position,
        enable_color: config.enable_color,
        timestamp_format: config.timestamp_format.clone(),
        call_site_depth: CONSOLE_CALL_DEPTH,
    })
}

/// Formatter for a file hook. Files never carry ANSI escapes.
pub fn file_formatter(config: &LogConfiguration) -> LineFormatter {
    LineFormatter::new(FormatterOptions {
        enable_timestamp: config.enable_timestamp,
        enable_position: config.enable_position,
        enable_color: false,
        timestamp_format: config.timestamp_format.clone(),
        call_site_depth: FILE_CALL_DEPTH,
    })
}

/// Console output for `config`, or a discarding output when console printing
/// is off. `writer` replaces stdout when given.
pub fn console_output(
    config: &LogConfiguration,
    writer: Option<Box<dyn Write + Send + Sync>>,
) -> ConsoleAppender {
    if !config.enable_console {
        return ConsoleAppender::discard();
    }

    let formatter = console_formatter(config);
    match writer {
        Some(writer) => ConsoleAppender::with_writer(formatter, writer),
        None => ConsoleAppender::stdout(formatter),
    }
}

/// Which file sink a configuration asks for
#[derive(Debug, Clone, PartialEq)]
pub enum FileSinkPlan {
    /// Size-rotated file, chosen when more than one backup is kept
    Rotating { path: PathBuf, policy: RotationPolicy },
    /// Append-only file
    Plain { path: PathBuf },
}

impl FileSinkPlan {
    pub fn for_config(config: &LogConfiguration) -> Self {
        let path = PathBuf::from(&config.log_file);
        if config.rotates() {
            FileSinkPlan::Rotating {
                path,
                policy: RotationPolicy::from_config(config),
            }
        } else {
            FileSinkPlan::Plain { path }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FileSinkPlan::Rotating { path, .. } | FileSinkPlan::Plain { path } => path,
        }
    }

    /// Open the file and pair it with `formatter`
    ///
    /// # Errors
    ///
    /// Returns error if the file or its directory cannot be created
    pub fn build(self, formatter: LineFormatter) -> crate::core::Result<Box<dyn Appender>> {
        match self {
            FileSinkPlan::Rotating { path, policy } => {
                let file = RotatingFile::open(path, policy)?;
                Ok(Box::new(RotatingFileAppender::new(file, formatter)))
            }
            FileSinkPlan::Plain { path } => Ok(Box::new(FileAppender::new(path, formatter)?)),
        }
    }
}

/// Build the single file hook described by `config`
///
/// # Errors
///
/// Returns error if the sink cannot be opened
pub fn file_sink(config: &LogConfiguration) -> crate::core::Result<Box<dyn Appender>> {
    FileSinkPlan::for_config(config).build(file_formatter(config))
}
