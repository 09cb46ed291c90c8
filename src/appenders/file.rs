//! File appender implementation

use crate::core::{Appender, LineFormatter, LogEntry, LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Plain append-only file sink
pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    formatter: LineFormatter,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>, formatter: LineFormatter) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LoggerError::config("log_file", "path is empty"));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            formatter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::file_appender(self.path.display().to_string(), "writer closed"))?;

        let line = self.formatter.format(entry);
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn formatter(&self) -> Option<&LineFormatter> {
        Some(&self.formatter)
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
