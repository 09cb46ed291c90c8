//! Rotating file output
//!
//! [`RotatingFile`] is a plain [`Write`] stream that rolls the file over when
//! the next write would push it past the configured size. Rolled-over files are
//! renamed to `<stem>-<timestamp><ext>` next to the active file, then pruned by
//! count and age and optionally gzip-compressed.

use crate::core::appender::Appender;
use crate::core::config::LogConfiguration;
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::LineFormatter;
use crate::core::log_entry::LogEntry;
use chrono::{Local, NaiveDateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const MEGABYTE: u64 = 1024 * 1024;

/// Size used when a policy asks for zero megabytes
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Timestamp embedded in backup file names
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

const COMPRESSED_SUFFIX: &str = ".gz";

/// When to roll over and what to keep afterwards
///
/// # Examples
///
/// ```
/// use reloadable_logger::appenders::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_age_days(7)
///     .with_max_backups(10)
///     .with_compression(true);
/// assert_eq!(policy.max_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Roll over before a write would exceed this many bytes
    pub max_bytes: u64,
    /// Remove backups older than this; `None` keeps them regardless of age
    pub max_age: Option<Duration>,
    /// Newest backups to keep; 0 keeps all
    pub max_backups: usize,
    /// Name backups in local time instead of UTC
    pub local_time: bool,
    /// Gzip backups after rollover
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_age: None,
            max_backups: 0,
            local_time: true,
            compress: false,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy described by the rotation fields of a logging configuration
    #[must_use]
    pub fn from_config(config: &LogConfiguration) -> Self {
        Self::new()
            .with_max_size_mb(config.max_size_mb)
            .with_max_age_days(config.max_age_days)
            .with_max_backups(config.max_backups)
            .with_local_time(true)
            .with_compression(config.compress)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Zero falls back to [`DEFAULT_MAX_SIZE_MB`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 { DEFAULT_MAX_SIZE_MB } else { megabytes };
        self.max_bytes = megabytes.saturating_mul(MEGABYTE);
        self
    }

    /// Zero disables age-based removal
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = (days > 0).then(|| Duration::from_secs(days * 24 * 3600));
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

#[derive(Debug)]
struct Backup {
    path: PathBuf,
    taken_at: NaiveDateTime,
    compressed: bool,
}

/// Size-rotated log file
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    size: u64,
}

impl RotatingFile {
    /// Open (or create) the active file, appending to existing content
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created
    pub fn open<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.file_name().is_none() {
            return Err(LoggerError::config(
                "log_file",
                format!("'{}' does not name a file", path.display()),
            ));
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

        let mut rotating = Self {
            path,
            policy,
            writer: None,
            size: 0,
        };
        rotating.open_active()?;
        Ok(rotating)
    }

    fn open_active(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_appender(self.path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        self.size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        if self.policy.local_time {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        }
    }

    /// Split the active file name into the backup prefix and extension,
    /// `app.log` -> (`app-`, `.log`)
    fn name_parts(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app");
        let ext = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (format!("{}-", stem), ext)
    }

    fn backup_path(&self, taken_at: NaiveDateTime) -> PathBuf {
        let (prefix, ext) = self.name_parts();
        self.path.with_file_name(format!(
            "{}{}{}",
            prefix,
            taken_at.format(BACKUP_TIME_FORMAT),
            ext
        ))
    }

    /// Roll the active file over to a backup and start a new one
    pub fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.path.exists() {
            // Two rollovers within one millisecond would share a name
            let mut taken_at = self.now();
            let mut backup = self.backup_path(taken_at);
            while backup.exists() || gz_path(&backup).exists() {
                taken_at += chrono::Duration::milliseconds(1);
                backup = self.backup_path(taken_at);
            }

            fs::rename(&self.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        self.open_active()?;
        self.prune();
        Ok(())
    }

    fn backups(&self) -> io::Result<Vec<Backup>> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (prefix, ext) = self.name_parts();

        let mut backups = Vec::new();
        for dir_entry in fs::read_dir(&dir)? {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };

            let (name, compressed) = match name.strip_suffix(COMPRESSED_SUFFIX) {
                Some(inner) => (inner, true),
                None => (name, false),
            };
            let Some(stamp) = name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(ext.as_str()))
            else {
                continue;
            };
            if let Ok(taken_at) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) {
                backups.push(Backup {
                    path: dir_entry.path(),
                    taken_at,
                    compressed,
                });
            }
        }

        backups.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        Ok(backups)
    }

    /// Apply the count, age and compression rules to existing backups.
    /// Failures are reported and left for the next rollover.
    fn prune(&self) {
        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Cannot list backups of {}: {}",
                    self.path.display(),
                    e
                );
                return;
            }
        };

        let cutoff = self
            .policy
            .max_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
            .map(|age| self.now() - age);

        for (idx, backup) in backups.iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && idx >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| backup.taken_at < cutoff);

            if over_count || too_old {
                if let Err(e) = fs::remove_file(&backup.path) {
                    eprintln!(
                        "[LOGGER WARNING] Failed to remove old backup {}: {}",
                        backup.path.display(),
                        e
                    );
                }
            } else if self.policy.compress && !backup.compressed {
                if let Err(e) = compress_file(&backup.path) {
                    eprintln!("[LOGGER WARNING] {}", e);
                }
            }
        }
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(COMPRESSED_SUFFIX);
    PathBuf::from(name)
}

/// Gzip `path` to `path.gz` through a temporary file, removing the original
/// only once the compressed copy is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, Read};

    let gz = gz_path(path);
    let mut temp_name = gz.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_gz = PathBuf::from(temp_name);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let streamed = (|| -> io::Result<()> {
        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            encoder.write_all(&buffer[..bytes_read])?;
        }
        encoder.finish()?.flush()
    })();

    if let Err(e) = streamed {
        let _ = fs::remove_file(&temp_gz);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz, &gz).map_err(|e| {
        let _ = fs::remove_file(&temp_gz);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.policy.max_bytes {
            return Err(LoggerError::file_rotation(
                self.path.display().to_string(),
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.policy.max_bytes
                ),
            )
            .into());
        }

        if self.writer.is_none() {
            self.open_active()?;
        }
        if self.size + len > self.policy.max_bytes {
            self.rotate()?;
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("log file is not open"))?;
        let written = writer.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer {
            Some(ref mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for RotatingFile {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// File hook writing through a [`RotatingFile`]
pub struct RotatingFileAppender {
    file: RotatingFile,
    formatter: LineFormatter,
}

impl RotatingFileAppender {
    pub fn new(file: RotatingFile, formatter: LineFormatter) -> Self {
        Self { file, formatter }
    }

    pub fn file(&self) -> &RotatingFile {
        &self.file
    }
}

impl Appender for RotatingFileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.formatter.format(entry);
        self.file.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.file.path().display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }

    fn formatter(&self) -> Option<&LineFormatter> {
        Some(&self.formatter)
    }
}
