//! Process-wide severity threshold shared between the engine and its writers

use super::log_level::LogLevel;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Shared handle to the active severity threshold.
///
/// Every log call reads it; the lifecycle controller and the level-signal
/// listener write it. Clones observe the same threshold.
#[derive(Debug, Clone)]
pub struct ActiveLevel {
    inner: Arc<AtomicU8>,
}

impl ActiveLevel {
    pub fn new(level: LogLevel) -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    #[inline]
    pub fn get(&self) -> LogLevel {
        LogLevel::from_repr(self.inner.load(Ordering::Acquire)).unwrap_or_default()
    }

    #[inline]
    pub fn set(&self, level: LogLevel) {
        self.inner.store(level as u8, Ordering::Release);
    }

    /// Whether an entry at `level` passes the current threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.get()
    }
}

impl Default for ActiveLevel {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}
