//! Logger metrics for observability
//!
//! Sink failures never reach the caller of a log function, so these counters
//! are the only place where lost lines become visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for emitted and dropped entries
///
/// # Example
///
/// ```
/// use reloadable_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries at least one sink failed to write
    dropped_count: AtomicU64,

    /// Entries every sink accepted
    total_logged: AtomicU64,

    /// Entries discarded by the level threshold
    filtered_count: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop rate as a percentage (0.0 - 100.0), 0.0 before anything was emitted
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = dropped + self.total_logged() as f64;
        if total == 0.0 {
            0.0
        } else {
            dropped / total * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_logged();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_filtered_is_separate() {
        let metrics = LoggerMetrics::new();
        metrics.record_filtered();
        assert_eq!(metrics.filtered_count(), 1);
        assert_eq!(metrics.drop_rate(), 0.0);
    }
}
