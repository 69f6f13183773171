//! Logger metrics for observability
//!
//! Counters for monitoring logger health: records handed to the handler
//! chain and records whose handler reported a failure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics shared by a logger and every logger derived from it
///
/// # Example
///
/// ```
/// use vmodule_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.records_emitted(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the enabled check and were handed to the handler
    records_emitted: AtomicU64,

    /// Records whose handler returned an error
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_emitted(&self) -> u64 {
        self.records_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.records_emitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage (0.0 - 100.0) of emitted records
    ///
    /// Returns 0.0 if nothing has been emitted.
    pub fn failure_rate(&self) -> f64 {
        let emitted = self.records_emitted() as f64;
        if emitted == 0.0 {
            0.0
        } else {
            (self.write_failures() as f64 / emitted) * 100.0
        }
    }

    pub fn reset(&self) {
        self.records_emitted.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_emitted: AtomicU64::new(self.records_emitted()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}
