//! Logger metrics for observability
//!
//! Counters for monitoring logger health: how many entries were recorded,
//! how many reached a writer, and how many were lost to write failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use batch_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_entry();
/// metrics.record_batch_written(1);
///
/// assert_eq!(metrics.entries_recorded(), 1);
/// assert_eq!(metrics.entries_written(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries accepted by `record` / `record_to`
    entries_recorded: AtomicU64,

    /// Entries handed to the writer in a successful batch
    entries_written: AtomicU64,

    /// Successful writer calls
    batches_written: AtomicU64,

    /// Completed flush procedures, successful or not
    flush_count: AtomicU64,

    /// Writer calls that returned an error or panicked
    write_failures: AtomicU64,

    /// Entries dequeued into a batch whose write failed
    entries_lost: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_recorded: AtomicU64::new(0),
            entries_written: AtomicU64::new(0),
            batches_written: AtomicU64::new(0),
            flush_count: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            entries_lost: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_recorded(&self) -> u64 {
        self.entries_recorded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_written(&self) -> u64 {
        self.batches_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_lost(&self) -> u64 {
        self.entries_lost.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_entry(&self) -> u64 {
        self.entries_recorded.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a successful writer call carrying `entries` entries
    #[inline]
    pub fn record_batch_written(&self, entries: usize) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.entries_written
            .fetch_add(entries as u64, Ordering::Relaxed);
    }

    /// Record a failed writer call whose batch of `entries` is gone
    #[inline]
    pub fn record_write_failure(&self, entries: usize) {
        self.write_failures.fetch_add(1, Ordering::Relaxed);
        self.entries_lost.fetch_add(entries as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flush_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Entries recorded but neither written nor lost yet
    pub fn entries_pending(&self) -> u64 {
        self.entries_recorded()
            .saturating_sub(self.entries_written() + self.entries_lost())
    }

    /// Get loss rate as a percentage (0.0 - 100.0) of entries that left a queue
    ///
    /// Returns 0.0 if nothing has been flushed yet.
    pub fn loss_rate(&self) -> f64 {
        let lost = self.entries_lost() as f64;
        let total = self.entries_written() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_recorded.store(0, Ordering::Relaxed);
        self.entries_written.store(0, Ordering::Relaxed);
        self.batches_written.store(0, Ordering::Relaxed);
        self.flush_count.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.entries_lost.store(0, Ordering::Relaxed);
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
            entries_recorded: AtomicU64::new(self.entries_recorded()),
            entries_written: AtomicU64::new(self.entries_written()),
            batches_written: AtomicU64::new(self.batches_written()),
            flush_count: AtomicU64::new(self.flush_count()),
            write_failures: AtomicU64::new(self.write_failures()),
            entries_lost: AtomicU64::new(self.entries_lost()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.entries_recorded(), 0);
        assert_eq!(metrics.entries_written(), 0);
        assert_eq!(metrics.batches_written(), 0);
        assert_eq!(metrics.flush_count(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.entries_lost(), 0);
    }

    #[test]
    fn test_metrics_record_entry() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_entry(), 0); // Returns previous value
        metrics.record_entry();
        assert_eq!(metrics.entries_recorded(), 2);
        assert_eq!(metrics.entries_pending(), 2);
    }

    #[test]
    fn test_metrics_batches() {
        let metrics = LoggerMetrics::new();
        for _ in 0..10 {
            metrics.record_entry();
        }
        metrics.record_batch_written(6);
        metrics.record_write_failure(4);

        assert_eq!(metrics.batches_written(), 1);
        assert_eq!(metrics.entries_written(), 6);
        assert_eq!(metrics.write_failures(), 1);
        assert_eq!(metrics.entries_lost(), 4);
        assert_eq!(metrics.entries_pending(), 0);
    }

    #[test]
    fn test_metrics_loss_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.loss_rate(), 0.0);

        metrics.record_batch_written(90);
        metrics.record_write_failure(10);

        let rate = metrics.loss_rate();
        assert!((9.9..=10.1).contains(&rate), "Loss rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_entry();
        metrics.record_flush();
        metrics.record_write_failure(3);

        metrics.reset();

        assert_eq!(metrics.entries_recorded(), 0);
        assert_eq!(metrics.flush_count(), 0);
        assert_eq!(metrics.entries_lost(), 0);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_entry();
        metrics.record_batch_written(1);

        let snapshot = metrics.clone();
        assert_eq!(snapshot.entries_written(), 1);

        // Original and clone are independent
        metrics.record_entry();
        assert_eq!(metrics.entries_recorded(), 2);
        assert_eq!(snapshot.entries_recorded(), 1);
    }
}
