//! Main logger implementation
//!
//! Producers enqueue into the [`LogRegistry`] without touching the writer.
//! A ticker thread flushes every queue on a fixed period; `stop()` halts it
//! and runs one last flush on the caller's thread.

use super::{
    config::{
        clamp_flush_interval, resolve_log_name, LoggerConfig, DEFAULT_FLUSH_INTERVAL,
        DEFAULT_LOG_NAME,
    },
    error::{LoggerError, Result},
    extension::LogExtension,
    log_entry::{LogEntry, Origin},
    metrics::LoggerMetrics,
    registry::LogRegistry,
    writer::LogWriter,
};
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Counters reported by a disabled logger; they never move
static DISABLED_METRICS: LoggerMetrics = LoggerMetrics::new();

/// State shared between the logger handle and its ticker thread
struct Shared {
    default_name: String,
    flush_interval: Duration,
    registry: LogRegistry,
    /// Doubles as the flush guard: whoever holds it owns the drain
    writer: Mutex<Box<dyn LogWriter>>,
    metrics: LoggerMetrics,
}

impl Shared {
    fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        let result = self.flush_locked(&mut **writer);
        self.metrics.record_flush();
        result
    }

    /// Drain every non-empty queue into one batch and hand it to the writer
    ///
    /// Stops at the first failing log. That batch is gone; logs not yet
    /// visited keep their entries for the next flush.
    fn flush_locked(&self, writer: &mut dyn LogWriter) -> Result<()> {
        for (log_name, queue) in self.registry.snapshot() {
            if queue.is_empty() {
                continue;
            }

            let batch = queue.drain();
            if batch.is_empty() {
                continue;
            }

            // Per-write panic isolation, so a broken writer surfaces as an error
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                writer.write(&log_name, &batch)
            }));

            let result = match outcome {
                Ok(result) => result,
                Err(panic_info) => Err(LoggerError::writer_panicked(
                    writer.name(),
                    panic_message(panic_info.as_ref()),
                )),
            };

            match result {
                Ok(()) => self.metrics.record_batch_written(batch.len()),
                Err(e) => {
                    self.metrics.record_write_failure(batch.len());
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Handle to a running ticker thread
struct Ticker {
    /// Dropping this disconnects the channel and ends the thread
    shutdown: Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl Ticker {
    fn spawn(shared: Arc<Shared>) -> Result<Self> {
        let (shutdown, shutdown_rx) = bounded::<()>(0);
        let interval = shared.flush_interval;

        let handle = thread::Builder::new()
            .name("batch-logger-flush".to_string())
            .spawn(move || {
                let ticks = tick(interval);
                loop {
                    select! {
                        recv(shutdown_rx) -> _ => break,
                        recv(ticks) -> _ => {
                            if let Err(e) = shared.flush() {
                                eprintln!("[LOGGER ERROR] Periodic flush failed: {}", e);
                            }
                        }
                    }
                }
            })
            .map_err(|e| LoggerError::io_operation("starting flush thread", "spawn failed", e))?;

        Ok(Self { shutdown, handle })
    }

    /// Signal the thread and wait for any in-flight flush to finish
    fn halt(self) {
        drop(self.shutdown);
        if let Err(e) = self.handle.join() {
            eprintln!(
                "[LOGGER CRITICAL] Flush thread panicked: {}",
                panic_message(e.as_ref())
            );
        }
    }
}

/// Everything an enabled logger owns
struct Active {
    shared: Arc<Shared>,
    ticker: Mutex<Option<Ticker>>,
}

/// Concurrent, batching logger
///
/// Construct one per application and share it by reference (`&Logger` or
/// `Arc<Logger>`). `record` and `record_to` may be called from any thread
/// at any time; they only append to an in-memory queue.
///
/// A logger without a writer, or built with `enabled(false)`, is disabled:
/// it allocates nothing and every method returns immediately.
///
/// # Data loss
///
/// Entries are dequeued before the writer sees them. If the writer fails,
/// that batch is dropped and the error is returned (from `stop()` or
/// `flush()`) or reported on stderr (from the ticker). Lost entries are
/// counted in [`LoggerMetrics::entries_lost`].
///
/// # Example
///
/// ```
/// use batch_logger::prelude::*;
///
/// struct Discard;
///
/// impl LogWriter for Discard {
///     fn write(&mut self, _log_name: &str, _entries: &[LogEntry]) -> Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "discard"
///     }
/// }
///
/// let logger = Logger::builder()
///     .default_log_name("app")
///     .flush_interval_ms(250)
///     .writer(Discard)
///     .build();
///
/// logger.start().unwrap();
/// logger.record("service started", None, origin!());
/// logger.record_to("audit", "user 42 signed in", None, origin!());
/// logger.stop().unwrap();
/// ```
pub struct Logger {
    active: Option<Active>,
}

impl Logger {
    /// Create an enabled logger with the default flush interval
    #[must_use]
    pub fn new(default_log_name: &str, writer: impl LogWriter + 'static) -> Self {
        Self::builder()
            .default_log_name(default_log_name)
            .writer(writer)
            .build()
    }

    /// Create a logger that ignores every call
    #[must_use]
    pub const fn disabled() -> Self {
        Self { active: None }
    }

    fn enabled(
        default_log_name: &str,
        flush_interval: Duration,
        writer: Box<dyn LogWriter>,
    ) -> Self {
        let default_name = resolve_log_name(default_log_name, DEFAULT_LOG_NAME).to_string();
        let registry = LogRegistry::new();
        // The default log exists from the start
        registry.queue(&default_name);

        let shared = Shared {
            default_name,
            flush_interval: clamp_flush_interval(flush_interval),
            registry,
            writer: Mutex::new(writer),
            metrics: LoggerMetrics::new(),
        };

        Self {
            active: Some(Active {
                shared: Arc::new(shared),
                ticker: Mutex::new(None),
            }),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Record an entry into the default log
    pub fn record(
        &self,
        message: impl Into<String>,
        extension: Option<Arc<dyn LogExtension>>,
        origin: Origin,
    ) {
        let Some(active) = &self.active else {
            return;
        };

        let shared = &active.shared;
        Self::enqueue(shared, &shared.default_name, message.into(), extension, origin);
    }

    /// Record an entry into `log_name`
    ///
    /// A blank or whitespace-only name records into the default log.
    pub fn record_to(
        &self,
        log_name: &str,
        message: impl Into<String>,
        extension: Option<Arc<dyn LogExtension>>,
        origin: Origin,
    ) {
        let Some(active) = &self.active else {
            return;
        };

        let shared = &active.shared;
        let log_name = resolve_log_name(log_name, &shared.default_name);
        Self::enqueue(shared, log_name, message.into(), extension, origin);
    }

    fn enqueue(
        shared: &Shared,
        log_name: &str,
        message: String,
        extension: Option<Arc<dyn LogExtension>>,
        origin: Origin,
    ) {
        let mut entry = LogEntry::new(message, origin);
        if let Some(extension) = extension {
            entry = entry.with_extension(extension);
        }
        shared.registry.enqueue(log_name, entry);
        shared.metrics.record_entry();
    }

    /// Begin periodic flushing
    ///
    /// Does nothing if the logger is disabled or already running.
    pub fn start(&self) -> Result<()> {
        let Some(active) = &self.active else {
            return Ok(());
        };

        let mut ticker = active.ticker.lock();
        if ticker.is_none() {
            *ticker = Some(Ticker::spawn(Arc::clone(&active.shared))?);
        }
        Ok(())
    }

    /// Halt periodic flushing and flush whatever is still queued
    ///
    /// Blocks until any in-flight periodic flush and the final flush have
    /// completed. The final flush's error, if any, is returned. Does nothing
    /// if the logger is disabled or not running. A stopped logger can be
    /// started again.
    pub fn stop(&self) -> Result<()> {
        let Some(active) = &self.active else {
            return Ok(());
        };

        let mut ticker = active.ticker.lock();
        let Some(running) = ticker.take() else {
            return Ok(());
        };

        running.halt();
        active.shared.flush()
    }

    /// Run the flush procedure now, on the calling thread
    ///
    /// Serializes with periodic flushes; works whether or not the logger is
    /// running.
    pub fn flush(&self) -> Result<()> {
        match &self.active {
            Some(active) => active.shared.flush(),
            None => Ok(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.ticker.lock().is_some())
    }

    /// The effective (clamped) flush period, `None` when disabled
    pub fn flush_interval(&self) -> Option<Duration> {
        self.active.as_ref().map(|active| active.shared.flush_interval)
    }

    pub fn default_log_name(&self) -> Option<&str> {
        self.active
            .as_ref()
            .map(|active| active.shared.default_name.as_str())
    }

    /// Number of log queues created so far
    pub fn queue_count(&self) -> usize {
        self.active
            .as_ref()
            .map_or(0, |active| active.shared.registry.len())
    }

    /// Names of every log referenced so far
    pub fn log_names(&self) -> Vec<String> {
        self.active
            .as_ref()
            .map_or_else(Vec::new, |active| active.shared.registry.log_names())
    }

    /// Entries waiting in `log_name` for the next flush
    pub fn pending_count(&self, log_name: &str) -> usize {
        self.active
            .as_ref()
            .map_or(0, |active| active.shared.registry.pending(log_name))
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use batch_logger::Logger;
    ///
    /// let logger = Logger::disabled();
    /// let metrics = logger.metrics();
    /// println!("Recorded: {}", metrics.entries_recorded());
    /// println!("Lost: {}", metrics.entries_lost());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        match &self.active {
            Some(active) => &active.shared.metrics,
            None => &DISABLED_METRICS,
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let Some(active) = &self.active else {
            return;
        };

        if active.ticker.lock().is_some() {
            if let Err(e) = self.stop() {
                eprintln!("[LOGGER ERROR] Final flush failed during shutdown: {}", e);
            }
        }

        let pending: usize = active
            .shared
            .registry
            .snapshot()
            .iter()
            .map(|(_, queue)| queue.len())
            .sum();
        if pending > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger dropped with {} unflushed entries",
                pending
            );
        }

        let metrics = &active.shared.metrics;
        if metrics.entries_lost() > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} lost entries (loss rate: {:.2}%)",
                metrics.entries_lost(),
                metrics.loss_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use batch_logger::prelude::*;
/// use std::time::Duration;
///
/// # struct Discard;
/// # impl LogWriter for Discard {
/// #     fn write(&mut self, _: &str, _: &[LogEntry]) -> Result<()> { Ok(()) }
/// #     fn name(&self) -> &str { "discard" }
/// # }
/// let logger = Logger::builder()
///     .default_log_name("app")
///     .flush_interval(Duration::from_millis(500))
///     .writer(Discard)
///     .build();
/// assert!(logger.is_enabled());
/// ```
pub struct LoggerBuilder {
    default_log_name: String,
    flush_interval: Duration,
    enabled: bool,
    writer: Option<Box<dyn LogWriter>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            default_log_name: DEFAULT_LOG_NAME.to_string(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            enabled: true,
            writer: None,
        }
    }

    /// Start from a loaded [`LoggerConfig`]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .default_log_name(&config.default_log_name)
            .flush_interval_ms(config.flush_interval_ms)
            .enabled(config.enabled)
    }

    /// Set the log that `record` writes to
    ///
    /// Blank names fall back to `"default"`.
    #[must_use = "builder methods return a new value"]
    pub fn default_log_name(mut self, name: &str) -> Self {
        self.default_log_name = name.to_string();
        self
    }

    /// Set the flush period; anything under 100ms is raised to 100ms
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_interval_ms(self, millis: u64) -> Self {
        self.flush_interval(Duration::from_millis(millis))
    }

    /// Turn logging on or off
    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the writer that receives flushed batches
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: LogWriter + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_writer(mut self, writer: Box<dyn LogWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Build the Logger
    ///
    /// Without a writer, or with logging turned off, the result is a
    /// disabled logger.
    pub fn build(self) -> Logger {
        match self.writer {
            Some(writer) if self.enabled => {
                Logger::enabled(&self.default_log_name, self.flush_interval, writer)
            }
            _ => Logger::disabled(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
