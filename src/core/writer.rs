//! Writer trait for batch persistence

use super::{error::Result, log_entry::LogEntry};

/// Destination for flushed batches
///
/// The logger calls [`write`](LogWriter::write) once per non-empty log per
/// flush, with the entries in enqueue order. Calls never overlap: the logger
/// holds its flush guard around every call.
///
/// A returned error aborts the flush that made the call. The batch has
/// already been dequeued and is not retried.
pub trait LogWriter: Send {
    fn write(&mut self, log_name: &str, entries: &[LogEntry]) -> Result<()>;
    fn name(&self) -> &str;
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&mut self, log_name: &str, entries: &[LogEntry]) -> Result<()> {
        (**self).write(log_name, entries)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
