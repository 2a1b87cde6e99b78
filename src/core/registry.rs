//! Per-log-name entry queues
//!
//! Producers append through a shared read lock on the name map and an
//! unbounded `crossbeam-channel` per log, so enqueues to known logs never
//! contend with each other.
//!
//! The first reference to a new name is the one exception: the insert takes
//! the map's write lock, and enqueues to every log wait for that insert.
//! Queue allocation and the duplicate check happen before the upgrade, so
//! the exclusive section is a single `HashMap` insert.

use super::log_entry::LogEntry;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// FIFO queue of pending entries for one log
#[derive(Debug)]
pub struct LogQueue {
    sender: Sender<LogEntry>,
    receiver: Receiver<LogEntry>,
}

impl LogQueue {
    fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    #[inline]
    pub fn push(&self, entry: LogEntry) {
        // The queue owns both ends, so the channel cannot disconnect
        let _ = self.sender.send(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Dequeue the entries present when the drain starts, oldest first
    ///
    /// Entries pushed while the drain runs stay queued for the next one.
    /// Must only be called under the flush guard.
    pub(crate) fn drain(&self) -> Vec<LogEntry> {
        let pending = self.receiver.len();
        let mut batch = Vec::with_capacity(pending);
        while batch.len() < pending {
            match self.receiver.try_recv() {
                Ok(entry) => batch.push(entry),
                Err(_) => break,
            }
        }
        batch
    }
}

/// Mapping from log name to its queue
///
/// Queues are created on first reference and live as long as the registry.
#[derive(Debug, Default)]
pub struct LogRegistry {
    queues: RwLock<HashMap<String, Arc<LogQueue>>>,
}

impl LogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the queue for `log_name`, creating it on first use
    ///
    /// Concurrent first references serialize on the upgradable lock, which
    /// still admits readers; the loser finds the winner's queue, so exactly
    /// one is created. Only the final insert excludes other enqueues.
    pub fn queue(&self, log_name: &str) -> Arc<LogQueue> {
        if let Some(queue) = self.queues.read().get(log_name) {
            return Arc::clone(queue);
        }

        let queues = self.queues.upgradable_read();
        if let Some(queue) = queues.get(log_name) {
            return Arc::clone(queue);
        }

        let queue = Arc::new(LogQueue::new());
        let name = log_name.to_string();
        RwLockUpgradableReadGuard::upgrade(queues).insert(name, Arc::clone(&queue));
        queue
    }

    #[inline]
    pub fn enqueue(&self, log_name: &str, entry: LogEntry) {
        self.queue(log_name).push(entry);
    }

    /// Queue handles for every known log, taken under a brief read lock
    pub fn snapshot(&self) -> Vec<(String, Arc<LogQueue>)> {
        self.queues
            .read()
            .iter()
            .map(|(name, queue)| (name.clone(), Arc::clone(queue)))
            .collect()
    }

    pub fn contains(&self, log_name: &str) -> bool {
        self.queues.read().contains_key(log_name)
    }

    pub fn len(&self) -> usize {
        self.queues.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.read().is_empty()
    }

    pub fn log_names(&self) -> Vec<String> {
        self.queues.read().keys().cloned().collect()
    }

    /// Number of entries waiting in `log_name`, 0 for unknown logs
    pub fn pending(&self, log_name: &str) -> usize {
        self.queues
            .read()
            .get(log_name)
            .map_or(0, |queue| queue.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Origin;
    use std::thread;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(message, Origin::unknown())
    }

    #[test]
    fn test_lazy_creation() {
        let registry = LogRegistry::new();
        assert!(registry.is_empty());

        registry.enqueue("app", entry("one"));
        assert!(registry.contains("app"));
        assert!(!registry.contains("audit"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_queue_instance_per_name() {
        let registry = LogRegistry::new();
        let first = registry.queue("app");
        let second = registry.queue("app");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_drain_is_fifo() {
        let registry = LogRegistry::new();
        for i in 0..10 {
            registry.enqueue("app", entry(&format!("m{}", i)));
        }

        let batch = registry.queue("app").drain();
        let messages: Vec<&str> = batch.iter().map(|e| e.message()).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("m{}", i)).collect();
        assert_eq!(messages, expected);
        assert_eq!(registry.pending("app"), 0);
    }

    #[test]
    fn test_drain_empty_queue() {
        let registry = LogRegistry::new();
        assert!(registry.queue("app").drain().is_empty());
    }

    #[test]
    fn test_pending_unknown_log() {
        let registry = LogRegistry::new();
        assert_eq!(registry.pending("nope"), 0);
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn test_concurrent_first_reference_creates_one_queue() {
        let registry = Arc::new(LogRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.queue("shared"))
            })
            .collect();

        let queues: Vec<Arc<LogQueue>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(registry.len(), 1);
        for queue in &queues[1..] {
            assert!(Arc::ptr_eq(&queues[0], queue));
        }
    }

    #[test]
    fn test_known_log_enqueues_during_pending_creation() {
        let registry = Arc::new(LogRegistry::new());
        registry.enqueue("app", entry("before"));

        // Hold the lock a first reference takes while checking for duplicates
        let creating = registry.queues.upgradable_read();

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let producer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.enqueue("app", entry("during"));
                let _ = done_tx.send(());
            })
        };

        let finished = done_rx.recv_timeout(std::time::Duration::from_secs(5));
        drop(creating);
        producer.join().unwrap();

        assert!(finished.is_ok(), "enqueue to a known log waited on creation");
        assert_eq!(registry.pending("app"), 2);
    }

    #[test]
    fn test_snapshot_lists_every_log() {
        let registry = LogRegistry::new();
        registry.enqueue("a", entry("1"));
        registry.enqueue("b", entry("2"));

        let mut names: Vec<String> = registry.snapshot().into_iter().map(|(n, _)| n).collect();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
