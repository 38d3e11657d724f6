//! In-memory FIFO of records awaiting delivery.
//!
//! The queue is owned exclusively by one client instance and only ever
//! mutated under a lock held for the duration of a single operation; delivery
//! I/O never happens while the lock is held. Flushing takes the whole queue
//! in one swap ([`RecordQueue::drain`]), so overlapping flush triggers can
//! never see the same record twice.
//!
//! # Requeue Bound
//!
//! A failed snapshot is reinserted at the front of the queue, ahead of
//! anything appended while it was in flight, preserving its internal order.
//! The reinsert is applied only if the resulting queue stays within twice the
//! configured batch size; beyond that the snapshot is dropped, which caps
//! memory under a persistently failing endpoint.

use crate::record::LogRecord;

#[derive(Debug)]
pub(crate) struct RecordQueue {
    records: Vec<LogRecord>,
    /// Maximum queue length a requeue may produce (twice the batch size).
    requeue_limit: usize,
}

impl RecordQueue {
    pub(crate) fn new(batch_size: usize) -> Self {
        Self {
            records: Vec::new(),
            requeue_limit: batch_size.saturating_mul(2),
        }
    }

    /// Appends a record to the tail and returns the resulting length.
    pub(crate) fn push(&mut self, record: LogRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }

    /// Takes the entire queue in one swap, leaving it empty.
    pub(crate) fn drain(&mut self) -> Vec<LogRecord> {
        std::mem::take(&mut self.records)
    }

    /// Reinserts a failed snapshot at the front of the queue.
    ///
    /// Returns `false` without modifying the queue when the reinsert would
    /// grow it beyond the requeue limit; the caller drops the snapshot.
    pub(crate) fn requeue(&mut self, snapshot: Vec<LogRecord>) -> bool {
        if self.records.len() + snapshot.len() > self.requeue_limit {
            return false;
        }
        self.records.splice(0..0, snapshot);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of the current contents, oldest first.
    pub(crate) fn snapshot(&self) -> Vec<LogRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Fields, LogLevel};

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            LogLevel::Info,
            message.to_string(),
            "test".to_string(),
            Fields::new(),
        )
    }

    fn messages(records: &[LogRecord]) -> Vec<&str> {
        records.iter().map(|r| r.message.as_str()).collect()
    }

    #[test]
    fn test_push_returns_length() {
        let mut queue = RecordQueue::new(10);
        assert_eq!(queue.push(record("a")), 1);
        assert_eq!(queue.push(record("b")), 2);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = RecordQueue::new(10);
        queue.push(record("a"));
        queue.push(record("b"));

        let snapshot = queue.drain();

        assert_eq!(messages(&snapshot), vec!["a", "b"]);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_requeue_preserves_order_ahead_of_newer_records() {
        let mut queue = RecordQueue::new(10);
        queue.push(record("a"));
        queue.push(record("b"));
        let snapshot = queue.drain();

        // Records appended while the snapshot was in flight
        queue.push(record("c"));
        queue.push(record("d"));

        assert!(queue.requeue(snapshot));
        assert_eq!(messages(&queue.snapshot()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_requeue_rejected_beyond_twice_batch_size() {
        // batch_size 2 -> limit 4
        let mut queue = RecordQueue::new(2);
        for message in ["a", "b", "c"] {
            queue.push(record(message));
        }
        let snapshot = queue.drain();

        queue.push(record("d"));
        queue.push(record("e"));

        // 2 + 3 > 4: snapshot must be dropped, queue untouched
        assert!(!queue.requeue(snapshot));
        assert_eq!(messages(&queue.snapshot()), vec!["d", "e"]);
    }

    #[test]
    fn test_requeue_exactly_at_limit() {
        let mut queue = RecordQueue::new(2);
        queue.push(record("a"));
        queue.push(record("b"));
        let snapshot = queue.drain();

        queue.push(record("c"));
        queue.push(record("d"));

        // 2 + 2 == 4: allowed
        assert!(queue.requeue(snapshot));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut queue = RecordQueue::new(10);
        queue.push(record("a"));

        let mut copy = queue.snapshot();
        copy.clear();

        assert_eq!(queue.len(), 1);
    }
}
