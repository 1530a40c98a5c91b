//! Per-message read-state tracking
//!
//! One [`ReadRecord`] exists for every retained message, in the same order
//! as the mailbox. Records are created when the message is appended and
//! evicted in lock-step with mailbox eviction.

use crate::schema::ReadRecord;
use std::collections::VecDeque;

/// Parallel store mapping each retained message to its reader set
#[derive(Debug, Default)]
pub struct ReadTracker {
    records: VecDeque<ReadRecord>,
}

impl ReadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the read record for a freshly appended message.
    ///
    /// When the producer's id is known it is seeded into the read set: the
    /// producer counts as having read its own message.
    pub fn register(&mut self, uuid: &str, initial_reader: Option<i64>) {
        let mut record = ReadRecord::new(uuid);
        if let Some(id) = initial_reader {
            record.read.push(id);
        }
        self.records.push_back(record);
    }

    /// Mark `uuid` as read by `computer_id`. Idempotent: a computer already
    /// in the read set is not re-added, and an unknown uuid is a no-op.
    pub fn mark_read(&mut self, uuid: &str, computer_id: i64) {
        if let Some(record) = self.records.iter_mut().find(|r| r.uuid == uuid)
            && !record.read.contains(&computer_id)
        {
            record.read.push(computer_id);
        }
    }

    /// Whether `computer_id` has already read the message with `uuid`.
    pub fn has_read(&self, uuid: &str, computer_id: i64) -> bool {
        self.records
            .iter()
            .find(|r| r.uuid == uuid)
            .is_some_and(|r| r.read.contains(&computer_id))
    }

    /// Reader ids for `uuid`, oldest first. `None` for an unknown uuid.
    pub fn readers_of(&self, uuid: &str) -> Option<&[i64]> {
        self.records
            .iter()
            .find(|r| r.uuid == uuid)
            .map(|r| r.read.as_slice())
    }

    /// Snapshot of every record, same order as the mailbox.
    pub fn all(&self) -> Vec<ReadRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop the oldest records until the count matches the mailbox again.
    ///
    /// Registration always happens in the same step as the append, so the
    /// stores stay positionally aligned and eviction is purely count-based.
    pub fn evict_to_match(&mut self, mailbox_len: usize) {
        while self.records.len() > mailbox_len {
            self.records.pop_front();
        }
    }

    pub fn purge_all(&mut self) {
        self.records.clear();
    }
}
