//! Bounded, insertion-ordered message store
//!
//! The mailbox retains the newest [`MESSAGE_CAPACITY`] messages in strict
//! append order. When an append pushes the store over capacity, entries are
//! evicted from the head, oldest first, with no priority or pinning. The
//! capacity constant is part of the wire contract and must not change.

use crate::schema::RelayMessage;
use std::collections::VecDeque;

/// Maximum number of messages retained. Fixed by the external contract.
pub const MESSAGE_CAPACITY: usize = 100;

/// Bounded FIFO store of relay messages
///
/// Indices are positional only and never identify a message; eviction
/// shifts every surviving message down one slot, exactly as consumers of
/// the original protocol observed.
#[derive(Debug)]
pub struct Mailbox {
    entries: VecDeque<RelayMessage>,
    capacity: usize,
}

impl Mailbox {
    /// Create a mailbox with the contractual capacity of [`MESSAGE_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(MESSAGE_CAPACITY)
    }

    /// Create a mailbox with a non-standard capacity.
    ///
    /// Only embeddings and tests should use this; the wire contract fixes
    /// the capacity at [`MESSAGE_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message at the tail, evicting from the head if the store
    /// would exceed capacity. Returns the message's position.
    ///
    /// Never fails; eviction is unconditional FIFO.
    pub fn append(&mut self, message: RelayMessage) -> usize {
        self.entries.push_back(message);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                tracing::trace!(uuid = %evicted.uuid, "evicted oldest message at capacity");
            }
        }
        self.entries.len() - 1
    }

    /// Snapshot of every retained message, oldest first.
    pub fn all(&self) -> Vec<RelayMessage> {
        self.entries.iter().cloned().collect()
    }

    /// The last `n` messages, oldest-first among those returned.
    ///
    /// Returns everything when `n` is absent or at least the store size.
    pub fn recent(&self, n: Option<usize>) -> Vec<RelayMessage> {
        let len = self.entries.len();
        let take = n.unwrap_or(len).min(len);
        self.entries.iter().skip(len - take).cloned().collect()
    }

    /// Look up a message by uuid. With duplicate uuids the oldest match wins.
    pub fn by_id(&self, uuid: &str) -> Option<&RelayMessage> {
        self.entries.iter().find(|m| m.uuid == uuid)
    }

    /// The most recently appended message.
    pub fn latest(&self) -> Option<&RelayMessage> {
        self.entries.back()
    }

    /// Iterate retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RelayMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the store. Used for administrative resets.
    pub fn purge_all(&mut self) {
        self.entries.clear();
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn message(uuid: &str, text: &str) -> RelayMessage {
        RelayMessage {
            uuid: uuid.to_string(),
            computer_id: None,
            computer_label: None,
            message: Value::String(text.to_string()),
            extra: Map::new(),
        }
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut mailbox = Mailbox::new();
        mailbox.append(message("u1", "first"));
        mailbox.append(message("u2", "second"));

        let all = mailbox.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].uuid, "u1");
        assert_eq!(all[1].uuid, "u2");
    }

    #[test]
    fn append_returns_position() {
        let mut mailbox = Mailbox::new();
        assert_eq!(mailbox.append(message("u1", "a")), 0);
        assert_eq!(mailbox.append(message("u2", "b")), 1);
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut mailbox = Mailbox::new();
        for i in 0..MESSAGE_CAPACITY + 10 {
            mailbox.append(message(&format!("u{i}"), &format!("msg {i}")));
        }

        assert_eq!(mailbox.len(), MESSAGE_CAPACITY);
        let all = mailbox.all();
        assert_eq!(all[0].uuid, "u10");
        assert_eq!(all[MESSAGE_CAPACITY - 1].uuid, format!("u{}", MESSAGE_CAPACITY + 9));
    }

    #[test]
    fn hundred_and_first_append_evicts_exactly_the_oldest() {
        let mut mailbox = Mailbox::new();
        for i in 0..MESSAGE_CAPACITY {
            mailbox.append(message(&format!("u{i}"), "x"));
        }
        mailbox.append(message("u-new", "x"));

        assert_eq!(mailbox.len(), MESSAGE_CAPACITY);
        assert!(mailbox.by_id("u0").is_none());
        assert!(mailbox.by_id("u1").is_some());
        assert_eq!(mailbox.latest().unwrap().uuid, "u-new");
    }

    #[test]
    fn recent_returns_tail_oldest_first() {
        let mut mailbox = Mailbox::new();
        for i in 0..20 {
            mailbox.append(message(&format!("u{i}"), "x"));
        }

        let recent = mailbox.recent(Some(5));
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].uuid, "u15");
        assert_eq!(recent[4].uuid, "u19");
    }

    #[test]
    fn recent_without_count_returns_all() {
        let mut mailbox = Mailbox::new();
        for i in 0..3 {
            mailbox.append(message(&format!("u{i}"), "x"));
        }
        assert_eq!(mailbox.recent(None).len(), 3);
        assert_eq!(mailbox.recent(Some(50)).len(), 3);
    }

    #[test]
    fn by_id_finds_oldest_match() {
        let mut mailbox = Mailbox::new();
        mailbox.append(message("dup", "first"));
        mailbox.append(message("dup", "second"));

        let found = mailbox.by_id("dup").unwrap();
        assert_eq!(found.message, Value::String("first".to_string()));
    }

    #[test]
    fn latest_and_empty() {
        let mut mailbox = Mailbox::new();
        assert!(mailbox.latest().is_none());
        mailbox.append(message("u1", "a"));
        mailbox.append(message("u2", "b"));
        assert_eq!(mailbox.latest().unwrap().uuid, "u2");
    }

    #[test]
    fn purge_all_empties_the_store() {
        let mut mailbox = Mailbox::new();
        mailbox.append(message("u1", "a"));
        mailbox.purge_all();
        assert!(mailbox.is_empty());
        assert!(mailbox.all().is_empty());
    }
}
