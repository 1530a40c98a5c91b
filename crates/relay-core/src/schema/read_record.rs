//! Per-message read-state schema

use serde::{Deserialize, Serialize};

/// Which computers have already received a given message
///
/// `read` is an insertion-ordered set: a computer id appears at most once,
/// in the order the reads happened. Exactly one record exists per retained
/// message, created at the instant the message is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRecord {
    /// uuid of the message this record tracks
    pub uuid: String,

    /// Computer ids that have received the message, oldest first
    pub read: Vec<i64>,
}

impl ReadRecord {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            read: Vec::new(),
        }
    }
}
