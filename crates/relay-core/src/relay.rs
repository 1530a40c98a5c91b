//! Relay state and query operations
//!
//! [`Relay`] owns the mailbox and read tracker as one unit so that every
//! mutation keeps them aligned: `len(mailbox) == len(tracker)` holds after
//! each operation, and read-marking happens only as a side effect of a
//! fetch that is actually delivered to a consumer.
//!
//! The caller is responsible for serializing access (the daemon holds one
//! mutex around the whole `Relay`); nothing here blocks or suspends.

use crate::error::RelayError;
use crate::ingest;
use crate::mailbox::Mailbox;
use crate::schema::{ReadRecord, RelayMessage};
use crate::tracker::ReadTracker;
use serde_json::Value;

/// The store-and-forward mailbox state
///
/// One instance per process, owned by the service and injected into the
/// transport layer. State is volatile and resets on restart.
#[derive(Debug, Default)]
pub struct Relay {
    mailbox: Mailbox,
    readers: ReadTracker,
}

impl Relay {
    pub fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            readers: ReadTracker::new(),
        }
    }

    /// Append a well-formed message and create its read record in one step.
    ///
    /// The record is seeded with the producer's `computer_id` when present.
    /// Both stores evict together, so the alignment invariant survives the
    /// append that pushes the mailbox over capacity.
    pub fn log_message(&mut self, message: RelayMessage) -> usize {
        let uuid = message.uuid.clone();
        let producer = message.computer_id;
        let position = self.mailbox.append(message);
        self.readers.register(&uuid, producer);
        self.readers.evict_to_match(self.mailbox.len());
        debug_assert_eq!(self.mailbox.len(), self.readers.len());
        position
    }

    /// Normalize a raw wrapped submission and admit it to the mailbox.
    ///
    /// On rejection nothing is stored and the state is untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`RelayError::ParseFailure`] and
    /// [`RelayError::MissingContent`] from normalization.
    pub fn ingest(&mut self, raw: &Value) -> Result<RelayMessage, RelayError> {
        let message = ingest::normalize(raw)?;
        tracing::debug!(uuid = %message.uuid, "message accepted");
        self.log_message(message.clone());
        Ok(message)
    }

    /// Fetch a single message.
    ///
    /// * With a `uuid`: return that message, marking it read by `computer_id`
    ///   when one is given.
    /// * With only a `computer_id`: return the oldest message the computer
    ///   has not read yet and mark it read.
    /// * With neither: return the most recently appended message, without
    ///   marking anything.
    ///
    /// # Errors
    ///
    /// * [`RelayError::NotFound`] — unknown uuid, or empty mailbox in the
    ///   no-argument mode.
    /// * [`RelayError::NoUnread`] — nothing left unread for `computer_id`.
    pub fn get_one(
        &mut self,
        uuid: Option<&str>,
        computer_id: Option<i64>,
    ) -> Result<RelayMessage, RelayError> {
        if let Some(uuid) = uuid {
            let message = self.mailbox.by_id(uuid).cloned().ok_or(RelayError::NotFound)?;
            if let Some(reader) = computer_id {
                self.readers.mark_read(uuid, reader);
            }
            return Ok(message);
        }

        if let Some(reader) = computer_id {
            let message = self
                .mailbox
                .iter()
                .find(|m| !self.readers.has_read(&m.uuid, reader))
                .cloned()
                .ok_or(RelayError::NoUnread {
                    computer_id: reader,
                })?;
            self.readers.mark_read(&message.uuid, reader);
            return Ok(message);
        }

        self.mailbox.latest().cloned().ok_or(RelayError::NotFound)
    }

    /// Fetch up to `limit` messages.
    ///
    /// With a `computer_id`, unread messages are selected in insertion
    /// order, the oldest `limit` of them are returned, and exactly those
    /// are marked read; a later call with the same computer continues
    /// where this one stopped. Without a `computer_id`, the most recent
    /// `limit` messages are returned unfiltered and nothing is marked.
    ///
    /// Never fails: an empty result is an empty vector.
    pub fn get_many(
        &mut self,
        limit: Option<usize>,
        computer_id: Option<i64>,
    ) -> Vec<RelayMessage> {
        let Some(reader) = computer_id else {
            return self.mailbox.recent(limit);
        };

        let mut unread: Vec<RelayMessage> = self
            .mailbox
            .iter()
            .filter(|m| !self.readers.has_read(&m.uuid, reader))
            .cloned()
            .collect();
        if let Some(limit) = limit {
            unread.truncate(limit);
        }
        for message in &unread {
            self.readers.mark_read(&message.uuid, reader);
        }
        unread
    }

    /// Snapshot of every retained message, oldest first.
    pub fn all_messages(&self) -> Vec<RelayMessage> {
        self.mailbox.all()
    }

    /// Snapshot of the read records, same order as the messages.
    pub fn read_records(&self) -> Vec<ReadRecord> {
        self.readers.all()
    }

    pub fn len(&self) -> usize {
        self.mailbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mailbox.is_empty()
    }

    /// Drop every message and read record. Administrative reset only.
    pub fn purge_all(&mut self) {
        self.mailbox.purge_all();
        self.readers.purge_all();
        tracing::debug!("mailbox purged");
    }
}
