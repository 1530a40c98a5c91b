//! Core mailbox state for turtle-relay
//!
//! This crate implements the store-and-forward heart of the relay: a
//! bounded, insertion-ordered message store with a parallel per-message
//! read tracker, plus the query operations that answer "give me a message"
//! and "give me up to N unread messages" with exactly-once-per-computer
//! semantics.
//!
//! All state is in-memory and volatile. The retained window is the newest
//! [`MESSAGE_CAPACITY`] messages; older entries are evicted FIFO together
//! with their read records so the two stores never drift apart.

pub mod config;
pub mod error;
pub mod home;
pub mod ingest;
pub mod logging;
pub mod mailbox;
pub mod relay;
pub mod schema;
pub mod tracker;

pub use error::RelayError;
pub use mailbox::{Mailbox, MESSAGE_CAPACITY};
pub use relay::Relay;
pub use schema::{ReadRecord, RelayMessage};
pub use tracker::ReadTracker;
