//! Schema types for the relay wire protocol
//!
//! Messages are producer-shaped: beyond the identity fields the relay does
//! not interpret payload structure, and unknown fields round-trip verbatim.

mod message;
mod read_record;

pub use message::RelayMessage;
pub use read_record::ReadRecord;
