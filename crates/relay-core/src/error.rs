//! Error types for relay operations

use thiserror::Error;

/// Errors that can occur while ingesting or fetching messages
///
/// All variants are recoverable at the request boundary: they describe a
/// single failed request and never leave the mailbox or read tracker in an
/// inconsistent state.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Envelope or payload could not be decoded as JSON
    #[error("malformed message payload: {reason}")]
    ParseFailure { reason: String },

    /// Payload parsed but carries no message content
    #[error("payload has no message content")]
    MissingContent,

    /// No retained message matches the requested uuid (or the store is empty)
    #[error("message not found")]
    NotFound,

    /// Every retained message has already been read by this computer
    #[error("no unread messages for computer {computer_id}")]
    NoUnread { computer_id: i64 },
}
