//! Relay message schema

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message held by the relay on behalf of its consumers
///
/// Producers control the payload shape; only the identity fields below are
/// meaningful to the relay. Everything else the producer sends is kept in
/// `extra` and serialized back out unchanged, in its original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayMessage {
    /// Message identifier, caller-supplied or generated at ingest
    pub uuid: String,

    /// In-game id of the computer that produced the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_id: Option<i64>,

    /// Human-readable producer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_label: Option<String>,

    /// The actual content; opaque to the relay
    pub message: Value,

    /// Unknown fields, preserved for round-trip fidelity
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
