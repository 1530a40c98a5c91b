//! Producer payload normalization
//!
//! One client ecosystem cannot POST a JSON body directly: its HTTP API
//! serializes the real payload and uses that string as the sole key of an
//! outer object, with an ignored value. So a producer sending
//! `{"message": "hi"}` actually delivers `{"{\"message\":\"hi\"}": ""}`.
//!
//! [`normalize`] unwraps that envelope, validates the payload, and repairs
//! missing identity fields. Parse failures and missing content are hard
//! rejections: nothing partial is ever admitted to the mailbox.

use crate::error::RelayError;
use crate::schema::RelayMessage;
use serde_json::Value;
use uuid::Uuid;

/// Sentinel id for messages whose producer did not identify itself.
/// In-game computer ids are non-negative, so -1 never names a consumer.
pub const UNKNOWN_COMPUTER_ID: i64 = -1;

/// Label used when the producer did not supply one.
pub const UNKNOWN_COMPUTER_LABEL: &str = "unknown";

/// Turn a raw wrapped submission into a well-formed [`RelayMessage`].
///
/// # Errors
///
/// * [`RelayError::ParseFailure`] — the envelope is not an object, no key
///   decodes as JSON, or the payload is not itself an object.
/// * [`RelayError::MissingContent`] — the payload has no `message` field
///   (no content means no message; identity fields are repairable, content
///   is not).
pub fn normalize(raw: &Value) -> Result<RelayMessage, RelayError> {
    let payload = unwrap_envelope(raw)?;

    let Value::Object(mut fields) = payload else {
        return Err(RelayError::ParseFailure {
            reason: "payload is not a JSON object".to_string(),
        });
    };

    match fields.get("message") {
        None | Some(Value::Null) => return Err(RelayError::MissingContent),
        Some(_) => {}
    }

    if !fields.contains_key("uuid") {
        fields.insert(
            "uuid".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
    }
    if !fields.contains_key("computer_id") {
        fields.insert("computer_id".to_string(), Value::from(UNKNOWN_COMPUTER_ID));
    }
    if !fields.contains_key("computer_label") {
        fields.insert(
            "computer_label".to_string(),
            Value::String(UNKNOWN_COMPUTER_LABEL.to_string()),
        );
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| RelayError::ParseFailure {
        reason: e.to_string(),
    })
}

/// Locate the envelope key that holds the serialized payload and parse it.
///
/// Keys are tried in order; the first one that decodes as JSON wins.
fn unwrap_envelope(raw: &Value) -> Result<Value, RelayError> {
    let outer = raw.as_object().ok_or_else(|| RelayError::ParseFailure {
        reason: "expected a JSON object envelope".to_string(),
    })?;

    for key in outer.keys() {
        if let Ok(payload) = serde_json::from_str::<Value>(key) {
            return Ok(payload);
        }
    }

    Err(RelayError::ParseFailure {
        reason: "no envelope key decodes as JSON".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Build the wrapped form a producer actually sends.
    fn wrap(payload: &Value) -> Value {
        let mut outer = serde_json::Map::new();
        outer.insert(payload.to_string(), Value::String(String::new()));
        Value::Object(outer)
    }

    #[test]
    fn unwraps_a_wrapped_payload() {
        let raw = wrap(&json!({"message": "test message"}));
        let msg = normalize(&raw).unwrap();
        assert_eq!(msg.message, json!("test message"));
    }

    #[test]
    fn rejects_truncated_envelope_key() {
        // Trailing brace missing, exactly the corruption seen in the field.
        let raw = json!({"{\"message\":\"test message\"": ""});
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, RelayError::ParseFailure { .. }));
    }

    #[test]
    fn rejects_non_object_envelope() {
        let err = normalize(&json!("not an object")).unwrap_err();
        assert!(matches!(err, RelayError::ParseFailure { .. }));
    }

    #[test]
    fn rejects_non_object_payload() {
        let raw = wrap(&json!(["an", "array"]));
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, RelayError::ParseFailure { .. }));
    }

    #[test]
    fn rejects_payload_without_content() {
        let raw = wrap(&json!({"uuid": "u1", "computer_id": 11, "computer_label": "Miner"}));
        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, RelayError::MissingContent));
    }

    #[test]
    fn fills_missing_identity_fields() {
        let raw = wrap(&json!({"message": "hi"}));
        let msg = normalize(&raw).unwrap();

        assert!(!msg.uuid.is_empty());
        assert_eq!(msg.computer_id, Some(UNKNOWN_COMPUTER_ID));
        assert_eq!(msg.computer_label.as_deref(), Some(UNKNOWN_COMPUTER_LABEL));
        assert_eq!(msg.message, json!("hi"));
    }

    #[test]
    fn generated_uuids_are_unique() {
        let raw = wrap(&json!({"message": "hi"}));
        let a = normalize(&raw).unwrap();
        let b = normalize(&raw).unwrap();
        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn keeps_caller_supplied_identity() {
        let raw = wrap(&json!({
            "uuid": "u-keep",
            "computer_id": 7,
            "computer_label": "Quarry",
            "message": "done"
        }));
        let msg = normalize(&raw).unwrap();
        assert_eq!(msg.uuid, "u-keep");
        assert_eq!(msg.computer_id, Some(7));
        assert_eq!(msg.computer_label.as_deref(), Some("Quarry"));
    }

    #[test]
    fn preserves_extra_payload_fields() {
        let raw = wrap(&json!({
            "message": "hi",
            "position": {"x": 1, "y": 2, "z": 3}
        }));
        let msg = normalize(&raw).unwrap();
        assert_eq!(msg.extra.get("position"), Some(&json!({"x": 1, "y": 2, "z": 3})));
    }
}
