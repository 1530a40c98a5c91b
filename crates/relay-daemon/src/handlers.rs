//! Route handlers mapping relay results to the wire protocol
//!
//! The client ecosystem inspects response bodies only, so every endpoint
//! answers HTTP 200 and signals failure as `{"status": "error"}` in the
//! body. An empty poll (`NoUnread`) reports `{"status": "ok"}`: nothing to
//! read is not an error from the consumer's point of view.

use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use turtle_relay_core::{RelayError, RelayMessage};

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub computer_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub number: Option<usize>,
    pub computer_id: Option<i64>,
}

fn status_ok() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn status_error() -> Json<Value> {
    Json(json!({"status": "error"}))
}

fn message_body(message: &RelayMessage) -> Json<Value> {
    match serde_json::to_value(message) {
        Ok(value) => Json(value),
        Err(err) => {
            debug!(%err, "message serialization failed");
            status_error()
        }
    }
}

/// `POST /api/message` — wrapped-JSON ingest.
///
/// The body is read raw and parsed here rather than through the `Json`
/// extractor so that a malformed body still yields the contractual
/// `{"status": "error"}` rather than a framework 4xx.
pub async fn post_message(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "request body is not JSON");
            return status_error();
        }
    };

    let mut relay = state.relay.lock().await;
    match relay.ingest(&raw) {
        Ok(_) => status_ok(),
        Err(err) => {
            debug!(%err, "message rejected");
            status_error()
        }
    }
}

/// `GET /api/message` — oldest unread for `computer_id`, marking it read;
/// with no `computer_id`, the most recently posted message.
pub async fn get_message(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Json<Value> {
    let mut relay = state.relay.lock().await;
    match relay.get_one(None, params.computer_id) {
        Ok(message) => message_body(&message),
        Err(RelayError::NoUnread { computer_id }) => {
            debug!(computer_id, "nothing unread");
            status_ok()
        }
        Err(err) => {
            debug!(%err, "single fetch failed");
            status_error()
        }
    }
}

/// `GET /api/message/{uuid}` — fetch by uuid, marking it read when a
/// `computer_id` is supplied.
pub async fn get_message_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<FetchParams>,
) -> Json<Value> {
    let mut relay = state.relay.lock().await;
    match relay.get_one(Some(&uuid), params.computer_id) {
        Ok(message) => message_body(&message),
        Err(err) => {
            debug!(%uuid, %err, "uuid fetch failed");
            status_error()
        }
    }
}

/// `GET /api/messages` — up to `number` messages, unread-only when a
/// `computer_id` is supplied. Always an array, possibly empty.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<RelayMessage>> {
    let mut relay = state.relay.lock().await;
    Json(relay.get_many(params.number, params.computer_id))
}

/// `GET /api/time` — current UTC time, ISO-8601. Turtles have no clock of
/// their own worth trusting.
pub async fn get_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `GET /test` — liveness probe.
pub async fn liveness() -> &'static str {
    "test"
}

/// `POST /api/admin/purge` — drop all state. Administrative/test reset,
/// not part of the public wire protocol.
pub async fn purge(State(state): State<AppState>) -> Json<Value> {
    state.relay.lock().await.purge_all();
    status_ok()
}
