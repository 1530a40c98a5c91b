//! Router construction and HTTP serving

use crate::handlers;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::info;
use turtle_relay_core::config::RelayConfig;

/// Build the relay router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/message",
            post(handlers::post_message).get(handlers::get_message),
        )
        .route("/api/message/{uuid}", get(handlers::get_message_by_uuid))
        .route("/api/messages", get(handlers::get_messages))
        .route("/api/time", get(handlers::get_time))
        .route("/api/admin/purge", post(handlers::purge))
        .route("/test", get(handlers::liveness))
        .with_state(state)
}

/// Bind and serve until the cancellation token fires.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &RelayConfig, cancel: CancellationToken) -> Result<()> {
    let state = AppState::new();
    let app = router(state);
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("relay listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("HTTP server failed")
}
