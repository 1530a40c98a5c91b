//! Shared daemon state

use std::sync::Arc;
use tokio::sync::Mutex;
use turtle_relay_core::Relay;

/// State handed to every request handler.
///
/// One mutex guards the whole mailbox + read-tracker pair: every mutation
/// must keep the two stores aligned, so all of them serialize on the same
/// lock. Critical sections are bounded synchronous work over at most the
/// retained window, so contention is not a concern.
#[derive(Clone, Default)]
pub struct AppState {
    pub relay: Arc<Mutex<Relay>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
