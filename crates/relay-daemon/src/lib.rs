//! HTTP daemon for turtle-relay
//!
//! A thin transport shim around [`turtle_relay_core::Relay`]: routes,
//! request/response mapping, and process lifecycle. All mailbox semantics
//! live in the core crate.

pub mod handlers;
pub mod server;
pub mod state;
