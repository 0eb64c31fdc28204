//! # courier-relay
//!
//! WebSocket relay server: tracks which users are reachable over a live
//! connection and routes point-to-point messages to them, best effort.

pub mod connection;
pub mod delivery;
pub mod handlers;
pub mod presence;
pub mod protocol;
pub mod server;

pub use server::{create_app, run, RelayState};
