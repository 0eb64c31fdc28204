//! Connection state and lifecycle

mod connection;
mod manager;

pub use connection::{Connection, SessionState};
pub use manager::ConnectionManager;
