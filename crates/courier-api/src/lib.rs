//! # courier-api
//!
//! REST API server: accounts, authentication, the contact list, and
//! durable message history. Live delivery is the relay's job.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
