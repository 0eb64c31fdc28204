//! Route definitions
//!
//! All API routes organized by domain. Paths follow the shapes the
//! bundled web client already calls.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, messages, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(message_routes())
}

/// Health check routes (exported separately to bypass the middleware stack)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication and user routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/user", get(users::get_current_user))
        .route("/auth/fetch-user", get(users::fetch_users))
}

/// Message history routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages/addmsg", post(messages::add_message))
        .route("/messages/getmsg", get(messages::get_messages))
}
