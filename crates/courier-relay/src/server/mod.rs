//! Relay server setup
//!
//! Provides the WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::relay_handler;
pub use state::RelayState;

use crate::connection::ConnectionManager;
use axum::{routing::get, Router};
use courier_common::{AppConfig, AppError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the relay router
pub fn create_router() -> Router<RelayState> {
    Router::new()
        .route("/relay", get(relay_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: RelayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server bound to the given address
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting relay server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Relay listening on ws://{}/relay", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete relay server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.relay.port));

    let connection_manager = Arc::new(ConnectionManager::new());
    let state = RelayState::new(connection_manager, config);
    let app = create_app(state);

    run_server(app, addr).await
}
