//! WebSocket handler
//!
//! Accepts WebSocket upgrades and runs the per-connection pumps.

use crate::connection::Connection;
use crate::protocol::Frame;
use crate::server::RelayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Channel buffer size for outgoing frames
const FRAME_BUFFER_SIZE: usize = 100;

/// WebSocket relay handler
pub async fn relay_handler(
    State(state): State<RelayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: RelayState, socket: axum::extract::ws::WebSocket) {
    let session_id = Uuid::new_v4().to_string();

    // Create frame channel for outgoing traffic
    let (tx, mut rx) = mpsc::channel::<Frame>(FRAME_BUFFER_SIZE);

    // Register connection
    let connection = Arc::new(Connection::new(session_id.clone(), tx));
    state
        .connection_manager()
        .add_connection(Arc::clone(&connection));

    tracing::info!(session_id = %session_id, "WebSocket connection established");

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone for the receive task
    let state_recv = state.clone();
    let session_id_recv = session_id.clone();
    let connection_recv = Arc::clone(&connection);

    // Spawn task to receive frames from the WebSocket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %session_id_recv,
                        "Ignoring binary message"
                    );
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Clone for the send task
    let session_id_send = session_id.clone();

    // Spawn task to push frames to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::warn!(
                            session_id = %session_id_send,
                            "Failed to send frame to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_send,
                        error = %e,
                        "Failed to serialize outgoing frame"
                    );
                }
            }
        }

        // Close the WebSocket when the channel is closed
        let _ = ws_sink.close().await;
    });

    // Either pump ending tears the session down
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    // Clean up: runs exactly once per session regardless of which pump
    // ended first
    tracing::info!(session_id = %session_id, "Cleaning up connection");
    state
        .connection_manager()
        .remove_connection(&session_id)
        .await;
}

/// Handle a text frame from the client
async fn handle_text_message(state: &RelayState, connection: &Arc<Connection>, text: &str) {
    let frame = match Frame::from_json(text) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(
                session_id = %connection.session_id(),
                error = %e,
                "Dropping malformed frame"
            );
            return;
        }
    };

    tracing::trace!(
        session_id = %connection.session_id(),
        event = %frame.event,
        "Received frame"
    );

    if let Err(e) = state.dispatcher().dispatch(connection, frame).await {
        tracing::warn!(
            session_id = %connection.session_id(),
            error = %e,
            "Handler error"
        );
    }
}
