use std::sync::Arc;

use crate::connection::{Connection, ConnectionManager};
use crate::protocol::Frame;

use super::error::HandlerError;

/// Handles `bind` frames: attaches a user identity to the session and
/// publishes it in the presence registry.
///
/// The announced identity is taken at face value. Verifying it against
/// an authenticated principal would slot in here, before `bind_user`.
pub struct BindHandler {
    manager: Arc<ConnectionManager>,
}

impl BindHandler {
    #[must_use]
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    pub async fn handle(
        &self,
        connection: &Arc<Connection>,
        frame: &Frame,
    ) -> Result<(), HandlerError> {
        let payload = frame.as_bind()?;
        let session_id = connection.session_id();

        if self.manager.bind_user(session_id, payload.user_id).await {
            tracing::info!(
                session_id = %session_id,
                user_id = %payload.user_id,
                "Session bound"
            );
            Ok(())
        } else {
            Err(HandlerError::UnknownSession(session_id.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::UserId;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn setup() -> (Arc<ConnectionManager>, Arc<Connection>, mpsc::Receiver<Frame>) {
        let manager = Arc::new(ConnectionManager::new());
        let (tx, rx) = mpsc::channel(8);
        let conn = Arc::new(Connection::new("s1".into(), tx));
        manager.add_connection(Arc::clone(&conn));
        (manager, conn, rx)
    }

    fn bind_frame(user: UserId) -> Frame {
        Frame {
            event: crate::protocol::EventKind::Bind,
            data: Some(json!({ "userId": user })),
        }
    }

    #[tokio::test]
    async fn test_bind_registers_presence() {
        let (manager, conn, _rx) = setup();
        let user = UserId::new();
        let handler = BindHandler::new(Arc::clone(&manager));

        handler.handle(&conn, &bind_frame(user)).await.unwrap();

        assert!(conn.is_bound().await);
        assert!(manager.registry().is_online(user));
    }

    #[tokio::test]
    async fn test_bind_with_bad_payload_is_rejected() {
        let (manager, conn, _rx) = setup();
        let handler = BindHandler::new(manager);

        let frame = Frame {
            event: crate::protocol::EventKind::Bind,
            data: Some(json!({ "userId": "not-a-uuid" })),
        };
        assert!(matches!(
            handler.handle(&conn, &frame).await,
            Err(HandlerError::InvalidPayload(_))
        ));
        assert!(!conn.is_bound().await);
    }

    #[tokio::test]
    async fn test_bind_on_removed_session_fails() {
        let (manager, conn, _rx) = setup();
        manager.remove_connection("s1").await;
        let handler = BindHandler::new(manager);

        assert!(matches!(
            handler.handle(&conn, &bind_frame(UserId::new())).await,
            Err(HandlerError::UnknownSession(_))
        ));
    }
}
