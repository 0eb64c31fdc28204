use courier_core::UserId;
use tokio::sync::{mpsc, RwLock};

use crate::protocol::Frame;

/// Lifecycle of a relay session.
///
/// A session starts `Anonymous`, becomes `Bound` after a successful
/// `bind`, and ends `Closed`. `Closed` is terminal; no transition
/// leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket open, no user identity yet
    Anonymous,
    /// Identity announced, eligible to relay and receive
    Bound,
    /// Cleanup has run; the session is dead
    Closed,
}

/// One live WebSocket session.
///
/// Shared between the read pump, the connection manager, and any peer
/// task delivering frames to it. The write half of the socket is owned
/// by the write pump; everyone else talks to it through `sender`.
#[derive(Debug)]
pub struct Connection {
    session_id: String,
    user_id: RwLock<Option<UserId>>,
    state: RwLock<SessionState>,
    sender: mpsc::Sender<Frame>,
}

impl Connection {
    pub fn new(session_id: String, sender: mpsc::Sender<Frame>) -> Self {
        Self {
            session_id,
            user_id: RwLock::new(None),
            state: RwLock::new(SessionState::Anonymous),
            sender,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn user_id(&self) -> Option<UserId> {
        *self.user_id.read().await
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    pub async fn is_bound(&self) -> bool {
        self.state().await == SessionState::Bound
    }

    /// Record the bound identity. Rebinding overwrites the previous one.
    /// Has no effect on a closed session.
    pub async fn bind(&self, user_id: UserId) -> bool {
        let mut state = self.state.write().await;
        if *state == SessionState::Closed {
            return false;
        }
        *state = SessionState::Bound;
        *self.user_id.write().await = Some(user_id);
        true
    }

    /// Mark the session closed. Returns false if it already was, so the
    /// caller can keep cleanup single-shot.
    pub async fn close(&self) -> bool {
        let mut state = self.state.write().await;
        if *state == SessionState::Closed {
            return false;
        }
        *state = SessionState::Closed;
        true
    }

    /// Queue a frame for the write pump. Fails when the pump is gone.
    pub async fn send(&self, frame: Frame) -> Result<(), mpsc::error::SendError<Frame>> {
        self.sender.send(frame).await
    }

    /// Whether the outbound channel can still accept frames
    #[must_use]
    pub fn is_send_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> (Connection, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(8);
        (Connection::new("session-1".into(), tx), rx)
    }

    #[tokio::test]
    async fn test_starts_anonymous() {
        let (conn, _rx) = test_connection();
        assert_eq!(conn.state().await, SessionState::Anonymous);
        assert!(conn.user_id().await.is_none());
        assert!(!conn.is_bound().await);
    }

    #[tokio::test]
    async fn test_bind_transitions_to_bound() {
        let (conn, _rx) = test_connection();
        let user = UserId::new();

        assert!(conn.bind(user).await);
        assert_eq!(conn.state().await, SessionState::Bound);
        assert_eq!(conn.user_id().await, Some(user));
    }

    #[tokio::test]
    async fn test_rebind_overwrites_identity() {
        let (conn, _rx) = test_connection();
        let first = UserId::new();
        let second = UserId::new();

        conn.bind(first).await;
        conn.bind(second).await;
        assert_eq!(conn.user_id().await, Some(second));
    }

    #[tokio::test]
    async fn test_closed_is_terminal() {
        let (conn, _rx) = test_connection();

        assert!(conn.close().await);
        assert!(!conn.close().await);
        assert!(!conn.bind(UserId::new()).await);
        assert_eq!(conn.state().await, SessionState::Closed);
    }

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let (conn, rx) = test_connection();
        drop(rx);

        assert!(conn.is_send_closed());
        assert!(conn
            .send(Frame::ack(crate::protocol::DeliveryStatus::Delivered))
            .await
            .is_err());
    }
}
