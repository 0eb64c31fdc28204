//! Delivery gateway
//!
//! The one place that pushes frames into a peer connection's outbound
//! channel. Delivery is best effort: success means the frame was
//! queued for the write pump, not that the client read it.

use std::sync::Arc;

use crate::connection::Connection;
use crate::protocol::Frame;

/// Result of attempting to hand a frame to a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Frame queued on the outbound channel
    Sent,
    /// Write pump is gone; the connection is being torn down
    ChannelClosed,
}

/// Stateless frame emitter over connection outbound channels
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryGateway;

impl DeliveryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Push a frame toward a connection's write pump
    pub async fn emit(&self, connection: &Arc<Connection>, frame: Frame) -> DeliveryOutcome {
        match connection.send(frame).await {
            Ok(()) => DeliveryOutcome::Sent,
            Err(_) => {
                tracing::warn!(
                    session_id = %connection.session_id(),
                    "Delivery failed, outbound channel closed"
                );
                DeliveryOutcome::ChannelClosed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DeliveryStatus;
    use courier_core::UserId;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_emit_queues_frame() {
        let (tx, mut rx) = mpsc::channel(8);
        let conn = Arc::new(Connection::new("s1".into(), tx));
        let gateway = DeliveryGateway::new();

        let outcome = gateway
            .emit(&conn, Frame::receive("hi".into(), UserId::new()))
            .await;
        assert_eq!(outcome, DeliveryOutcome::Sent);

        let frame = rx.recv().await.unwrap();
        assert_eq!(frame.event, crate::protocol::EventKind::ReceiveMessage);
    }

    #[tokio::test]
    async fn test_emit_reports_closed_channel() {
        let (tx, rx) = mpsc::channel(8);
        let conn = Arc::new(Connection::new("s1".into(), tx));
        drop(rx);

        let outcome = DeliveryGateway::new()
            .emit(&conn, Frame::ack(DeliveryStatus::Delivered))
            .await;
        assert_eq!(outcome, DeliveryOutcome::ChannelClosed);
    }
}
