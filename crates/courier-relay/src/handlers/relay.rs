use std::sync::Arc;

use crate::connection::{Connection, ConnectionManager};
use crate::delivery::{DeliveryGateway, DeliveryOutcome};
use crate::protocol::{DeliveryStatus, Frame};

use super::error::HandlerError;

/// Handles `relay-message` frames: forwards the body to the recipient's
/// live connection and reports the outcome back to the sender.
///
/// Relaying requires a bound session; frames from anonymous sessions
/// are dropped without an ack. The message body is forwarded verbatim,
/// empty bodies included.
pub struct RelayHandler {
    manager: Arc<ConnectionManager>,
    gateway: DeliveryGateway,
}

impl RelayHandler {
    #[must_use]
    pub fn new(manager: Arc<ConnectionManager>, gateway: DeliveryGateway) -> Self {
        Self { manager, gateway }
    }

    pub async fn handle(
        &self,
        connection: &Arc<Connection>,
        frame: &Frame,
    ) -> Result<(), HandlerError> {
        let Some(sender_id) = connection.user_id().await else {
            tracing::warn!(
                session_id = %connection.session_id(),
                "Dropping relay-message from unbound session"
            );
            return Ok(());
        };

        let payload = frame.as_relay()?;

        let status = match self.manager.resolve(payload.to) {
            Some(recipient) => {
                let frame = Frame::receive(payload.message, sender_id);
                match self.gateway.emit(&recipient, frame).await {
                    DeliveryOutcome::Sent => DeliveryStatus::Delivered,
                    DeliveryOutcome::ChannelClosed => DeliveryStatus::RecipientOffline,
                }
            }
            None => DeliveryStatus::RecipientOffline,
        };

        tracing::debug!(
            from = %sender_id,
            to = %payload.to,
            status = ?status,
            "Relay attempted"
        );

        // Ack failure means the sender itself is going away; cleanup
        // will follow from its own read loop ending.
        if self
            .gateway
            .emit(connection, Frame::ack(status))
            .await
            == DeliveryOutcome::ChannelClosed
        {
            tracing::debug!(session_id = %connection.session_id(), "Sender gone before ack");
        }

        Ok(())
    }
}
