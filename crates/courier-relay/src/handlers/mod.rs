//! Frame handlers
//!
//! The dispatcher routes each inbound frame to its handler. Handler
//! failures are logged and never close the connection; the read pump
//! keeps the session alive through malformed and unexpected frames.

mod bind;
mod error;
mod relay;

pub use bind::BindHandler;
pub use error::HandlerError;
pub use relay::RelayHandler;

use std::sync::Arc;

use crate::connection::{Connection, ConnectionManager};
use crate::delivery::DeliveryGateway;
use crate::protocol::{EventKind, Frame};

/// Routes inbound frames to the handler for their event
pub struct EventDispatcher {
    bind: BindHandler,
    relay: RelayHandler,
}

impl EventDispatcher {
    #[must_use]
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        let gateway = DeliveryGateway::new();
        Self {
            bind: BindHandler::new(Arc::clone(&manager)),
            relay: RelayHandler::new(manager, gateway),
        }
    }

    /// Handle one inbound frame on behalf of `connection`.
    ///
    /// Frames carrying server-only events are ignored with a warning.
    /// Handler errors are surfaced to the caller for logging only.
    pub async fn dispatch(
        &self,
        connection: &Arc<Connection>,
        frame: Frame,
    ) -> Result<(), HandlerError> {
        if frame.event.is_server_event() {
            tracing::warn!(
                session_id = %connection.session_id(),
                event = %frame.event,
                "Ignoring server-only event from client"
            );
            return Ok(());
        }

        match frame.event {
            EventKind::Bind => self.bind.handle(connection, &frame).await,
            EventKind::RelayMessage => self.relay.handle(connection, &frame).await,
            EventKind::ReceiveMessage | EventKind::Ack => Ok(()),
        }
    }
}
