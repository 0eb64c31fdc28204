use serde::{Deserialize, Serialize};
use serde_json::Value;

use courier_core::UserId;

use super::events::EventKind;
use super::payloads::{AckPayload, BindPayload, DeliveryStatus, ReceivePayload, RelayPayload};

/// Errors raised while parsing or building frames
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Frame '{event}' is missing its data payload")]
    MissingData { event: EventKind },
}

/// A single wire frame: event name plus optional JSON payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub event: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Frame {
    /// Build a `receive-message` frame for the recipient
    #[must_use]
    pub fn receive(message: String, from: UserId) -> Self {
        Self {
            event: EventKind::ReceiveMessage,
            data: serde_json::to_value(ReceivePayload { message, from }).ok(),
        }
    }

    /// Build an `ack` frame for the sender
    #[must_use]
    pub fn ack(status: DeliveryStatus) -> Self {
        Self {
            event: EventKind::Ack,
            data: serde_json::to_value(AckPayload { status }).ok(),
        }
    }

    /// Parse a frame from raw text received on the socket
    pub fn from_json(raw: &str) -> Result<Self, FrameError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize the frame for the wire
    pub fn to_json(&self) -> Result<String, FrameError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Interpret this frame as a `bind` payload
    pub fn as_bind(&self) -> Result<BindPayload, FrameError> {
        self.parse_data()
    }

    /// Interpret this frame as a `relay-message` payload
    pub fn as_relay(&self) -> Result<RelayPayload, FrameError> {
        self.parse_data()
    }

    fn parse_data<T: serde::de::DeserializeOwned>(&self) -> Result<T, FrameError> {
        let data = self.data.as_ref().ok_or(FrameError::MissingData {
            event: self.event,
        })?;
        Ok(serde_json::from_value(data.clone())?)
    }
}
