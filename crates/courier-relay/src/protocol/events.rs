use serde::{Deserialize, Serialize};

/// Named events carried by relay frames.
///
/// `Bind` and `RelayMessage` travel client to server; `ReceiveMessage`
/// and `Ack` travel server to client only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Client announces which user this connection speaks for
    #[serde(rename = "bind")]
    Bind,
    /// Client asks the server to forward a message to another user
    #[serde(rename = "relay-message")]
    RelayMessage,
    /// Server delivers a forwarded message to the recipient
    #[serde(rename = "receive-message")]
    ReceiveMessage,
    /// Server reports the delivery outcome back to the sender
    #[serde(rename = "ack")]
    Ack,
}

impl EventKind {
    /// Events a client is allowed to send
    #[must_use]
    pub fn is_client_event(self) -> bool {
        matches!(self, Self::Bind | Self::RelayMessage)
    }

    /// Events only the server emits
    #[must_use]
    pub fn is_server_event(self) -> bool {
        !self.is_client_event()
    }

    /// Wire name of the event
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bind => "bind",
            Self::RelayMessage => "relay-message",
            Self::ReceiveMessage => "receive-message",
            Self::Ack => "ack",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&EventKind::RelayMessage).unwrap(),
            "\"relay-message\""
        );
        let parsed: EventKind = serde_json::from_str("\"bind\"").unwrap();
        assert_eq!(parsed, EventKind::Bind);
    }

    #[test]
    fn test_unknown_event_rejected() {
        assert!(serde_json::from_str::<EventKind>("\"join-room\"").is_err());
    }

    #[test]
    fn test_direction_classification() {
        assert!(EventKind::Bind.is_client_event());
        assert!(EventKind::RelayMessage.is_client_event());
        assert!(EventKind::ReceiveMessage.is_server_event());
        assert!(EventKind::Ack.is_server_event());
    }
}
