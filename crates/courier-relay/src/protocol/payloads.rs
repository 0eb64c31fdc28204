use courier_core::UserId;
use serde::{Deserialize, Serialize};

/// Payload of a `bind` frame: the user this connection speaks for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindPayload {
    pub user_id: UserId,
}

/// Payload of a `relay-message` frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPayload {
    /// Recipient user id
    pub to: UserId,
    /// Message body, forwarded verbatim
    pub message: String,
}

/// Payload of a `receive-message` frame pushed to the recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePayload {
    pub message: String,
    /// Sender user id
    pub from: UserId,
}

/// Outcome reported to the sender of a `relay-message`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Frame was handed to the recipient's outbound channel
    #[serde(rename = "delivered")]
    Delivered,
    /// Recipient has no live connection, or its channel is gone
    #[serde(rename = "recipient-offline")]
    RecipientOffline,
}

/// Payload of an `ack` frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AckPayload {
    pub status: DeliveryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_payload_field_names() {
        let user = UserId::new();
        let json = serde_json::to_value(BindPayload { user_id: user }).unwrap();
        assert_eq!(json["userId"], serde_json::json!(user.to_string()));
    }

    #[test]
    fn test_delivery_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::Delivered).unwrap(),
            "\"delivered\""
        );
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::RecipientOffline).unwrap(),
            "\"recipient-offline\""
        );
    }

    #[test]
    fn test_relay_payload_parse() {
        let to = UserId::new();
        let raw = format!(r#"{{"to":"{to}","message":"hello"}}"#);
        let payload: RelayPayload = serde_json::from_str(&raw).unwrap();
        assert_eq!(payload.to, to);
        assert_eq!(payload.message, "hello");
    }
}
