//! DirectMessage entity - a persisted one-to-one chat message

use chrono::{DateTime, Utc};

use crate::ids::{MessageId, UserId};

/// A direct message stored durably between two users.
///
/// Persistence is independent of live relay: a message may be stored
/// without ever being relayed, and relayed without being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl DirectMessage {
    /// Create a new DirectMessage
    pub fn new(id: MessageId, sender_id: UserId, recipient_id: UserId, body: String) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
            body,
            sent_at: Utc::now(),
        }
    }

    /// Check whether `user_id` is one of the two parties
    #[inline]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// Check if the message body is empty or whitespace-only
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
