//! Message handlers
//!
//! Durable message history. Storage here is independent of the relay:
//! clients call these endpoints whether or not live delivery happened.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use courier_core::{DirectMessage, DomainError, MessageId, UserId};
use serde::{Deserialize, Serialize};

use crate::extractors::AuthUser;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Add message request body
#[derive(Debug, Deserialize)]
pub struct AddMessageRequest {
    /// Recipient user id
    pub to: UserId,
    pub message: String,
}

/// Stored message acknowledgement
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStored {
    pub id: MessageId,
    pub sent_at: DateTime<Utc>,
}

/// Conversation query: the other party
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub with: UserId,
}

/// One conversation entry, projected relative to the caller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationEntry {
    pub from_self: bool,
    pub message: String,
}

/// Persist a direct message
///
/// POST /messages/addmsg
pub async fn add_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<AddMessageRequest>,
) -> ApiResult<Created<Json<MessageStored>>> {
    let message = DirectMessage::new(
        MessageId::new(),
        auth.user_id,
        request.to,
        request.message,
    );
    if message.is_empty() {
        return Err(DomainError::EmptyMessageBody.into());
    }

    state.message_repo().create(&message).await?;

    tracing::debug!(
        message_id = %message.id,
        from = %message.sender_id,
        to = %message.recipient_id,
        "Message stored"
    );

    Ok(Created(Json(MessageStored {
        id: message.id,
        sent_at: message.sent_at,
    })))
}

/// Fetch the conversation with another user, oldest first
///
/// GET /messages/getmsg?with=<user_id>
pub async fn get_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<Json<Vec<ConversationEntry>>> {
    let conversation = state
        .message_repo()
        .find_conversation(auth.user_id, query.with)
        .await?;

    let entries = conversation
        .into_iter()
        .map(|m| ConversationEntry {
            from_self: m.sender_id == auth.user_id,
            message: m.body,
        })
        .collect();

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_entry_field_names() {
        let entry = ConversationEntry {
            from_self: true,
            message: "hi".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["fromSelf"], true);
        assert_eq!(json["message"], "hi");
    }

    #[test]
    fn test_conversation_query_parses_user_id() {
        let user = UserId::new();
        let query: ConversationQuery =
            serde_json::from_value(serde_json::json!({ "with": user })).unwrap();
        assert_eq!(query.with, user);
    }
}
