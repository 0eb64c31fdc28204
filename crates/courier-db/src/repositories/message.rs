//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use courier_core::entities::DirectMessage;
use courier_core::ids::UserId;
use courier_core::traits::{MessageRepository, RepoResult};

use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &DirectMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, recipient_id, body, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.recipient_id.into_inner())
        .bind(&message.body)
        .bind(message.sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_conversation(&self, a: UserId, b: UserId) -> RepoResult<Vec<DirectMessage>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, sender_id, recipient_id, body, sent_at
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY sent_at ASC
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DirectMessage::from).collect())
    }
}
