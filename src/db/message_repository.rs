use sqlx::PgPool;
use tracing::error;

use crate::errors::AppError;
use crate::models::{ChatMessage, ConversationMessage};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Both directions of the conversation between two users, oldest first.
    pub async fn conversation_between(
        &self,
        user_id: &str,
        other_id: &str,
    ) -> Result<Vec<ConversationMessage>, AppError> {
        sqlx::query_as::<_, ConversationMessage>(
            "SELECT m.id, m.sender_id, m.receiver_id,
                    s.username AS sender_username, r.username AS receiver_username,
                    m.message, m.timestamp, m.is_read
             FROM chat_messages m
             JOIN users s ON s.id = m.sender_id
             JOIN users r ON r.id = m.receiver_id
             WHERE (m.sender_id = $1 AND m.receiver_id = $2)
                OR (m.sender_id = $2 AND m.receiver_id = $1)
             ORDER BY m.timestamp ASC",
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch conversation between {user_id} and {other_id}: {e}");
            AppError::db_query("Failed to fetch messages", e)
        })
    }

    /// Marks everything `receiver_id` has received from `sender_id` as read.
    pub async fn mark_read(&self, receiver_id: &str, sender_id: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE chat_messages SET is_read = TRUE
             WHERE receiver_id = $1 AND sender_id = $2 AND NOT is_read",
        )
        .bind(receiver_id)
        .bind(sender_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to mark messages read for {receiver_id}: {e}");
            AppError::db_query("Failed to mark messages read", e)
        })?;
        Ok(())
    }

    pub async fn save(&self, message: &ChatMessage) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO chat_messages (id, sender_id, receiver_id, message, timestamp, is_read)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&message.id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.message)
        .bind(message.timestamp)
        .bind(message.is_read)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save message {}: {e}", message.id);
            AppError::db_query("Failed to save message", e)
        })?;
        Ok(())
    }
}
