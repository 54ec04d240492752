//! Chat message repository for database operations.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::chat::ChatMessage;

const CHAT_COLUMNS: &str = "id, sender, body, sent_at";

/// Repository for chat message database operations.
pub struct ChatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatRepository<'a> {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a chat message, stamping the server time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, sender: &str, body: &str) -> Result<ChatMessage, RepositoryError> {
        let message = sqlx::query_as::<_, ChatMessage>(&format!(
            "INSERT INTO chat_message (sender, body) VALUES ($1, $2) RETURNING {CHAT_COLUMNS}"
        ))
        .bind(sender)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        Ok(message)
    }

    /// Fetch the most recent messages in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chat_message ORDER BY id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        messages.reverse();
        Ok(messages)
    }
}
