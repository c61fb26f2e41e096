//! Message repository for database queries.

use super::models::{Message, MessageRow, timestamp};
use crate::db::DbError;
use sqlx::SqlitePool;

/// Repository for message operations.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new message. `created_at` and `updated_at` share one timestamp.
    pub async fn create(&self, body: &str, username: &str) -> Result<Message, DbError> {
        let now = timestamp::format(&timestamp::now());

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (body, username, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(body)
        .bind(username)
        .bind(now.as_str())
        .bind(now.as_str())
        .fetch_one(self.pool)
        .await?;

        Message::try_from(row)
    }

    /// All messages, oldest first. Equal timestamps fall back to insertion order.
    pub async fn list(&self) -> Result<Vec<Message>, DbError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, body, username, created_at, updated_at
            FROM messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    /// Find a message by primary key.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Message>, DbError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, body, username, created_at, updated_at
            FROM messages
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Message::try_from).transpose()
    }

    /// Commit an edit to `current`.
    ///
    /// With `Some(body)` the body is replaced and `updated_at` advances past its
    /// previous value in the same statement. With `None` the row is rewritten
    /// unchanged. Returns `None` if the row vanished since `current` was read.
    pub async fn update_body(
        &self,
        current: &Message,
        body: Option<&str>,
    ) -> Result<Option<Message>, DbError> {
        let updated_at = body.map(|_| timestamp::format(&timestamp::advance(current.updated_at)));

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            UPDATE messages
            SET body = COALESCE(?, body),
                updated_at = COALESCE(?, updated_at)
            WHERE id = ?
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(body)
        .bind(updated_at)
        .bind(current.id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Message::try_from).transpose()
    }

    /// Delete a message. Returns `false` if no row had that id.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored messages.
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
