//! PostgreSQL implementation of the message repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ConversationSummary, Message, NewMessage, Participant};
use crate::domain::repositories::MessageRepository;
use crate::error::AppError;

const MESSAGE_COLUMNS: &str = "id, sender_id, recipient_id, content, read, created_at";

#[derive(FromRow)]
struct MessageRow {
    id: i64,
    sender_id: i64,
    recipient_id: i64,
    content: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(r: MessageRow) -> Self {
        Message {
            id: r.id,
            sender_id: r.sender_id,
            recipient_id: r.recipient_id,
            content: r.content,
            read: r.read,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
struct ConversationRow {
    #[sqlx(flatten)]
    message: MessageRow,
    participant_id: i64,
    participant_name: String,
    participant_logo: Option<String>,
    unread_count: i64,
}

impl From<ConversationRow> for ConversationSummary {
    fn from(r: ConversationRow) -> Self {
        ConversationSummary {
            last_message: r.message.into(),
            participant: Participant {
                id: r.participant_id,
                name: r.participant_name,
                logo: r.participant_logo,
            },
            unread_count: r.unread_count,
        }
    }
}

/// PostgreSQL repository for direct messages.
pub struct PgMessageRepository {
    pool: Arc<PgPool>,
}

impl PgMessageRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError> {
        let sql = format!(
            "INSERT INTO messages (sender_id, recipient_id, content) VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );

        let row = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(new_message.sender_id)
            .bind(new_message.recipient_id)
            .bind(&new_message.content)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1");

        let row = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn conversation(&self, user_a: i64, user_b: i64) -> Result<Vec<Message>, AppError> {
        let sql = format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at, id
            "#
        );

        let rows = sqlx::query_as::<_, MessageRow>(&sql)
            .bind(user_a)
            .bind(user_b)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn conversations(&self, user_id: i64) -> Result<Vec<ConversationSummary>, AppError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            WITH mine AS (
                SELECT m.*,
                       CASE WHEN m.sender_id = $1 THEN m.recipient_id ELSE m.sender_id END
                           AS counterpart_id
                FROM messages m
                WHERE m.sender_id = $1 OR m.recipient_id = $1
            ),
            latest AS (
                SELECT DISTINCT ON (counterpart_id) *
                FROM mine
                ORDER BY counterpart_id, created_at DESC, id DESC
            )
            SELECT l.id, l.sender_id, l.recipient_id, l.content, l.read, l.created_at,
                   u.id   AS participant_id,
                   u.name AS participant_name,
                   u.logo AS participant_logo,
                   (SELECT COUNT(*)
                      FROM messages x
                     WHERE x.sender_id = l.counterpart_id
                       AND x.recipient_id = $1
                       AND NOT x.read) AS unread_count
            FROM latest l
            JOIN users u ON u.id = l.counterpart_id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_read(&self, id: i64) -> Result<Message, AppError> {
        let sql =
            format!("UPDATE messages SET read = TRUE WHERE id = $1 RETURNING {MESSAGE_COLUMNS}");

        sqlx::query_as::<_, MessageRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found("Message not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
