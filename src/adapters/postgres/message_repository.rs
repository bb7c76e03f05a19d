//! PostgreSQL implementation of MessageRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::conversation::{Message, Role};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, ValidationError,
};
use crate::ports::MessageRepository;

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, role, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.conversation_id.as_uuid())
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("Conversation not found: {}", message.conversation_id),
            ),
            other => db_error("Failed to insert message", other),
        })?;

        Ok(())
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(conversation_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch messages", e))?;

        rows.iter()
            .map(|row| {
                let role: String = row.get("role");
                Ok(Message {
                    id: MessageId::from_uuid(row.get("id")),
                    conversation_id: ConversationId::from_uuid(row.get("conversation_id")),
                    role: str_to_role(&role)?,
                    content: row.get("content"),
                    created_at: Timestamp::from_datetime(row.get("created_at")),
                })
            })
            .collect()
    }
}

fn str_to_role(s: &str) -> Result<Role, DomainError> {
    match s {
        "user" => Ok(Role::User),
        "assistant" => Ok(Role::Assistant),
        other => Err(ValidationError::invalid_format("role", format!("unknown role '{}'", other)).into()),
    }
}
