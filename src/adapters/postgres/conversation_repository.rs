//! PostgreSQL implementation of ConversationRepository.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use super::db_error;
use crate::domain::budget::Budget;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{
    AccountId, ConversationId, DomainError, ErrorCode, SessionToken, Timestamp,
};
use crate::ports::ConversationRepository;

/// PostgreSQL implementation of ConversationRepository.
#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, account_id, session_token, budget_generated, \
     completed_at, created_at, updated_at FROM conversations";

fn update_statement(conversation: &Conversation) -> Query<'static, Postgres, PgArguments> {
    sqlx::query(
        r#"
        UPDATE conversations SET
            account_id = $2,
            session_token = $3,
            budget_generated = $4,
            completed_at = $5,
            updated_at = $6
        WHERE id = $1
        "#,
    )
    .bind(*conversation.id.as_uuid())
    .bind(conversation.account_id.as_str().to_string())
    .bind(*conversation.session_token.as_uuid())
    .bind(conversation.budget_generated)
    .bind(conversation.completed_at.map(|t| *t.as_datetime()))
    .bind(*conversation.updated_at.as_datetime())
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn create(&self, conversation: &Conversation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (
                id, account_id, session_token, budget_generated,
                completed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(conversation.id.as_uuid())
        .bind(conversation.account_id.as_str())
        .bind(conversation.session_token.as_uuid())
        .bind(conversation.budget_generated)
        .bind(conversation.completed_at.map(|t| *t.as_datetime()))
        .bind(conversation.created_at.as_datetime())
        .bind(conversation.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::ConversationAlreadyOpen,
                format!(
                    "Account {} already has an open conversation",
                    conversation.account_id
                ),
            ),
            other => db_error("Failed to insert conversation", other),
        })?;

        Ok(())
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Conversation, DomainError> {
        let row = sqlx::query(&format!("{} WHERE session_token = $1", SELECT_COLUMNS))
            .bind(token.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch conversation", e))?;

        match row {
            Some(row) => row_to_conversation(&row),
            None => Err(DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("Conversation not found for session {}", token),
            )),
        }
    }

    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE account_id = $1 AND completed_at IS NULL",
            SELECT_COLUMNS
        ))
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch open conversation", e))?;

        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let result = update_statement(conversation)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update conversation", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&conversation.id));
        }

        Ok(())
    }

    async fn complete_with_budgets(
        &self,
        conversation: &Conversation,
        budgets: &[Budget],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        // Dropping `tx` on an early return rolls everything back.
        let result = update_statement(conversation)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update conversation", e))?;
        if result.rows_affected() == 0 {
            return Err(not_found(&conversation.id));
        }

        for budget in budgets {
            sqlx::query(
                r#"
                INSERT INTO budgets (
                    id, account_id, category, amount, period,
                    start_date, end_date, description, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(budget.id.as_uuid())
            .bind(budget.account_id.as_str())
            .bind(&budget.category)
            .bind(budget.amount)
            .bind(budget.period.as_str())
            .bind(budget.start_date.as_datetime())
            .bind(budget.end_date.as_datetime())
            .bind(&budget.description)
            .bind(budget.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to insert budget", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit completion", e))?;

        Ok(())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        // Messages go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete conversation", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn not_found(id: &ConversationId) -> DomainError {
    DomainError::new(
        ErrorCode::ConversationNotFound,
        format!("Conversation not found: {}", id),
    )
}

fn row_to_conversation(row: &PgRow) -> Result<Conversation, DomainError> {
    let account: String = row.get("account_id");
    let completed_at: Option<chrono::DateTime<chrono::Utc>> = row.get("completed_at");

    Ok(Conversation {
        id: ConversationId::from_uuid(row.get("id")),
        account_id: AccountId::new(account)?,
        session_token: SessionToken::from_uuid(row.get("session_token")),
        budget_generated: row.get("budget_generated"),
        completed_at: completed_at.map(Timestamp::from_datetime),
        created_at: Timestamp::from_datetime(row.get("created_at")),
        updated_at: Timestamp::from_datetime(row.get("updated_at")),
    })
}
