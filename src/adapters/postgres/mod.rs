//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresConversationRepository` - Conversations, guarded by the
//!   one-open-per-account partial unique index
//!   and completed together with their budgets in one transaction
//! - `PostgresMessageRepository` - Ordered conversation messages

mod conversation_repository;
mod message_repository;

pub use conversation_repository::PostgresConversationRepository;
pub use message_repository::PostgresMessageRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens a connection pool sized from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
        .map_err(|e| db_error("Failed to connect to database", e))
}

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

fn db_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}
