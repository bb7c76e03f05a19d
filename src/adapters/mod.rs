//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative model providers (OpenAI, mock)
//! - `postgres` - PostgreSQL repositories
//! - `memory` - In-memory repositories

pub mod ai;
pub mod memory;
pub mod postgres;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use memory::{InMemoryConversationRepository, InMemoryMessageRepository, InMemoryStore};
pub use postgres::{PostgresConversationRepository, PostgresMessageRepository};
