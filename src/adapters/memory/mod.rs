//! In-memory adapters - Repository implementations without a database.
//!
//! Both repositories share one `InMemoryStore` so that deleting a
//! conversation cascades to its messages, the one-open-per-account rule
//! is checked atomically with the insert, and budgets land under the same
//! lock as the completion, as the PostgreSQL schema does.
//!
//! Useful for tests and for terminal runs without `DATABASE__URL`.
//!
//! # Example
//!
//! ```ignore
//! let store = InMemoryStore::new();
//! let conversations = Arc::new(store.conversations());
//! let messages = Arc::new(store.messages());
//! ```

mod conversation_repository;
mod message_repository;

pub use conversation_repository::InMemoryConversationRepository;
pub use message_repository::InMemoryMessageRepository;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::budget::Budget;
use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::ConversationId;

#[derive(Debug, Default)]
struct StoreState {
    conversations: HashMap<ConversationId, Conversation>,
    messages: Vec<Message>,
    budgets: Vec<Budget>,
    fail_budget_batches: bool,
}

/// Shared in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversations(&self) -> InMemoryConversationRepository {
        InMemoryConversationRepository::new(self.clone())
    }

    pub fn messages(&self) -> InMemoryMessageRepository {
        InMemoryMessageRepository::new(self.clone())
    }

    /// Number of stored conversations.
    pub fn conversation_count(&self) -> usize {
        self.lock().conversations.len()
    }

    /// Number of stored messages across all conversations.
    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }

    /// Snapshot of every stored budget.
    pub fn all_budgets(&self) -> Vec<Budget> {
        self.lock().budgets.clone()
    }

    /// Makes every subsequent budget batch fail without writing.
    pub fn fail_budget_batches(&self, fail: bool) {
        self.lock().fail_budget_batches = fail;
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
