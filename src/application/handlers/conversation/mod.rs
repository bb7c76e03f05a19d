//! Conversation command and query handlers.
//!
//! The intake orchestrator: starting a session, processing a turn (continue
//! or generate), reading history, and resetting.

mod generate_budget;
mod get_history;
mod reset;
mod start;
mod submit_turn;

#[cfg(test)]
mod test_support;

pub use generate_budget::{BudgetGenerator, GeneratedBudget};
pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use reset::{ResetConversationCommand, ResetConversationHandler};
pub use start::{
    OpenSession, StartConversationCommand, StartConversationHandler, StartConversationResult,
};
pub use submit_turn::{SubmitTurnCommand, SubmitTurnHandler, TurnResult};

use thiserror::Error;

use crate::application::gateway::GatewayError;
use crate::domain::budget::ExtractionError;
use crate::domain::conversation::prompts::GENERATION_FAILED_REPLY;
use crate::domain::foundation::DomainError;

/// Errors surfaced by the conversation handlers.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    /// The account already has an open conversation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown session token or missing referenced record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyMessage,

    /// The model's budget payload was missing, malformed, or unbalanced.
    #[error("Budget validation failed: {0}")]
    Validation(#[from] ExtractionError),

    /// The model could not be reached during budget generation.
    #[error("Model unavailable: {0}")]
    Upstream(#[from] GatewayError),

    /// Storage failure.
    #[error("Repository error: {0}")]
    Repository(DomainError),
}

impl ConversationError {
    /// Scripted assistant text to show for a failed budget generation.
    pub fn user_reply(&self) -> Option<&'static str> {
        match self {
            ConversationError::Validation(_) | ConversationError::Upstream(_) => {
                Some(GENERATION_FAILED_REPLY)
            }
            _ => None,
        }
    }
}

impl From<DomainError> for ConversationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_not_found() => ConversationError::NotFound(err.message),
            code if code.is_conflict() => ConversationError::Conflict(err.message),
            _ => ConversationError::Repository(err),
        }
    }
}
