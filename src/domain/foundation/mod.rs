//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the budget intake domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, BudgetId, ConversationId, MessageId, SessionToken};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
