//! Conversation entity - one guided intake session.

use serde::{Deserialize, Serialize};

use super::ConversationState;
use crate::domain::foundation::{
    AccountId, ConversationId, DomainError, SessionToken, StateMachine, Timestamp,
};

/// A guided budgeting session owned by one account.
///
/// # Invariants
///
/// - `budget_generated` and `completed_at` change together, exactly once
/// - at most one open conversation per account (enforced by storage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub account_id: AccountId,
    pub session_token: SessionToken,
    pub budget_generated: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    /// Starts a fresh, open conversation with a new session token.
    pub fn start(account_id: AccountId) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            account_id,
            session_token: SessionToken::new(),
            budget_generated: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> ConversationState {
        if self.completed_at.is_some() {
            ConversationState::Completed
        } else {
            ConversationState::Open
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == ConversationState::Completed
    }

    /// Marks the budget as generated and closes the conversation.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the conversation is already completed.
    pub fn complete(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.state().transition_to(ConversationState::Completed)?;
        self.budget_generated = true;
        self.completed_at = Some(at);
        self.updated_at = at;
        Ok(())
    }
}
