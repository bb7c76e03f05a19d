//! Conversation repository port.
//!
//! Defines the contract for persisting intake conversations. Messages live in
//! their own repository and are removed with their conversation. Generated
//! budgets are written together with the completion that produced them.

use crate::domain::budget::Budget;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{AccountId, ConversationId, DomainError, SessionToken};
use async_trait::async_trait;

/// Repository port for Conversation persistence.
///
/// Implementations must ensure:
/// - At most one open conversation per account (storage-level guard)
/// - Deleting a conversation removes its messages
/// - Budgets are never stored without their conversation marked completed
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save a new conversation.
    ///
    /// # Errors
    ///
    /// - `ConversationAlreadyOpen` if the account already has an open one
    /// - `DatabaseError` on persistence failure
    async fn create(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Find a conversation by its session token.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if no conversation carries this token
    async fn find_by_session_token(&self, token: &SessionToken)
        -> Result<Conversation, DomainError>;

    /// Find the account's open conversation, if any.
    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// Replace the stored record with `conversation`.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Store `conversation` (already completed) and insert `budgets` in one
    /// atomic write. On error nothing is written.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn complete_with_budgets(
        &self,
        conversation: &Conversation,
        budgets: &[Budget],
    ) -> Result<(), DomainError>;

    /// Delete a conversation and all of its messages.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError>;
}
