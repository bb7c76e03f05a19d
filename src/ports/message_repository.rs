//! Message repository port.

use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, DomainError};
use async_trait::async_trait;

/// Repository port for conversation messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the owning conversation doesn't exist
    async fn create(&self, message: &Message) -> Result<(), DomainError>;

    /// All messages of a conversation, oldest first.
    ///
    /// The ordering is part of the contract: transcripts are rebuilt from it.
    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError>;
}
