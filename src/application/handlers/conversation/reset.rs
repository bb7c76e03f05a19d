//! ResetConversationHandler - discards a session and starts a fresh one.

use std::sync::Arc;

use super::{
    ConversationError, StartConversationCommand, StartConversationHandler,
    StartConversationResult,
};
use crate::domain::foundation::SessionToken;
use crate::ports::ConversationRepository;

/// Command to reset a session.
#[derive(Debug, Clone)]
pub struct ResetConversationCommand {
    pub session_token: SessionToken,
}

impl ResetConversationCommand {
    pub fn new(session_token: SessionToken) -> Self {
        Self { session_token }
    }
}

/// Deletes the conversation (messages cascade) and starts over for the same account.
///
/// Budgets already generated belong to the account and are kept.
pub struct ResetConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    start: Arc<StartConversationHandler>,
}

impl ResetConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        start: Arc<StartConversationHandler>,
    ) -> Self {
        Self {
            conversations,
            start,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResetConversationCommand,
    ) -> Result<StartConversationResult, ConversationError> {
        let conversation = self
            .conversations
            .find_by_session_token(&cmd.session_token)
            .await?;

        self.conversations.delete(&conversation.id).await?;
        tracing::info!(
            conversation_id = %conversation.id,
            account_id = %conversation.account_id,
            "Conversation reset"
        );

        self.start
            .handle(StartConversationCommand::new(conversation.account_id))
            .await
    }
}
