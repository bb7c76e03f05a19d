//! GetHistoryHandler - returns a conversation's transcript in order.

use std::sync::Arc;

use super::ConversationError;
use crate::domain::conversation::Message;
use crate::domain::foundation::SessionToken;
use crate::ports::{ConversationRepository, MessageRepository};

/// Query for the transcript of a session.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session_token: SessionToken,
}

impl GetHistoryQuery {
    pub fn new(session_token: SessionToken) -> Self {
        Self { session_token }
    }
}

pub struct GetHistoryHandler {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetHistoryHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<Message>, ConversationError> {
        let conversation = self
            .conversations
            .find_by_session_token(&query.session_token)
            .await?;
        Ok(self.messages.find_by_conversation(&conversation.id).await?)
    }
}
