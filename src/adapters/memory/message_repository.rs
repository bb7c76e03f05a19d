//! In-memory implementation of MessageRepository.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::MessageRepository;

/// In-memory implementation of MessageRepository.
#[derive(Debug, Clone)]
pub struct InMemoryMessageRepository {
    store: InMemoryStore,
}

impl InMemoryMessageRepository {
    pub(super) fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), DomainError> {
        let mut state = self.store.lock();
        if !state.conversations.contains_key(&message.conversation_id) {
            return Err(DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("Conversation not found: {}", message.conversation_id),
            ));
        }
        state.messages.push(message.clone());
        Ok(())
    }

    async fn find_by_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let mut messages: Vec<Message> = self
            .store
            .lock()
            .messages
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .cloned()
            .collect();
        // Stable: equal timestamps keep insertion order.
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Conversation, Role};
    use crate::domain::foundation::AccountId;
    use crate::ports::ConversationRepository;

    #[tokio::test]
    async fn returns_messages_oldest_first() {
        let store = InMemoryStore::new();
        let conversation = Conversation::start(AccountId::new("a").unwrap());
        store.conversations().create(&conversation).await.unwrap();
        let repo = store.messages();

        repo.create(&Message::assistant(conversation.id, "hai")).await.unwrap();
        repo.create(&Message::user(conversation.id, "gaji 5jt")).await.unwrap();
        repo.create(&Message::assistant(conversation.id, "oke")).await.unwrap();

        let history = repo.find_by_conversation(&conversation.id).await.unwrap();
        let contents: Vec<_> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hai", "gaji 5jt", "oke"]);
        assert_eq!(history[1].role, Role::User);
    }

    #[tokio::test]
    async fn rejects_message_for_missing_conversation() {
        let repo = InMemoryStore::new().messages();
        let err = repo
            .create(&Message::user(ConversationId::new(), "halo"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConversationNotFound);
    }
}
