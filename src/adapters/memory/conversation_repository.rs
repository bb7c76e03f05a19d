//! In-memory implementation of ConversationRepository.

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::budget::Budget;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{
    AccountId, ConversationId, DomainError, ErrorCode, SessionToken,
};
use crate::ports::ConversationRepository;

/// In-memory implementation of ConversationRepository.
#[derive(Debug, Clone)]
pub struct InMemoryConversationRepository {
    store: InMemoryStore,
}

impl InMemoryConversationRepository {
    pub(super) fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn not_found(what: String) -> DomainError {
    DomainError::new(ErrorCode::ConversationNotFound, format!("Conversation not found: {}", what))
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn create(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut state = self.store.lock();

        let clashes = !conversation.is_completed()
            && state
                .conversations
                .values()
                .any(|c| c.account_id == conversation.account_id && !c.is_completed());
        if clashes {
            return Err(DomainError::new(
                ErrorCode::ConversationAlreadyOpen,
                format!(
                    "Account {} already has an open conversation",
                    conversation.account_id
                ),
            ));
        }

        state
            .conversations
            .insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn find_by_session_token(
        &self,
        token: &SessionToken,
    ) -> Result<Conversation, DomainError> {
        self.store
            .lock()
            .conversations
            .values()
            .find(|c| c.session_token == *token)
            .cloned()
            .ok_or_else(|| not_found(format!("session {}", token)))
    }

    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Conversation>, DomainError> {
        Ok(self
            .store
            .lock()
            .conversations
            .values()
            .find(|c| c.account_id == *account_id && !c.is_completed())
            .cloned())
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut state = self.store.lock();
        match state.conversations.get_mut(&conversation.id) {
            Some(stored) => {
                *stored = conversation.clone();
                Ok(())
            }
            None => Err(not_found(conversation.id.to_string())),
        }
    }

    async fn complete_with_budgets(
        &self,
        conversation: &Conversation,
        budgets: &[Budget],
    ) -> Result<(), DomainError> {
        let mut state = self.store.lock();
        if state.fail_budget_batches {
            return Err(DomainError::database("budget batch rejected"));
        }
        let stored = state
            .conversations
            .get_mut(&conversation.id)
            .ok_or_else(|| not_found(conversation.id.to_string()))?;
        *stored = conversation.clone();
        state.budgets.extend_from_slice(budgets);
        Ok(())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), DomainError> {
        let mut state = self.store.lock();
        if state.conversations.remove(id).is_none() {
            return Err(not_found(id.to_string()));
        }
        state.messages.retain(|m| m.conversation_id != *id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::budget::{BudgetAnalysis, BudgetCategory};
    use crate::domain::conversation::Message;
    use crate::domain::foundation::Timestamp;
    use crate::ports::MessageRepository;

    fn account(id: &str) -> AccountId {
        AccountId::new(id).unwrap()
    }

    fn budgets(account_id: &AccountId) -> Vec<Budget> {
        let analysis = BudgetAnalysis {
            salary: 2_000_000.0,
            location: "Bandung".to_string(),
            lifestyle: None,
            analysis: String::new(),
            categories: vec![
                BudgetCategory::new("Makan", 1_000_000.0, ""),
                BudgetCategory::new("Tabungan", 1_000_000.0, ""),
            ],
        };
        Budget::from_analysis(account_id, &analysis, Timestamp::now()).unwrap()
    }

    #[tokio::test]
    async fn completion_stores_budgets_with_the_conversation() {
        let store = InMemoryStore::new();
        let repo = store.conversations();
        let mut conversation = Conversation::start(account("a"));
        repo.create(&conversation).await.unwrap();

        conversation.complete(Timestamp::now()).unwrap();
        repo.complete_with_budgets(&conversation, &budgets(&conversation.account_id))
            .await
            .unwrap();

        assert_eq!(store.all_budgets().len(), 2);
        let stored = repo
            .find_by_session_token(&conversation.session_token)
            .await
            .unwrap();
        assert!(stored.is_completed());
    }

    #[tokio::test]
    async fn rejected_batch_leaves_conversation_open() {
        let store = InMemoryStore::new();
        let repo = store.conversations();
        let mut conversation = Conversation::start(account("a"));
        repo.create(&conversation).await.unwrap();
        store.fail_budget_batches(true);

        conversation.complete(Timestamp::now()).unwrap();
        let err = repo
            .complete_with_budgets(&conversation, &budgets(&conversation.account_id))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(store.all_budgets().is_empty());
        assert!(repo.find_open_by_account(&account("a")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn completing_unknown_conversation_writes_no_budgets() {
        let store = InMemoryStore::new();
        let mut conversation = Conversation::start(account("a"));
        conversation.complete(Timestamp::now()).unwrap();

        let err = store
            .conversations()
            .complete_with_budgets(&conversation, &budgets(&conversation.account_id))
            .await
            .unwrap_err();

        assert!(err.code.is_not_found());
        assert!(store.all_budgets().is_empty());
    }

    #[tokio::test]
    async fn second_open_conversation_for_account_conflicts() {
        let repo = InMemoryStore::new().conversations();
        repo.create(&Conversation::start(account("a"))).await.unwrap();

        let err = repo
            .create(&Conversation::start(account("a")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConversationAlreadyOpen);

        repo.create(&Conversation::start(account("b"))).await.unwrap();
    }

    #[tokio::test]
    async fn completed_conversation_frees_the_slot() {
        let repo = InMemoryStore::new().conversations();
        let mut first = Conversation::start(account("a"));
        repo.create(&first).await.unwrap();

        first.complete(Timestamp::now()).unwrap();
        repo.update(&first).await.unwrap();

        assert!(repo.find_open_by_account(&account("a")).await.unwrap().is_none());
        repo.create(&Conversation::start(account("a"))).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let repo = InMemoryStore::new().conversations();
        let err = repo
            .find_by_session_token(&SessionToken::new())
            .await
            .unwrap_err();
        assert!(err.code.is_not_found());
    }

    #[tokio::test]
    async fn delete_cascades_to_messages() {
        let store = InMemoryStore::new();
        let conversations = store.conversations();
        let messages = store.messages();

        let kept = Conversation::start(account("a"));
        let dropped = Conversation::start(account("b"));
        conversations.create(&kept).await.unwrap();
        conversations.create(&dropped).await.unwrap();
        messages.create(&Message::user(kept.id, "halo")).await.unwrap();
        messages.create(&Message::user(dropped.id, "halo")).await.unwrap();

        conversations.delete(&dropped.id).await.unwrap();

        assert_eq!(store.message_count(), 1);
        assert!(conversations
            .find_by_session_token(&dropped.session_token)
            .await
            .is_err());
        assert!(conversations.delete(&dropped.id).await.is_err());
    }
}
