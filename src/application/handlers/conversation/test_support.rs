//! Shared fixtures for handler tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{
    BudgetGenerator, GetHistoryHandler, ResetConversationHandler, StartConversationHandler,
    SubmitTurnHandler,
};
use crate::adapters::ai::MockAIProvider;
use crate::adapters::memory::InMemoryStore;
use crate::application::gateway::{GatewayConfig, ModelGateway, Sleeper};
use crate::config::IntakeConfig;
use crate::domain::foundation::AccountId;

/// Backoff that returns immediately.
pub struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}

/// A budget payload that balances at 5,000,000.
pub const BALANCED_PAYLOAD: &str = r#"ini budgetnya:
{
  "salary": 5000000,
  "location": "jkt",
  "lifestyle": "hemat",
  "analysis": "fokus nabung karena kamu mau dana darurat",
  "categories": [
    {"name": "Kewajiban", "amount": 1500000, "description": "kos"},
    {"name": "Makan", "amount": 1200000, "description": "makan harian"},
    {"name": "Transport", "amount": 500000, "description": "ojol"},
    {"name": "Healing", "amount": 300000, "description": "nonton"},
    {"name": "Tabungan", "amount": 1300000, "description": "dana darurat"},
    {"name": "Lain-lain", "amount": 200000, "description": "lainnya"}
  ]
}"#;

pub struct Fixture {
    pub provider: MockAIProvider,
    pub store: InMemoryStore,
    pub start: Arc<StartConversationHandler>,
    pub submit: SubmitTurnHandler,
    pub history: GetHistoryHandler,
    pub reset: ResetConversationHandler,
}

pub fn account() -> AccountId {
    AccountId::new("acct-42").unwrap()
}

pub fn fixture() -> Fixture {
    let provider = MockAIProvider::new();
    let store = InMemoryStore::new();
    let intake = IntakeConfig::default();

    let gateway = Arc::new(
        ModelGateway::new(Arc::new(provider.clone()), GatewayConfig::default())
            .with_sleeper(Arc::new(NoSleep)),
    );
    let conversations = Arc::new(store.conversations());
    let messages = Arc::new(store.messages());

    let start = Arc::new(StartConversationHandler::new(
        conversations.clone(),
        messages.clone(),
        gateway.clone(),
    ));
    let generator = BudgetGenerator::new(
        conversations.clone(),
        gateway.clone(),
        intake.rounding_interval,
    );
    let submit = SubmitTurnHandler::new(
        conversations.clone(),
        messages.clone(),
        gateway,
        generator,
        &intake,
    );
    let history = GetHistoryHandler::new(conversations.clone(), messages);
    let reset = ResetConversationHandler::new(conversations, start.clone());

    Fixture {
        provider,
        store,
        start,
        submit,
        history,
        reset,
    }
}
