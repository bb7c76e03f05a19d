//! Integration tests for the full intake flow.
//!
//! These tests drive the public handlers end to end:
//! 1. Start a conversation and receive a greeting
//! 2. Exchange turns until intent detection fires
//! 3. Generate, validate, and persist budgets
//! 4. Reset and start over for the same account
//!
//! Uses the scripted model provider and in-memory storage.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use budget_intake::adapters::{InMemoryStore, MockAIProvider};
use budget_intake::application::{
    BudgetGenerator, ConversationError, GatewayConfig, GetHistoryHandler, GetHistoryQuery,
    ModelGateway, ResetConversationCommand, ResetConversationHandler, Sleeper,
    StartConversationCommand, StartConversationHandler, SubmitTurnCommand, SubmitTurnHandler,
};
use budget_intake::config::IntakeConfig;
use budget_intake::domain::conversation::prompts::{
    CONVERSATION_FINISHED_REPLY, FALLBACK_GREETING, GENERATION_FAILED_REPLY,
};
use budget_intake::domain::conversation::Role;
use budget_intake::domain::foundation::AccountId;
use budget_intake::ports::AIError;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Instant;

#[async_trait]
impl Sleeper for Instant {
    async fn sleep(&self, _duration: Duration) {}
}

struct App {
    provider: MockAIProvider,
    store: InMemoryStore,
    start: Arc<StartConversationHandler>,
    submit: SubmitTurnHandler,
    history: GetHistoryHandler,
    reset: ResetConversationHandler,
}

fn app_with(provider: MockAIProvider, shutdown: Option<watch::Receiver<bool>>) -> App {
    let store = InMemoryStore::new();
    let intake = IntakeConfig::default();

    let mut gateway = ModelGateway::new(Arc::new(provider.clone()), GatewayConfig::default())
        .with_sleeper(Arc::new(Instant));
    if let Some(rx) = shutdown {
        gateway = gateway.with_shutdown(rx);
    }
    let gateway = Arc::new(gateway);

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

    App {
        submit: SubmitTurnHandler::new(
            conversations.clone(),
            messages.clone(),
            gateway,
            generator,
            &intake,
        ),
        history: GetHistoryHandler::new(conversations.clone(), messages),
        reset: ResetConversationHandler::new(conversations, start.clone()),
        start,
        provider,
        store,
    }
}

fn app() -> App {
    app_with(MockAIProvider::new(), None)
}

fn account(id: &str) -> AccountId {
    AccountId::new(id).unwrap()
}

const PAYLOAD: &str = r#"sip, ini hasilnya:
```json
{
  "salary": 8000000,
  "location": "bdg",
  "lifestyle": "moderate",
  "analysis": "sisain 20% buat tabungan",
  "categories": [
    {"name": "Kewajiban", "amount": 2400000, "description": "kos + cicilan"},
    {"name": "Makan", "amount": 1800000, "description": "makan harian"},
    {"name": "Transport", "amount": 800000, "description": "bensin"},
    {"name": "Healing", "amount": 800000, "description": "nongkrong"},
    {"name": "Tabungan", "amount": 1600000, "description": "dana darurat"},
    {"name": "Lain-lain", "amount": 600000, "description": "cadangan"}
  ]
}
```"#;

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn full_intake_produces_monthly_budgets() {
    let app = app();
    app.provider.push_response("hai! gaji kamu berapa?");
    let started = app
        .start
        .handle(StartConversationCommand::new(account("user-1")))
        .await
        .unwrap();
    assert_eq!(started.greeting, "hai! gaji kamu berapa?");

    app.provider.push_response("oke 8 juta. tinggal di mana?");
    let turn = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "gaji gue 8jt"))
        .await
        .unwrap();
    assert!(!turn.completed);

    app.provider.push_response(PAYLOAD);
    let turn = app
        .submit
        .handle(SubmitTurnCommand::new(
            started.session_token,
            "di bandung, buatin budget ya",
        ))
        .await
        .unwrap();

    assert!(turn.completed);
    assert!(turn.reply.contains("💸 Kewajiban: Rp 2.400.000"));
    assert!(turn.reply.contains("💡 sisain 20% buat tabungan"));

    let budgets = app.store.all_budgets();
    assert_eq!(budgets.len(), 6);
    let total: f64 = budgets.iter().map(|b| b.amount).sum();
    assert_eq!(total, 8_000_000.0);
    assert!(budgets.iter().all(|b| b.account_id == account("user-1")));
    assert!(budgets.iter().all(|b| b.start_date <= b.end_date));

    let history = app
        .history
        .handle(GetHistoryQuery::new(started.session_token))
        .await
        .unwrap();
    let roles: Vec<Role> = history.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
    assert_eq!(history.last().unwrap().content, turn.reply);

    let after = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "makasih!"))
        .await
        .unwrap();
    assert_eq!(after.reply, CONVERSATION_FINISHED_REPLY);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn accounts_are_independent_but_limited_to_one_open_session() {
    let app = app();

    let first = app
        .start
        .handle(StartConversationCommand::new(account("a")))
        .await
        .unwrap();
    app.start
        .handle(StartConversationCommand::new(account("b")))
        .await
        .unwrap();

    let err = app
        .start
        .handle(StartConversationCommand::new(account("a")))
        .await
        .unwrap_err();
    assert!(matches!(err, ConversationError::Conflict(_)));

    let restarted = app
        .reset
        .handle(ResetConversationCommand::new(first.session_token))
        .await
        .unwrap();
    assert_ne!(restarted.session_token, first.session_token);
    assert_eq!(app.store.conversation_count(), 2);
}

#[tokio::test]
async fn failed_generation_can_be_retried_on_next_turn() {
    let app = app();
    let started = app
        .start
        .handle(StartConversationCommand::new(account("retry")))
        .await
        .unwrap();

    app.provider.push_response("{\"salary\": 8000000, \"categories\": [{\"name\": \"Makan\", \"amount\": 100, \"description\": \"\"}]}");
    let err = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "udah cukup"))
        .await
        .unwrap_err();
    assert_eq!(err.user_reply(), Some(GENERATION_FAILED_REPLY));
    assert!(app.store.all_budgets().is_empty());

    app.provider.push_response(PAYLOAD);
    let turn = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "coba lagi, udah cukup"))
        .await
        .unwrap();
    assert!(turn.completed);
    assert_eq!(app.store.all_budgets().len(), 6);
}

// =============================================================================
// Degraded Model
// =============================================================================

#[tokio::test]
async fn transient_errors_are_retried_transparently() {
    let provider = MockAIProvider::new()
        .with_error(AIError::rate_limited(1))
        .with_error(AIError::timeout(30))
        .with_response("halo! 👋");
    let app = app_with(provider, None);

    let started = app
        .start
        .handle(StartConversationCommand::new(account("flaky")))
        .await
        .unwrap();

    assert_eq!(started.greeting, "halo! 👋");
    assert_eq!(app.provider.call_count(), 3);
}

#[tokio::test]
async fn shutdown_cancels_pending_call_and_uses_fallback() {
    let (tx, rx) = watch::channel(false);
    let provider = MockAIProvider::new().with_delay(Duration::from_secs(60));
    let app = app_with(provider, Some(rx));

    tx.send(true).unwrap();
    let started = tokio::time::timeout(
        Duration::from_secs(5),
        app.start
            .handle(StartConversationCommand::new(account("bye"))),
    )
    .await
    .expect("cancelled call should not wait for the model")
    .unwrap();

    assert_eq!(started.greeting, FALLBACK_GREETING);
}

#[tokio::test]
async fn offline_provider_completes_a_session() {
    let app = app_with(MockAIProvider::offline(), None);
    let started = app
        .start
        .handle(StartConversationCommand::new(account("offline")))
        .await
        .unwrap();
    assert!(started.greeting.starts_with("(mode offline)"));

    let turn = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "gaji 5jt di jakarta"))
        .await
        .unwrap();
    assert!(!turn.completed);

    let turn = app
        .submit
        .handle(SubmitTurnCommand::new(started.session_token, "buatin budget"))
        .await
        .unwrap();
    assert!(turn.completed);
    assert_eq!(app.store.all_budgets().len(), 6);
}
