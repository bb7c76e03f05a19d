//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (start, submit turn, reset) and the history query live in
//! `handlers`; `gateway` wraps the model port with timeouts and retries.

pub mod gateway;
pub mod handlers;

pub use gateway::{GatewayConfig, GatewayError, ModelGateway, Sleeper, TokioSleeper};
pub use handlers::conversation::{
    BudgetGenerator, ConversationError, GeneratedBudget, GetHistoryHandler, GetHistoryQuery,
    OpenSession, ResetConversationCommand, ResetConversationHandler, StartConversationCommand,
    StartConversationHandler, StartConversationResult, SubmitTurnCommand, SubmitTurnHandler,
    TurnResult,
};
