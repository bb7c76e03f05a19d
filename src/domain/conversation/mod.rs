//! Conversation module - guided budget intake sessions.
//!
//! # Module Organization
//!
//! - `conversation` - Conversation entity and completion
//! - `state` - Open/Completed state machine
//! - `message` - Immutable user/assistant turns
//! - `intent` - Budget-generation intent detection
//! - `prompts` - Persona/analysis prompts and scripted replies
//! - `summary` - Budget summary formatting

mod conversation;
mod intent;
mod message;
pub mod prompts;
mod state;
mod summary;

pub use conversation::Conversation;
pub use intent::{
    Intent, IntentAssessment, IntentDetector, IntentReason,
    DEFAULT_MESSAGE_THRESHOLD, GENERATION_TRIGGERS,
};
pub use message::{Message, Role};
pub use state::ConversationState;
pub use summary::{category_emoji, format_budget_summary, format_rupiah};
