//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Model Port
//!
//! - `AIProvider` - Chat-completion API of the generative model
//!
//! ## Storage Ports
//!
//! - `ConversationRepository` - Conversation lifecycle persistence
//! - `MessageRepository` - Ordered, immutable turns

mod ai_provider;
mod conversation_repository;
mod message_repository;

pub use ai_provider::{
    AIError, AIProvider, ChatMessage, ChatRole, CompletionRequest, CompletionResponse,
    FinishReason, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use conversation_repository::ConversationRepository;
pub use message_repository::MessageRepository;
