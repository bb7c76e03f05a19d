//! AI Provider Port - Interface for the generative chat model.
//!
//! This port abstracts the chat-completion API so the model gateway and the
//! intake handlers never depend on a specific vendor.
//!
//! # Design
//!
//! - One non-streaming completion per call; retries live in the gateway
//! - Provider-agnostic, role-tagged message format
//! - Error variants for the failure modes a gateway needs to log

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Message, Role};
use crate::domain::foundation::ConversationId;

/// Port for generative chat-model interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prior turns, oldest first.
    pub messages: Vec<ChatMessage>,
    /// System prompt sent ahead of the turns.
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    /// Appends domain messages in order, tagging each by its role.
    pub fn with_history(mut self, history: &[Message]) -> Self {
        self.messages.extend(history.iter().map(ChatMessage::from));
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A role-tagged message as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        };
        Self::new(role, message.content.clone())
    }
}

/// Role of a provider-level message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Conversation the call is made for, if any.
    pub conversation_id: Option<ConversationId>,
    /// Trace ID for log correlation.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(conversation_id: Option<ConversationId>, trace_id: impl Into<String>) -> Self {
        Self {
            conversation_id,
            trace_id: trace_id.into(),
        }
    }

    /// Metadata for a call tied to a conversation, with a fresh trace ID.
    pub fn for_conversation(conversation_id: ConversationId) -> Self {
        Self::new(Some(conversation_id), uuid::Uuid::new_v4().to_string())
    }
}

/// Response from a chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    /// Hit max_tokens limit.
    Length,
    ContentFilter,
}

/// Provider name and model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// Unreadable response, including one with no choices.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Returns true if this error is likely to clear on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
