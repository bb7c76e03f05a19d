//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. Their order by
//! `created_at` is the only context the model ever sees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ConversationId, MessageId, Timestamp};

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Label used when rendering a transcript.
    pub fn transcript_label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable turn within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub role: Role,
    pub content: String,
    pub created_at: Timestamp,
}

impl Message {
    fn new(conversation_id: ConversationId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a user message.
    pub fn user(conversation_id: ConversationId, content: impl Into<String>) -> Self {
        Self::new(conversation_id, Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(conversation_id: ConversationId, content: impl Into<String>) -> Self {
        Self::new(conversation_id, Role::Assistant, content)
    }
}
