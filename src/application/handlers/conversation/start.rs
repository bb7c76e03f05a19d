//! StartConversationHandler - opens a new intake session with a greeting.

use std::sync::Arc;

use super::ConversationError;
use crate::application::gateway::ModelGateway;
use crate::domain::conversation::prompts::{FALLBACK_GREETING, PERSONA_PROMPT};
use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{AccountId, ConversationId, SessionToken};
use crate::ports::{ConversationRepository, MessageRepository};

/// Command to start a session for an account.
#[derive(Debug, Clone)]
pub struct StartConversationCommand {
    pub account_id: AccountId,
}

impl StartConversationCommand {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

/// Result of starting (or resetting) a session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartConversationResult {
    pub conversation_id: ConversationId,
    pub session_token: SessionToken,
    pub greeting: String,
}

/// Session handed back by [`StartConversationHandler::resume_or_start`].
#[derive(Debug, Clone, PartialEq)]
pub enum OpenSession {
    /// A fresh conversation was opened.
    Started(StartConversationResult),
    /// The account's open conversation was picked up again.
    Resumed {
        conversation_id: ConversationId,
        session_token: SessionToken,
    },
}

impl OpenSession {
    pub fn session_token(&self) -> SessionToken {
        match self {
            OpenSession::Started(started) => started.session_token,
            OpenSession::Resumed { session_token, .. } => *session_token,
        }
    }
}

/// Handler for StartConversation commands.
pub struct StartConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
    gateway: Arc<ModelGateway>,
}

impl StartConversationHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<ModelGateway>,
    ) -> Self {
        Self {
            conversations,
            messages,
            gateway,
        }
    }

    /// Opens a conversation and stores the greeting as its first message.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the account already has an open conversation
    /// - `Repository` on storage failure
    pub async fn handle(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<StartConversationResult, ConversationError> {
        // Fast path; the storage-level unique index is authoritative.
        if let Some(open) = self.conversations.find_open_by_account(&cmd.account_id).await? {
            tracing::info!(
                account_id = %cmd.account_id,
                session_token = %open.session_token,
                "Start refused: account already has an open conversation"
            );
            return Err(ConversationError::Conflict(format!(
                "account {} already has an active conversation; finish or reset it first",
                cmd.account_id
            )));
        }

        let conversation = Conversation::start(cmd.account_id);
        self.conversations.create(&conversation).await?;

        let greeting = match self.gateway.generate_with_retry(PERSONA_PROMPT, &[]).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    conversation_id = %conversation.id,
                    error = %err,
                    "Greeting unavailable, using scripted fallback"
                );
                FALLBACK_GREETING.to_string()
            }
        };

        self.messages
            .create(&Message::assistant(conversation.id, greeting.clone()))
            .await?;

        tracing::info!(
            conversation_id = %conversation.id,
            session_token = %conversation.session_token,
            account_id = %conversation.account_id,
            "Conversation started"
        );

        Ok(StartConversationResult {
            conversation_id: conversation.id,
            session_token: conversation.session_token,
            greeting,
        })
    }

    /// Returns the account's open conversation if there is one, otherwise
    /// starts a new one. Resuming never calls the model.
    pub async fn resume_or_start(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<OpenSession, ConversationError> {
        if let Some(open) = self.conversations.find_open_by_account(&cmd.account_id).await? {
            tracing::info!(
                conversation_id = %open.id,
                account_id = %open.account_id,
                "Resuming open conversation"
            );
            return Ok(OpenSession::Resumed {
                conversation_id: open.id,
                session_token: open.session_token,
            });
        }
        self.handle(cmd).await.map(OpenSession::Started)
    }
}
