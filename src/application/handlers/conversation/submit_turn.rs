//! SubmitTurnHandler - processes one user message.
//!
//! Each turn either continues the interview or, when intent detection fires,
//! hands off to [`BudgetGenerator`] and closes the conversation.

use std::sync::Arc;

use super::{BudgetGenerator, ConversationError};
use crate::application::gateway::ModelGateway;
use crate::config::IntakeConfig;
use crate::domain::budget::Budget;
use crate::domain::conversation::prompts::{
    CONVERSATION_FINISHED_REPLY, FALLBACK_REPLY, PERSONA_PROMPT,
};
use crate::domain::conversation::{IntentDetector, Message};
use crate::domain::foundation::SessionToken;
use crate::ports::{ConversationRepository, MessageRepository};

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub session_token: SessionToken,
    pub content: String,
}

impl SubmitTurnCommand {
    pub fn new(session_token: SessionToken, content: impl Into<String>) -> Self {
        Self {
            session_token,
            content: content.into(),
        }
    }
}

/// Assistant reply for a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub reply: String,
    pub completed: bool,
    /// Budgets created by this turn; empty unless it generated them.
    pub budgets: Vec<Budget>,
}

impl TurnResult {
    fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            completed: false,
            budgets: Vec::new(),
        }
    }
}

/// Handler for SubmitTurn commands.
pub struct SubmitTurnHandler {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
    gateway: Arc<ModelGateway>,
    generator: BudgetGenerator,
    detector: IntentDetector,
}

impl SubmitTurnHandler {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<ModelGateway>,
        generator: BudgetGenerator,
        intake: &IntakeConfig,
    ) -> Self {
        Self {
            conversations,
            messages,
            gateway,
            generator,
            detector: IntentDetector::new(intake.generation_message_threshold),
        }
    }

    /// Processes a user message and returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` for blank content
    /// - `NotFound` for an unknown session token
    /// - `Validation` / `Upstream` when budget generation fails; the user
    ///   message is kept, no reply is stored, and the conversation stays open
    /// - `Repository` on storage failure
    pub async fn handle(&self, cmd: SubmitTurnCommand) -> Result<TurnResult, ConversationError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        let mut conversation = self
            .conversations
            .find_by_session_token(&cmd.session_token)
            .await?;

        if conversation.is_completed() {
            tracing::debug!(
                conversation_id = %conversation.id,
                "Turn on completed conversation"
            );
            return Ok(TurnResult {
                completed: true,
                ..TurnResult::reply(CONVERSATION_FINISHED_REPLY)
            });
        }

        self.messages
            .create(&Message::user(conversation.id, content))
            .await?;
        let history = self.messages.find_by_conversation(&conversation.id).await?;

        let assessment = self.detector.assess(content, history.len());
        tracing::debug!(
            conversation_id = %conversation.id,
            message_count = history.len(),
            intent = ?assessment.intent,
            reason = ?assessment.reason,
            mentions_salary = assessment.mentions_salary,
            confirmation = ?assessment.confirmation,
            "Assessed turn"
        );

        let result = if assessment.should_generate() {
            let generated = self
                .generator
                .generate(&mut conversation, &history)
                .await
                .map_err(|err| {
                    tracing::error!(
                        conversation_id = %conversation.id,
                        error = %err,
                        "Budget generation failed"
                    );
                    err
                })?;
            TurnResult {
                reply: generated.summary,
                completed: true,
                budgets: generated.budgets,
            }
        } else {
            match self.gateway.generate_with_retry(PERSONA_PROMPT, &history).await {
                Ok(text) => TurnResult::reply(text),
                Err(err) => {
                    tracing::warn!(
                        conversation_id = %conversation.id,
                        error = %err,
                        "Reply unavailable, using scripted fallback"
                    );
                    TurnResult::reply(FALLBACK_REPLY)
                }
            }
        };

        self.messages
            .create(&Message::assistant(conversation.id, result.reply.clone()))
            .await?;

        Ok(result)
    }
}
