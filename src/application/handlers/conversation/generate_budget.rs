//! BudgetGenerator - turns a finished transcript into persisted budgets.

use std::sync::Arc;

use super::ConversationError;
use crate::application::gateway::ModelGateway;
use crate::domain::budget::{Budget, BudgetAnalysis, BudgetExtractor};
use crate::domain::conversation::prompts::analysis_prompt;
use crate::domain::conversation::{format_budget_summary, Conversation, Message};
use crate::domain::foundation::Timestamp;
use crate::domain::normalization::{is_supported_location, validate_salary};
use crate::ports::ConversationRepository;

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedBudget {
    pub budgets: Vec<Budget>,
    pub summary: String,
    pub analysis: BudgetAnalysis,
}

/// Runs the analysis prompt, validates the payload, and completes the conversation.
pub struct BudgetGenerator {
    conversations: Arc<dyn ConversationRepository>,
    gateway: Arc<ModelGateway>,
    extractor: BudgetExtractor,
}

impl BudgetGenerator {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        gateway: Arc<ModelGateway>,
        rounding_interval: f64,
    ) -> Self {
        Self {
            conversations,
            gateway,
            extractor: BudgetExtractor::new(rounding_interval),
        }
    }

    /// Generates, stores, and summarizes a budget for `conversation`.
    ///
    /// On success the budgets and the completed conversation are stored in
    /// one atomic write. On any error nothing is written and `conversation`
    /// is left untouched, so a later turn can try again.
    pub async fn generate(
        &self,
        conversation: &mut Conversation,
        history: &[Message],
    ) -> Result<GeneratedBudget, ConversationError> {
        let prompt = analysis_prompt(history);
        let raw = self.gateway.generate_with_retry(&prompt, &[]).await?;

        let analysis = self.extractor.extract(&raw).map_err(|err| {
            tracing::warn!(
                conversation_id = %conversation.id,
                error = %err,
                "Rejected budget payload"
            );
            ConversationError::from(err)
        })?;

        if let Err(err) = validate_salary(analysis.salary) {
            tracing::warn!(
                conversation_id = %conversation.id,
                salary = analysis.salary,
                error = %err,
                "Salary outside expected range"
            );
        }
        if !is_supported_location(&analysis.location) {
            tracing::debug!(
                conversation_id = %conversation.id,
                location = %analysis.location,
                "Location not in supported city list"
            );
        }

        let now = Timestamp::now();
        let budgets = Budget::from_analysis(&conversation.account_id, &analysis, now)?;
        let mut completed = conversation.clone();
        completed.complete(now)?;
        self.conversations
            .complete_with_budgets(&completed, &budgets)
            .await?;
        *conversation = completed;

        tracing::info!(
            conversation_id = %conversation.id,
            account_id = %conversation.account_id,
            categories = budgets.len(),
            salary = analysis.salary,
            "Budget generated"
        );

        let summary = format_budget_summary(&budgets, &analysis);
        Ok(GeneratedBudget {
            budgets,
            summary,
            analysis,
        })
    }
}
