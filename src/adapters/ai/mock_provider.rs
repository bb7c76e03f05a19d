//! Mock AI Provider for testing.
//!
//! Provides a scripted implementation of the AIProvider port so tests and
//! local runs work without calling a real model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for retry and fallback testing
//! - Simulated latency for timeout and cancellation testing
//! - Call tracking for verification
//! - Prompt-keyed fallbacks, so `offline()` can drive a whole session
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_error(AIError::network("reset"))
//!     .with_response("hai! 👋");
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(provider.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::conversation::prompts::TRANSCRIPT_HEADING;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

const DEFAULT_CONTENT: &str = "Mock response";

const OFFLINE_REPLY: &str = "(mode offline) oke, gue catat! ceritain gaji, kota, sama gaya hidup kamu. \
kalau udah, ketik \"buatin budget\" ya.";

/// Balanced sample budget served to analysis prompts in offline mode.
const OFFLINE_BUDGET: &str = r#"{
  "salary": 5000000,
  "location": "Jakarta",
  "lifestyle": "moderate",
  "analysis": "contoh budget offline dengan gaji 5 juta, sambungkan model asli buat hasil personal",
  "categories": [
    {"name": "Kewajiban", "amount": 1500000, "description": "kos dan tagihan"},
    {"name": "Makan", "amount": 1250000, "description": "makan harian"},
    {"name": "Transport", "amount": 500000, "description": "transport harian"},
    {"name": "Healing", "amount": 500000, "description": "hiburan"},
    {"name": "Tabungan", "amount": 1000000, "description": "dana darurat"},
    {"name": "Lain-lain", "amount": 250000, "description": "cadangan"}
  ]
}"#;

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    /// (system prompt fragment, reply) used when the queue is empty.
    prompt_responses: Vec<(String, String)>,
    default_content: String,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompt_responses: Vec::new(),
            default_content: DEFAULT_CONTENT.to_string(),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scripted provider for running without a model: analysis prompts get a
    /// balanced sample budget, everything else a canned reply.
    pub fn offline() -> Self {
        let mut provider = Self::new()
            .with_default_response(OFFLINE_REPLY)
            .with_prompt_response(TRANSCRIPT_HEADING, OFFLINE_BUDGET);
        provider.info = ProviderInfo::new("mock", "offline-script");
        provider
    }

    /// Reply used when the queue is empty and no prompt fragment matches.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default_content = content.into();
        self
    }

    /// Reply used when the queue is empty and the system prompt contains `fragment`.
    pub fn with_prompt_response(
        mut self,
        fragment: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.prompt_responses.push((fragment.into(), content.into()));
        self
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        locked(&self.responses).push_back(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: AIError) -> Self {
        locked(&self.responses).push_back(Err(error));
        self
    }

    /// Queues the same failure `times` times.
    pub fn with_errors(self, error: AIError, times: usize) -> Self {
        {
            let mut responses = locked(&self.responses);
            for _ in 0..times {
                responses.push_back(Err(error.clone()));
            }
        }
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a response on an already-shared provider.
    pub fn push_response(&self, content: impl Into<String>) {
        locked(&self.responses).push_back(Ok(content.into()));
    }

    /// Queues a failure on an already-shared provider.
    pub fn push_error(&self, error: AIError) {
        locked(&self.responses).push_back(Err(error));
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }

    fn next_response(&self, request: &CompletionRequest) -> Result<String, AIError> {
        if let Some(queued) = locked(&self.responses).pop_front() {
            return queued;
        }
        let system_prompt = request.system_prompt.as_deref().unwrap_or_default();
        let content = self
            .prompt_responses
            .iter()
            .find(|(fragment, _)| system_prompt.contains(fragment.as_str()))
            .map_or(&self.default_content, |(_, content)| content);
        Ok(content.clone())
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        locked(&self.calls).push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let content = self.next_response(&request)?;
        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(10, 20),
            model: self.info.model.clone(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(None, "trace-1"))
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
        assert_eq!(provider.complete(request()).await.unwrap().content, "Mock response");
    }

    #[tokio::test]
    async fn injects_errors() {
        let provider = MockAIProvider::new()
            .with_errors(AIError::network("reset"), 2)
            .with_response("ok");

        assert!(provider.complete(request()).await.is_err());
        assert!(provider.complete(request()).await.is_err());
        assert_eq!(provider.complete(request()).await.unwrap().content, "ok");
    }

    #[tokio::test]
    async fn records_calls_including_failures() {
        let provider = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
        let _ = provider.complete(request().with_system_prompt("p")).await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.calls()[0].system_prompt.as_deref(), Some("p"));
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let provider = MockAIProvider::new();
        let shared = provider.clone();
        shared.push_response("from clone");

        assert_eq!(provider.complete(request()).await.unwrap().content, "from clone");
        assert_eq!(shared.call_count(), 1);
    }

    #[tokio::test]
    async fn prompt_fragment_selects_fallback_reply() {
        let provider = MockAIProvider::new()
            .with_default_response("chat")
            .with_prompt_response("ANALYZE", "{}");

        let analysis = request().with_system_prompt("please ANALYZE this");
        assert_eq!(provider.complete(analysis).await.unwrap().content, "{}");
        assert_eq!(provider.complete(request()).await.unwrap().content, "chat");
    }

    mod offline {
        use super::*;
        use crate::domain::budget::BudgetExtractor;
        use crate::domain::conversation::prompts::{analysis_prompt, PERSONA_PROMPT};
        use crate::domain::conversation::Message;
        use crate::domain::foundation::ConversationId;

        #[tokio::test]
        async fn analysis_prompt_gets_a_valid_budget() {
            let id = ConversationId::new();
            let prompt = analysis_prompt(&[Message::user(id, "buatin budget")]);

            let reply = MockAIProvider::offline()
                .complete(request().with_system_prompt(prompt))
                .await
                .unwrap();

            let analysis = BudgetExtractor::default().extract(&reply.content).unwrap();
            assert_eq!(analysis.salary, 5_000_000.0);
            assert_eq!(analysis.categories.len(), 6);
        }

        #[tokio::test]
        async fn persona_prompt_gets_canned_reply() {
            let reply = MockAIProvider::offline()
                .complete(request().with_system_prompt(PERSONA_PROMPT))
                .await
                .unwrap();

            assert!(reply.content.starts_with("(mode offline)"));
            assert!(BudgetExtractor::default().extract(&reply.content).is_err());
        }
    }
}
