//! Model Gateway - resilient wrapper around the generative model.
//!
//! `generate` is one bounded attempt; `generate_with_retry` runs up to
//! `max_attempts` of them, sleeping `2^attempt` seconds between failures
//! (1s, 2s, 4s, ...) and never after the last one. An optional shutdown
//! signal aborts the in-flight call or backoff promptly.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::config::AiConfig;
use crate::domain::conversation::Message;
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

/// Tunables for model calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Bound on a single attempt.
    pub timeout: Duration,
    pub max_attempts: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            max_attempts: 3,
        }
    }
}

impl From<&AiConfig> for GatewayConfig {
    fn from(config: &AiConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Errors surfaced by the gateway. Single-attempt failures never escape
/// `generate_with_retry` except as the `source` of `Exhausted`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("model call failed after {attempts} attempt(s): {source}")]
    Exhausted { attempts: u32, source: AIError },

    #[error("model call cancelled")]
    Cancelled,
}

/// Delay source for backoff between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Backoff before the attempt following failure number `attempt` (zero-based).
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(32))
}

/// Gateway to the generative model.
pub struct ModelGateway {
    provider: Arc<dyn AIProvider>,
    config: GatewayConfig,
    sleeper: Arc<dyn Sleeper>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl ModelGateway {
    pub fn new(provider: Arc<dyn AIProvider>, config: GatewayConfig) -> Self {
        Self {
            provider,
            config,
            sleeper: Arc::new(TokioSleeper),
            shutdown: None,
        }
    }

    /// Replaces the backoff sleeper.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Aborts calls once `true` is sent on the channel.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    fn build_request(&self, system_prompt: &str, history: &[Message]) -> CompletionRequest {
        let metadata = match history.first() {
            Some(message) => RequestMetadata::for_conversation(message.conversation_id),
            None => RequestMetadata::new(None, uuid::Uuid::new_v4().to_string()),
        };

        CompletionRequest::new(metadata)
            .with_system_prompt(system_prompt)
            .with_history(history)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
    }

    /// One call bounded by the configured timeout.
    pub async fn generate(&self, system_prompt: &str, history: &[Message]) -> Result<String, AIError> {
        let request = self.build_request(system_prompt, history);
        let response = tokio::time::timeout(self.config.timeout, self.provider.complete(request))
            .await
            .map_err(|_| AIError::timeout(self.config.timeout.as_secs()))??;
        Ok(response.content)
    }

    /// Up to `max_attempts` calls with exponential backoff between failures.
    pub async fn generate_with_retry(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, GatewayError> {
        let attempts = self.config.max_attempts.max(1);
        let mut shutdown = self.shutdown.clone();
        let mut last_error = None;

        for attempt in 0..attempts {
            match cancellable(&mut shutdown, self.generate(system_prompt, history)).await? {
                Ok(content) => {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt + 1, "Model call recovered after retry");
                    }
                    return Ok(content);
                }
                Err(err) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        transient = err.is_transient(),
                        error = %err,
                        "Model call failed"
                    );
                    last_error = Some(err);
                }
            }

            if attempt + 1 < attempts {
                cancellable(&mut shutdown, self.sleeper.sleep(backoff_delay(attempt))).await?;
            }
        }

        let source = last_error.unwrap_or_else(|| AIError::network("no attempt was made"));
        tracing::error!(attempts, error = %source, "Model call exhausted all attempts");
        Err(GatewayError::Exhausted { attempts, source })
    }
}

/// Runs `fut` unless the shutdown signal fires first.
async fn cancellable<F: Future>(
    shutdown: &mut Option<watch::Receiver<bool>>,
    fut: F,
) -> Result<F::Output, GatewayError> {
    tokio::select! {
        biased;
        _ = shutdown_requested(shutdown) => {
            tracing::info!("Model call cancelled by shutdown signal");
            Err(GatewayError::Cancelled)
        }
        output = fut => Ok(output),
    }
}

async fn shutdown_requested(shutdown: &mut Option<watch::Receiver<bool>>) {
    let Some(rx) = shutdown else {
        return std::future::pending().await;
    };
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone: nobody can cancel any more.
            return std::future::pending().await;
        }
    }
}
