//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Scripted provider for tests and offline runs
//! - `OpenAIProvider` - OpenAI chat-completions API

mod mock_provider;
mod openai_provider;

pub use mock_provider::MockAIProvider;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
