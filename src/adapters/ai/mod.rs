//! AI adapters - Implementations of the `AIProvider` port.
//!
//! - `OpenAIProvider` speaks the OpenAI chat-completions protocol, which local
//!   servers such as LM Studio also expose.
//! - `MockAIProvider` serves scripted replies for tests.

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
