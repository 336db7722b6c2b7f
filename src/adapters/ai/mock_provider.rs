//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing interviews to run without a completion server.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Simulated delays for deadline testing
//! - Error injection, before or in the middle of a stream
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Nice to meet you! What's your email address?")
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    ProviderInfo, StreamChunk, TokenUsage,
};

/// Reply used once the queue is exhausted.
const DEFAULT_REPLY: &str = "Thank you! Could you tell me a bit more?";

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    /// Fail before any content is produced.
    Error(AIError),
    /// Stream `partial`, then fail with `error`. `complete` fails outright.
    BrokenStream { partial: String, error: AIError },
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
            info: ProviderInfo::new("mock", "mock-model-1").with_streaming(true),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            finish_reason: FinishReason::Stop,
        })
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Adds a stream that breaks after emitting `partial`.
    pub fn with_broken_stream(self, partial: impl Into<String>, error: AIError) -> Self {
        self.push(MockResponse::BrokenStream {
            partial: partial.into(),
            error,
        })
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn push(self, response: MockResponse) -> Self {
        locked(&self.responses).push_back(response);
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }

    /// Most recent request, if any.
    pub fn last_call(&self) -> Option<CompletionRequest> {
        locked(&self.calls).last().cloned()
    }

    fn next_response(&self) -> MockResponse {
        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_REPLY.to_string(),
                finish_reason: FinishReason::Stop,
            })
    }

    async fn begin(&self, request: CompletionRequest) -> MockResponse {
        locked(&self.calls).push(request);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.next_response()
    }
}

/// Splits text into word-sized fragments whose concatenation is the input.
fn word_chunks(content: &str) -> Vec<Result<StreamChunk, AIError>> {
    content
        .split_inclusive(' ')
        .map(|word| Ok(StreamChunk::content(word)))
        .collect()
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        match self.begin(request).await {
            MockResponse::Success {
                content,
                finish_reason,
            } => Ok(CompletionResponse {
                usage: TokenUsage::new(10, content.split_whitespace().count() as u32),
                content,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) | MockResponse::BrokenStream { error: err, .. } => Err(err),
        }
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<CompletionStream, AIError> {
        match self.begin(request).await {
            MockResponse::Success {
                content,
                finish_reason,
            } => {
                let usage = TokenUsage::new(10, content.split_whitespace().count() as u32);
                let chunks = stream::iter(word_chunks(&content))
                    .chain(stream::once(async move {
                        Ok(StreamChunk::final_chunk(finish_reason, usage))
                    }));
                Ok(Box::pin(chunks))
            }
            MockResponse::Error(err) => Err(err),
            MockResponse::BrokenStream { partial, error } => {
                let chunks = stream::iter(word_chunks(&partial))
                    .chain(stream::once(async move { Err(error) }));
                Ok(Box::pin(chunks))
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
