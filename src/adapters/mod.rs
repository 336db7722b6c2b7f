//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Chat completion clients (OpenAI-compatible HTTP, mock)
//! - `storage` - File-backed transcript and candidate stores
//! - `http` - Axum REST and SSE surface

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockAIProvider, MockResponse, OpenAIConfig, OpenAIProvider};
pub use http::{interview_router, InterviewAppState};
pub use storage::{FileCandidateRepository, FileTranscriptStore};
