//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the interview core and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat-completion backend (blocking and streaming)
//! - `TranscriptStore` - Saved interview export documents
//! - `CandidateRepository` - Anonymized candidate records with retention

mod ai_provider;
mod candidate_repository;
mod storage_error;
mod transcript_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, CompletionStream, FinishReason,
    Message, MessageRole, ProviderInfo, StreamChunk, TokenUsage,
};
pub use candidate_repository::CandidateRepository;
pub use storage_error::StorageError;
pub use transcript_store::TranscriptStore;
