//! Storage Adapters
//!
//! File-backed implementations of the persistence ports.
//!
//! ## Available Adapters
//!
//! - **FileTranscriptStore** - One pretty-printed JSON document per finished interview
//! - **FileCandidateRepository** - Anonymized records in a single `candidates.json` array
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCandidateRepository, FileTranscriptStore};
//!
//! let transcripts = FileTranscriptStore::new("./exports");
//! let candidates = FileCandidateRepository::new("./data");
//! ```

mod file_candidate_repository;
mod file_transcript_store;

pub use file_candidate_repository::FileCandidateRepository;
pub use file_transcript_store::FileTranscriptStore;
