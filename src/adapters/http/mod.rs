//! HTTP adapters - REST API implementations.
//!
//! The interview adapter exposes live sessions, streaming turns, exports and
//! candidate-record maintenance under `/api`.

pub mod interview;

pub use interview::{interview_router, InterviewAppState};
