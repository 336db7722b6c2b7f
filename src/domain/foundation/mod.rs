//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, timestamps, text helpers and error types
//! that form the vocabulary of the TalentScout domain.

mod errors;
mod ids;
mod text;
mod timestamp;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use text::title_case;
pub use timestamp::Timestamp;
