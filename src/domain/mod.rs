//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, text helpers, errors)
//! - `candidate` - Candidate fields, validation rules and anonymised records
//! - `conversation` - Append-only interview transcript
//! - `interview` - Field extraction, phase tracking and session state

pub mod candidate;
pub mod conversation;
pub mod foundation;
pub mod interview;
