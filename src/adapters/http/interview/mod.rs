//! HTTP adapter for interview endpoints.
//!
//! - `POST /api/sessions` - Start an interview
//! - `POST /api/sessions/:session_id/messages` - Blocking turn
//! - `POST /api/sessions/:session_id/messages/stream` - Turn as Server-Sent Events
//! - `GET /api/sessions/:session_id/summary` - Progress summary
//! - `GET /api/sessions/:session_id/export` - Full document, session stays open
//! - `POST /api/sessions/:session_id/end` - Persist and close
//! - `GET /api/exports` - Stored export names, newest first
//! - `GET /api/exports/:name` - One stored export
//! - `GET /api/candidates/statistics` - Aggregates over stored records
//! - `DELETE /api/candidates/:candidate_id` - Erase one record

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod streaming;

pub use dto::*;
pub use handlers::{ApiError, InterviewAppState};
pub use routes::{interview_router, interview_routes};
pub use streaming::StreamEvent;
