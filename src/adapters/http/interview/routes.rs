//! Axum router configuration for interview endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    candidate_statistics, create_session, delete_candidate, end_session, get_export,
    get_summary, list_exports, load_export, send_message, stream_message, InterviewAppState,
};

/// Create the interview API routes.
///
/// # Routes
///
/// ## Live sessions
/// - `POST /sessions` - Start an interview
/// - `POST /sessions/:session_id/messages` - Blocking turn
/// - `POST /sessions/:session_id/messages/stream` - Streamed turn (SSE)
/// - `GET /sessions/:session_id/summary` - Progress summary
/// - `GET /sessions/:session_id/export` - Full document
/// - `POST /sessions/:session_id/end` - Persist and close
///
/// ## Stored data
/// - `GET /exports` - Export names, newest first
/// - `GET /exports/:name` - One export
/// - `GET /candidates/statistics` - Aggregates
/// - `DELETE /candidates/:candidate_id` - Erase a record
pub fn interview_routes() -> Router<InterviewAppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:session_id/messages", post(send_message))
        .route("/sessions/:session_id/messages/stream", post(stream_message))
        .route("/sessions/:session_id/summary", get(get_summary))
        .route("/sessions/:session_id/export", get(get_export))
        .route("/sessions/:session_id/end", post(end_session))
        .route("/exports", get(list_exports))
        .route("/exports/:name", get(load_export))
        .route("/candidates/statistics", get(candidate_statistics))
        .route("/candidates/:candidate_id", delete(delete_candidate))
}

/// Create the complete interview router, mounted under `/api`.
///
/// # Example
///
/// ```ignore
/// let app = interview_router().with_state(app_state);
/// ```
pub fn interview_router() -> Router<InterviewAppState> {
    Router::new().nest("/api", interview_routes())
}
