//! HTTP DTOs (Data Transfer Objects) for interview endpoints.
//!
//! Summaries, exports and statistics are returned as their domain types;
//! only request bodies and turn-level responses get dedicated shapes here.

use serde::{Deserialize, Serialize};

use crate::application::TurnOutcome;
use crate::domain::foundation::SessionId;
use crate::domain::interview::{InterviewPhase, SessionState};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One candidate message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    /// Raw candidate text. Blank text is answered with a prompt to say more.
    #[serde(default)]
    pub content: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a newly started interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub greeting: String,
}

/// Response for one processed turn, blocking or streamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Text to show the candidate.
    pub reply: String,
    /// `replied`, `degraded` or `empty_input`.
    pub status: String,
    pub phase: InterviewPhase,
    pub phase_index: usize,
    pub completion_percentage: f64,
    /// True when the turn closed the interview and it was persisted.
    pub session_ended: bool,
}

impl TurnResponse {
    pub fn new(outcome: &TurnOutcome, state: &SessionState, session_ended: bool) -> Self {
        Self {
            reply: outcome.reply().to_string(),
            status: outcome.status().to_string(),
            phase: state.phase(),
            phase_index: state.phase_index(),
            completion_percentage: state.fields().completion_percentage(),
            session_ended,
        }
    }
}

/// Response for an explicitly ended interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionResponse {
    /// Absent when nothing valid was collected.
    pub candidate_id: Option<String>,
    pub export_name: String,
}

/// Response for a record deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCandidateResponse {
    pub deleted: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_tolerates_missing_content() {
        let request: SendMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(request.content.is_empty());
    }

    #[test]
    fn turn_response_reflects_state() {
        let mut state = SessionState::new();
        state.record_user_turn("My name is Asha Rao");
        let outcome = TurnOutcome::Replied {
            reply: "Nice to meet you!".to_string(),
        };

        let response = TurnResponse::new(&outcome, &state, false);

        assert_eq!(response.reply, "Nice to meet you!");
        assert_eq!(response.status, "replied");
        assert_eq!(response.phase, InterviewPhase::Greeting);
        assert!(response.completion_percentage > 0.0);
    }

    #[test]
    fn turn_response_serializes_phase_in_snake_case() {
        let state = SessionState::new();
        let response = TurnResponse::new(&TurnOutcome::EmptyInput, &state, false);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["phase"], "greeting");
        assert_eq!(json["status"], "empty_input");
        assert_eq!(json["session_ended"], false);
    }

    #[test]
    fn error_response_has_code_and_message() {
        let json = serde_json::to_value(ErrorResponse::new("SESSION_NOT_FOUND", "gone")).unwrap();
        assert_eq!(json["code"], "SESSION_NOT_FOUND");
        assert_eq!(json["message"], "gone");
    }
}
