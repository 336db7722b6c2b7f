//! Turn entity: one message in the interview transcript.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The candidate.
    User,
    /// The interviewing assistant.
    Assistant,
}

impl TurnRole {
    /// Speaker label used in exported transcripts.
    pub fn speaker(&self) -> &'static str {
        match self {
            Self::User => "Candidate",
            Self::Assistant => "Assistant",
        }
    }
}

/// An immutable message within the transcript.
///
/// # Invariants
///
/// - `created_at` is stamped at construction and never changes
/// - there are no mutators; a turn is frozen once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    text: String,
    created_at: Timestamp,
}

impl Turn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role_and_stamp() {
        let before = Timestamp::now();
        let turn = Turn::user("hello");
        assert!(turn.is_user());
        assert_eq!(turn.text(), "hello");
        assert!(!turn.created_at().is_before(&before));

        assert_eq!(Turn::assistant("hi").role(), TurnRole::Assistant);
    }

    #[test]
    fn speakers_match_transcript_labels() {
        assert_eq!(TurnRole::User.speaker(), "Candidate");
        assert_eq!(TurnRole::Assistant.speaker(), "Assistant");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
    }
}
