//! Per-candidate interview state.
//!
//! `SessionState` exclusively owns one field-set, one transcript, the phase
//! tracker and the technical-question counter. It holds no I/O and no shared
//! handles; the application layer drives it one turn at a time.

use super::export::{
    ExportMetadata, ExportSummary, InterviewAnalysis, InterviewExport, TranscriptEntry,
    EXPORT_VERSION, INTERVIEW_SYSTEM,
};
use super::extractor::extract_fields;
use super::phase::{InterviewPhase, PhaseTracker, ProgressSnapshot};
use super::prompts::{PromptContext, GREETING};
use super::summary::InterviewSummary;
use crate::domain::candidate::{CandidateField, CandidateFieldSet};
use crate::domain::conversation::{ConversationLog, Turn, TurnRole};
use crate::domain::foundation::Timestamp;

/// Technical questions asked before the interview moves on.
pub const DEFAULT_MAX_TECHNICAL_QUESTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct SessionState {
    fields: CandidateFieldSet,
    log: ConversationLog,
    tracker: PhaseTracker,
    technical_questions_asked: u32,
    max_technical_questions: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh state, seeded with the greeting turn.
    pub fn new() -> Self {
        Self::with_max_technical_questions(DEFAULT_MAX_TECHNICAL_QUESTIONS)
    }

    pub fn with_max_technical_questions(max: u32) -> Self {
        let mut log = ConversationLog::new();
        log.append(TurnRole::Assistant, GREETING);
        Self {
            fields: CandidateFieldSet::new(),
            log,
            tracker: PhaseTracker::new(),
            technical_questions_asked: 0,
            max_technical_questions: max,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn fields(&self) -> &CandidateFieldSet {
        &self.fields
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn phase(&self) -> InterviewPhase {
        self.tracker.phase()
    }

    pub fn phase_index(&self) -> usize {
        self.tracker.index()
    }

    pub fn technical_questions_asked(&self) -> u32 {
        self.technical_questions_asked
    }

    pub fn max_technical_questions(&self) -> u32 {
        self.max_technical_questions
    }

    pub fn missing_fields(&self) -> Vec<CandidateField> {
        self.fields.missing_fields()
    }

    /// Complete fields and the technical assessment reached.
    pub fn is_interview_completed(&self) -> bool {
        self.fields.is_complete() && self.tracker.index() >= 2
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turn mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Logs the candidate's text and extracts any newly provided fields.
    pub fn record_user_turn(&mut self, text: &str) -> Vec<CandidateField> {
        self.log.append(TurnRole::User, text);
        extract_fields(&mut self.fields, text)
    }

    /// Logs a reply received from the completion backend.
    ///
    /// During the technical assessment a reply containing a question mark
    /// counts as one technical question.
    pub fn record_assistant_reply(&mut self, text: &str) {
        self.log.append(TurnRole::Assistant, text);
        if self.phase() == InterviewPhase::TechnicalAssessment && text.contains('?') {
            self.record_technical_question();
        }
    }

    /// Logs the substitute turn used when the completion backend failed.
    pub fn record_fallback_reply(&mut self, text: &str) {
        self.log.append(TurnRole::Assistant, text);
    }

    /// Counts one technical question, saturating at the maximum.
    pub fn record_technical_question(&mut self) {
        if self.technical_questions_asked < self.max_technical_questions {
            self.technical_questions_asked += 1;
        }
    }

    /// Re-runs the phase tracker. Returns the new phase when it moved.
    pub fn update_progress(&mut self) -> Option<InterviewPhase> {
        let snapshot = ProgressSnapshot {
            has_any_field: !self.fields.is_empty(),
            all_fields_present: self.fields.is_complete(),
            technical_questions_asked: self.technical_questions_asked,
            max_technical_questions: self.max_technical_questions,
            turn_count: self.log.len(),
        };
        let advanced = self.tracker.advance(&snapshot);
        if let Some(phase) = advanced {
            tracing::info!(phase = %phase, index = self.tracker.index(), "interview phase advanced");
        }
        advanced
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────

    /// Turns logged before the most recent one.
    pub fn history_before_latest(&self) -> &[Turn] {
        let turns = self.log.turns();
        &turns[..turns.len().saturating_sub(1)]
    }

    /// Facts the system prompt needs. `missing` must outlive the context.
    pub fn prompt_context<'a>(&self, missing: &'a [CandidateField]) -> PromptContext<'a> {
        PromptContext {
            phase: self.phase(),
            missing,
            technical_questions_asked: self.technical_questions_asked,
            max_technical_questions: self.max_technical_questions,
            tech_stack: self.fields.tech_stack().map(|s| s.to_string()),
            experience: self.fields.experience(),
        }
    }

    /// Normalises phone and location, then reports progress.
    pub fn summary(&mut self) -> InterviewSummary {
        self.fields.normalize();
        let missing = self.fields.missing_fields();
        InterviewSummary {
            candidate_data: self.fields.clone(),
            conversation_length: self.log.len(),
            current_phase: self.phase(),
            phase_index: self.phase_index(),
            technical_questions_asked: self.technical_questions_asked,
            completion_percentage: self.fields.completion_percentage(),
            interview_completed: self.is_interview_completed(),
            missing_information: missing,
        }
    }

    /// Builds the full interview document. Normalises like [`Self::summary`].
    pub fn export(&mut self) -> InterviewExport {
        let summary = self.summary();
        InterviewExport {
            export_metadata: ExportMetadata {
                exported_at: Timestamp::now(),
                export_version: EXPORT_VERSION.to_string(),
                interview_system: INTERVIEW_SYSTEM.to_string(),
            },
            interview_analysis: InterviewAnalysis::from_counts(
                summary.conversation_length,
                summary.completion_percentage,
                summary.phase_index,
            ),
            interview_summary: ExportSummary {
                current_phase: summary.current_phase,
                phase_index: summary.phase_index,
                completion_percentage: summary.completion_percentage,
                interview_completed: summary.interview_completed,
                missing_information: summary.missing_information,
            },
            candidate_information: summary.candidate_data,
            conversation_transcript: self.log.iter().map(TranscriptEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: &mut SessionState, text: &str, reply: &str) {
        state.record_user_turn(text);
        state.record_assistant_reply(reply);
        state.update_progress();
    }

    #[test]
    fn starts_with_greeting_at_phase_zero() {
        let state = SessionState::new();
        assert_eq!(state.log().len(), 1);
        assert_eq!(state.log().turns()[0].text(), GREETING);
        assert_eq!(state.phase(), InterviewPhase::Greeting);
        assert_eq!(state.max_technical_questions(), 5);
    }

    #[test]
    fn first_field_moves_to_information_gathering() {
        let mut state = SessionState::new();
        feed(&mut state, "My name is Asha Rao", "Great! What's your email?");
        assert_eq!(state.phase_index(), 1);
        assert_eq!(state.fields().name(), Some("Asha Rao"));
    }

    #[test]
    fn questions_only_count_during_technical_assessment() {
        let mut state = SessionState::new();
        state.record_assistant_reply("What's your email?");
        assert_eq!(state.technical_questions_asked(), 0);
    }

    #[test]
    fn five_questions_complete_the_assessment() {
        let mut state = SessionState::new();
        for text in [
            "My name is Asha Rao",
            "asha.rao@example.com",
            "9876543210",
            "I have 4 years of experience",
            "I'm a backend developer from Pune, tech stack React and Python",
        ] {
            feed(&mut state, text, "Thanks!");
        }
        assert_eq!(state.phase(), InterviewPhase::TechnicalAssessment);

        for _ in 0..5 {
            feed(&mut state, "I'd use a queue", "Nice. How do you handle retries?");
        }
        assert_eq!(state.technical_questions_asked(), 5);
        assert_eq!(state.phase(), InterviewPhase::ExperienceDiscussion);
    }

    #[test]
    fn question_counter_saturates() {
        let mut state = SessionState::with_max_technical_questions(2);
        for _ in 0..4 {
            state.record_technical_question();
        }
        assert_eq!(state.technical_questions_asked(), 2);
    }

    #[test]
    fn history_excludes_latest_turn() {
        let mut state = SessionState::new();
        state.record_user_turn("hello");
        let history = state.history_before_latest();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text(), GREETING);
    }

    #[test]
    fn summary_reports_completion_and_normalises() {
        let mut state = SessionState::new();
        feed(&mut state, "My name is Asha Rao", "ok");
        feed(&mut state, "call me on 98765 43210", "ok");

        let summary = state.summary();
        assert_eq!(summary.candidate_data.phone(), Some("+91 98765 43210"));
        assert!((summary.completion_percentage - 200.0 / 7.0).abs() < 1e-9);
        assert!(!summary.interview_completed);
        assert_eq!(summary.conversation_length, 5);
        assert_eq!(summary.missing_information.len(), 5);

        let again = state.summary();
        assert_eq!(again.candidate_data, summary.candidate_data);
    }

    #[test]
    fn export_renders_transcript() {
        let mut state = SessionState::new();
        feed(&mut state, "My name is Asha Rao", "Nice to meet you!");

        let export = state.export();
        assert_eq!(export.export_metadata.export_version, "2.0");
        assert_eq!(export.conversation_transcript.len(), 3);
        assert_eq!(export.conversation_transcript[1].speaker, "Candidate");
        assert_eq!(export.conversation_transcript[1].message, "My name is Asha Rao");
        assert_eq!(export.interview_analysis.total_messages, 3);
        assert!(export.file_name().starts_with("interview_Asha_Rao_"));
    }
}
