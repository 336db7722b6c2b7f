//! Point-in-time progress report for one interview.

use serde::{Deserialize, Serialize};

use super::InterviewPhase;
use crate::domain::candidate::{CandidateField, CandidateFieldSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub candidate_data: CandidateFieldSet,
    /// Turns logged so far, greeting included.
    pub conversation_length: usize,
    pub current_phase: InterviewPhase,
    pub phase_index: usize,
    pub technical_questions_asked: u32,
    pub missing_information: Vec<CandidateField>,
    pub completion_percentage: f64,
    /// No field missing and the technical assessment reached.
    pub interview_completed: bool,
}
