//! Portable JSON document describing a whole interview.

use serde::{Deserialize, Serialize};

use super::InterviewPhase;
use crate::domain::candidate::{CandidateField, CandidateFieldSet};
use crate::domain::conversation::Turn;
use crate::domain::foundation::Timestamp;

pub const EXPORT_VERSION: &str = "2.0";
pub const INTERVIEW_SYSTEM: &str = "TalentScout AI Hiring Assistant";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewExport {
    pub export_metadata: ExportMetadata,
    pub candidate_information: CandidateFieldSet,
    pub interview_summary: ExportSummary,
    pub interview_analysis: InterviewAnalysis,
    pub conversation_transcript: Vec<TranscriptEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub exported_at: Timestamp,
    pub export_version: String,
    pub interview_system: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub current_phase: InterviewPhase,
    pub phase_index: usize,
    pub completion_percentage: f64,
    pub interview_completed: bool,
    pub missing_information: Vec<CandidateField>,
}

/// Rough engagement figures derived from turn counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewAnalysis {
    pub information_completeness: f64,
    /// Three points per turn, capped at 100.
    pub engagement_level: u32,
    pub total_messages: usize,
    /// Half a minute per turn, e.g. `"4.5 minutes"`.
    pub estimated_duration: String,
    pub phases_covered: usize,
}

impl InterviewAnalysis {
    pub fn from_counts(total_messages: usize, completeness: f64, phase_index: usize) -> Self {
        let engagement = (total_messages.saturating_mul(3)).min(100) as u32;
        Self {
            information_completeness: completeness,
            engagement_level: engagement,
            total_messages,
            estimated_duration: format!("{:.1} minutes", total_messages as f64 * 0.5),
            phases_covered: phase_index + 1,
        }
    }
}

/// One transcript line as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// `"Assistant"` or `"Candidate"`.
    pub speaker: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl From<&Turn> for TranscriptEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            speaker: turn.role().speaker().to_string(),
            message: turn.text().to_string(),
            timestamp: *turn.created_at(),
        }
    }
}

impl InterviewExport {
    /// Suggested file name: `interview_<Name_With_Underscores>_<YYYYmmdd_HHMMSS>.json`.
    pub fn file_name(&self) -> String {
        let name: String = self
            .candidate_information
            .name()
            .unwrap_or("candidate")
            .trim()
            .replace(' ', "_")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let name = if name.is_empty() { "candidate".to_string() } else { name };
        format!(
            "interview_{}_{}.json",
            name,
            self.export_metadata.exported_at.file_stamp()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_scales_with_turns() {
        let analysis = InterviewAnalysis::from_counts(9, 100.0, 2);
        assert_eq!(analysis.engagement_level, 27);
        assert_eq!(analysis.estimated_duration, "4.5 minutes");
        assert_eq!(analysis.phases_covered, 3);
    }

    #[test]
    fn engagement_is_capped() {
        assert_eq!(InterviewAnalysis::from_counts(50, 0.0, 0).engagement_level, 100);
    }

    #[test]
    fn transcript_entries_use_speaker_labels() {
        let entry = TranscriptEntry::from(&Turn::user("hi"));
        assert_eq!(entry.speaker, "Candidate");
        let entry = TranscriptEntry::from(&Turn::assistant("hello"));
        assert_eq!(entry.speaker, "Assistant");
    }
}
