//! Interview phases and the tracker that advances through them.
//!
//! The tracker is a monotonic index into [`InterviewPhase::SEQUENCE`]. It is
//! re-evaluated after every turn and moves forward at most one step at a time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the scripted interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Greeting,
    InformationGathering,
    TechnicalAssessment,
    ExperienceDiscussion,
    ProjectDeepDive,
    CulturalFit,
    CandidateQuestions,
    NextSteps,
    Completed,
}

impl InterviewPhase {
    /// All phases in script order. `Completed` is the terminal sentinel.
    pub const SEQUENCE: [InterviewPhase; 9] = [
        InterviewPhase::Greeting,
        InterviewPhase::InformationGathering,
        InterviewPhase::TechnicalAssessment,
        InterviewPhase::ExperienceDiscussion,
        InterviewPhase::ProjectDeepDive,
        InterviewPhase::CulturalFit,
        InterviewPhase::CandidateQuestions,
        InterviewPhase::NextSteps,
        InterviewPhase::Completed,
    ];

    /// Highest reachable index.
    pub const LAST_INDEX: usize = Self::SEQUENCE.len() - 1;

    /// Phase at `index`; anything past the end is `Completed`.
    pub fn from_index(index: usize) -> Self {
        Self::SEQUENCE
            .get(index)
            .copied()
            .unwrap_or(InterviewPhase::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::InformationGathering => "information_gathering",
            Self::TechnicalAssessment => "technical_assessment",
            Self::ExperienceDiscussion => "experience_discussion",
            Self::ProjectDeepDive => "project_deep_dive",
            Self::CulturalFit => "cultural_fit",
            Self::CandidateQuestions => "candidate_questions",
            Self::NextSteps => "next_steps",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs the tracker reads when deciding whether to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// At least one candidate field is set.
    pub has_any_field: bool,
    /// Every candidate field is set.
    pub all_fields_present: bool,
    pub technical_questions_asked: u32,
    pub max_technical_questions: u32,
    /// Total turns in the log, greeting included.
    pub turn_count: usize,
}

/// Turns after which the later phases advance one step per turn.
pub const LATE_PHASE_TURN_THRESHOLD: usize = 20;

/// Monotonic position in the interview script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseTracker {
    index: usize,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> InterviewPhase {
        InterviewPhase::from_index(self.index)
    }

    /// Applies the first matching rule, in priority order:
    ///
    /// 1. greeting, any field set: advance
    /// 2. information gathering, no field missing: advance
    /// 3. technical assessment, question budget spent: advance
    /// 4. any later phase, more than 20 turns logged: advance, capped at the last index
    ///
    /// Returns the new phase when the index moved.
    pub fn advance(&mut self, snapshot: &ProgressSnapshot) -> Option<InterviewPhase> {
        let next = match self.index {
            0 if snapshot.has_any_field => 1,
            1 if snapshot.all_fields_present => 2,
            2 if snapshot.technical_questions_asked >= snapshot.max_technical_questions => 3,
            i if i >= 3 && snapshot.turn_count > LATE_PHASE_TURN_THRESHOLD => {
                (i + 1).min(InterviewPhase::LAST_INDEX)
            }
            _ => self.index,
        };

        if next > self.index {
            self.index = next;
            Some(self.phase())
        } else {
            None
        }
    }
}
