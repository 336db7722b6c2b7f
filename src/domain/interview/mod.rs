//! Interview module - the extraction and phase-progression core.
//!
//! # Components
//!
//! - [`extractor`]: regex/keyword matchers that fill candidate fields
//! - [`PhaseTracker`]: monotonic state machine over [`InterviewPhase`]
//! - [`SessionState`]: owns fields, transcript, phase and counters
//! - [`prompts`]: instruction text for the completion backend
//! - [`InterviewSummary`] / [`InterviewExport`]: read-side reports
//! - [`is_exit_signal`]: farewell detection

mod exit;
mod export;
pub mod extractor;
mod phase;
pub mod prompts;
mod state;
mod summary;

pub use exit::{is_exit_signal, EXIT_KEYWORDS};
pub use export::{
    ExportMetadata, ExportSummary, InterviewAnalysis, InterviewExport, TranscriptEntry,
    EXPORT_VERSION, INTERVIEW_SYSTEM,
};
pub use extractor::extract_fields;
pub use phase::{InterviewPhase, PhaseTracker, ProgressSnapshot, LATE_PHASE_TURN_THRESHOLD};
pub use prompts::{PromptContext, EMPTY_INPUT_REPLY, GREETING};
pub use state::{SessionState, DEFAULT_MAX_TECHNICAL_QUESTIONS};
pub use summary::InterviewSummary;
