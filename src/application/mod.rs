//! Application layer - Sessions, streaming turns, and command handlers.
//!
//! This layer composes the interview domain with the ports. It owns no I/O
//! of its own; adapters are injected as trait objects.

pub mod handlers;
mod interview_session;
mod reply_stream;
mod session_registry;

pub use handlers::{
    FinishInterviewCommand, FinishInterviewError, FinishInterviewHandler, FinishInterviewResult,
};
pub use interview_session::{CompletionSettings, InterviewSession, TurnOutcome};
pub use reply_stream::{ReplyEvent, ReplyStream};
pub use session_registry::{SessionRegistry, SharedSession};
