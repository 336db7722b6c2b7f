//! Command handlers that coordinate sessions with the persistence ports.

mod finish_interview;

pub use finish_interview::{
    FinishInterviewCommand, FinishInterviewError, FinishInterviewHandler, FinishInterviewResult,
};
