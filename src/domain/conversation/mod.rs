//! Conversation module - the interview transcript.
//!
//! A [`ConversationLog`] is an append-only sequence of [`Turn`]s, replayed in
//! order for prompt construction and for export.

mod log;
mod turn;

pub use log::ConversationLog;
pub use turn::{Turn, TurnRole};
