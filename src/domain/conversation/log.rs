//! Append-only transcript of an interview.

use serde::Serialize;

use super::{Turn, TurnRole};

/// Ordered record of turns.
///
/// The only mutation is [`ConversationLog::append`]; turns are never edited,
/// removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps and appends a turn, returning a reference to it.
    pub fn append(&mut self, role: TurnRole, text: impl Into<String>) -> &Turn {
        self.turns.push(Turn::new(role, text));
        &self.turns[self.turns.len() - 1]
    }

    /// Turns in the order they were appended.
    pub fn iter(&self) -> impl Iterator<Item = &Turn> + '_ {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
