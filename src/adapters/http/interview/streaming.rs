//! Server-Sent Event messages for streamed turns.
//!
//! A streamed turn produces zero or more `delta` events, then exactly one
//! `done` event whose payload matches the blocking route. An `error` event
//! replaces `done` only when the turn was answered but could not be
//! persisted on exit.

use axum::response::sse::Event;
use serde::Serialize;

use super::dto::{ErrorResponse, TurnResponse};

/// Next fragment of the assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeltaMessage {
    pub delta: String,
}

/// Everything the server sends on a turn stream.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Delta(DeltaMessage),
    Done(TurnResponse),
    Error(ErrorResponse),
}

impl StreamEvent {
    pub fn delta(text: impl Into<String>) -> Self {
        Self::Delta(DeltaMessage { delta: text.into() })
    }

    /// SSE `event:` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delta(_) => "delta",
            Self::Done(_) => "done",
            Self::Error(_) => "error",
        }
    }

    /// Encodes the payload as JSON so that line breaks in reply text never
    /// split the `data:` field.
    pub fn into_sse(self) -> Result<Event, axum::Error> {
        let event = Event::default().event(self.name());
        match self {
            Self::Delta(message) => event.json_data(message),
            Self::Done(response) => event.json_data(response),
            Self::Error(error) => event.json_data(error),
        }
    }
}
