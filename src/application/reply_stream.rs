//! Cancellable stream of reply fragments for one interview turn.
//!
//! Yields [`ReplyEvent::Delta`] for every non-empty fragment the backend
//! sends, then exactly one [`ReplyEvent::Done`] once the turn has been logged.
//! An error item from the backend ends the stream early with a degraded
//! outcome. Dropping the stream before `Done` logs an apology so the
//! transcript never holds an unanswered candidate turn.

use futures::future::BoxFuture;
use futures::{FutureExt, Stream};
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::interview_session::{InterviewSession, TurnOutcome};
use crate::ports::{AIError, CompletionStream};

/// Item produced by a [`ReplyStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyEvent {
    /// Next piece of the reply.
    Delta(String),
    /// The turn is logged; no more items follow.
    Done(TurnOutcome),
}

enum Phase {
    Connecting(BoxFuture<'static, Result<CompletionStream, AIError>>),
    Receiving { chunks: CompletionStream, reply: String },
    Ready(TurnOutcome),
    Finished,
}

pub struct ReplyStream<'a> {
    session: &'a mut InterviewSession,
    phase: Phase,
}

impl<'a> ReplyStream<'a> {
    pub(crate) fn connecting(
        session: &'a mut InterviewSession,
        connect: BoxFuture<'static, Result<CompletionStream, AIError>>,
    ) -> Self {
        Self {
            session,
            phase: Phase::Connecting(connect),
        }
    }

    /// A stream that yields only the given outcome.
    pub(crate) fn immediate(session: &'a mut InterviewSession, outcome: TurnOutcome) -> Self {
        Self {
            session,
            phase: Phase::Ready(outcome),
        }
    }

    /// True while the turn is still waiting on the backend.
    fn in_flight(&self) -> bool {
        matches!(self.phase, Phase::Connecting(_) | Phase::Receiving { .. })
    }

    fn conclude(&mut self, result: Result<String, AIError>) -> Poll<Option<ReplyEvent>> {
        self.phase = Phase::Finished;
        let outcome = self.session.conclude_turn(result);
        Poll::Ready(Some(ReplyEvent::Done(outcome)))
    }
}

impl Stream for ReplyStream<'_> {
    type Item = ReplyEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.phase {
                Phase::Connecting(connect) => match connect.poll_unpin(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Ok(chunks)) => {
                        this.phase = Phase::Receiving {
                            chunks,
                            reply: String::new(),
                        };
                    }
                    Poll::Ready(Err(err)) => return this.conclude(Err(err)),
                },
                Phase::Receiving { chunks, reply } => match chunks.as_mut().poll_next(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Some(Ok(chunk))) => {
                        if chunk.delta.is_empty() {
                            continue;
                        }
                        reply.push_str(&chunk.delta);
                        return Poll::Ready(Some(ReplyEvent::Delta(chunk.delta)));
                    }
                    Poll::Ready(Some(Err(err))) => return this.conclude(Err(err)),
                    Poll::Ready(None) => {
                        let full = mem::take(reply);
                        return this.conclude(Ok(full));
                    }
                },
                Phase::Ready(_) | Phase::Finished => {
                    return match mem::replace(&mut this.phase, Phase::Finished) {
                        Phase::Ready(outcome) => Poll::Ready(Some(ReplyEvent::Done(outcome))),
                        _ => Poll::Ready(None),
                    };
                }
            }
        }
    }
}

impl Drop for ReplyStream<'_> {
    fn drop(&mut self) {
        if self.in_flight() {
            self.session.abandon_turn("stream cancelled");
        }
    }
}

impl std::fmt::Debug for ReplyStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            Phase::Connecting(_) => "connecting",
            Phase::Receiving { .. } => "receiving",
            Phase::Ready(_) => "ready",
            Phase::Finished => "finished",
        };
        f.debug_struct("ReplyStream")
            .field("session_id", &self.session.id())
            .field("phase", &phase)
            .finish()
    }
}
