//! HTTP handlers for interview endpoints.
//!
//! These handlers connect Axum routes to live sessions in the
//! `SessionRegistry` and to the persistence ports.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures::stream::{unfold, Stream};
use futures::StreamExt;
use thiserror::Error;
use tokio::sync::{mpsc, MutexGuard};

use crate::application::{
    FinishInterviewCommand, FinishInterviewError, FinishInterviewHandler, FinishInterviewResult,
    InterviewSession, ReplyEvent, SessionRegistry, SharedSession,
};
use crate::domain::candidate::{CandidateId, CandidateStatistics};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::{is_exit_signal, InterviewExport, InterviewSummary};
use crate::ports::{CandidateRepository, StorageError, TranscriptStore};

use super::dto::{
    CreateSessionResponse, DeleteCandidateResponse, EndSessionResponse, ErrorResponse,
    SendMessageRequest, TurnResponse,
};
use super::streaming::StreamEvent;

/// Events buffered between the turn task and a slow SSE client.
const STREAM_BUFFER: usize = 32;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the interview routes. Cloned per request.
#[derive(Clone)]
pub struct InterviewAppState {
    pub registry: SessionRegistry,
    pub transcripts: Arc<dyn TranscriptStore>,
    pub candidates: Arc<dyn CandidateRepository>,
    pub finish_handler: Arc<FinishInterviewHandler>,
    /// Longest accepted candidate message, in characters.
    pub max_message_length: usize,
}

impl InterviewAppState {
    pub fn new(
        registry: SessionRegistry,
        transcripts: Arc<dyn TranscriptStore>,
        candidates: Arc<dyn CandidateRepository>,
        retention_days: i64,
        max_message_length: usize,
    ) -> Self {
        let finish_handler = FinishInterviewHandler::new(
            registry.clone(),
            Arc::clone(&transcripts),
            Arc::clone(&candidates),
        )
        .with_retention_days(retention_days);

        Self {
            registry,
            transcripts,
            candidates,
            finish_handler: Arc::new(finish_handler),
            max_message_length,
        }
    }

    async fn session(&self, raw_id: &str) -> Result<(SessionId, SharedSession), ApiError> {
        let id: SessionId = raw_id
            .parse()
            .map_err(|_| ApiError::SessionNotFound(raw_id.to_string()))?;
        let handle = self
            .registry
            .get(&id)
            .await
            .ok_or_else(|| ApiError::SessionNotFound(raw_id.to_string()))?;
        Ok((id, handle))
    }

    /// Locks a session, treating one finished while the caller waited as gone.
    async fn lock_open<'a>(
        raw_id: &str,
        handle: &'a SharedSession,
    ) -> Result<MutexGuard<'a, InterviewSession>, ApiError> {
        let session = handle.lock().await;
        if session.is_finished() {
            return Err(ApiError::SessionNotFound(raw_id.to_string()));
        }
        Ok(session)
    }

    fn check_length(&self, content: &str) -> Result<(), ApiError> {
        if content.chars().count() > self.max_message_length {
            return Err(ApiError::MessageTooLong {
                max: self.max_message_length,
            });
        }
        Ok(())
    }

    async fn finish(&self, session_id: SessionId) -> Result<FinishInterviewResult, ApiError> {
        Ok(self
            .finish_handler
            .handle(FinishInterviewCommand { session_id })
            .await?)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Start an interview
pub async fn create_session(State(state): State<InterviewAppState>) -> impl IntoResponse {
    let (session_id, handle) = state.registry.create().await;
    let greeting = handle.lock().await.greeting().to_string();

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            greeting,
        }),
    )
}

/// POST /api/sessions/:session_id/messages - Process one turn
///
/// A message carrying an exit keyword is answered first; the interview is
/// then persisted and closed.
pub async fn send_message(
    State(state): State<InterviewAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let (id, handle) = state.session(&session_id).await?;
    state.check_length(&request.content)?;

    let mut session = InterviewAppState::lock_open(&session_id, &handle).await?;
    let outcome = session.process_message(&request.content).await;
    let mut response = TurnResponse::new(&outcome, session.state(), false);
    drop(session);

    if is_exit_signal(&request.content) {
        state.finish(id).await?;
        response.session_ended = true;
    }

    Ok(Json(response))
}

/// POST /api/sessions/:session_id/messages/stream - Process one turn as SSE
pub async fn stream_message(
    State(state): State<InterviewAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let (id, handle) = state.session(&session_id).await?;
    state.check_length(&request.content)?;

    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    tokio::spawn(run_streamed_turn(state, id, handle, request.content, tx));

    let events = unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((event.into_sse(), rx))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Drives one streamed turn. Runs detached from the request so that a
/// disconnecting client is noticed through the closed channel, at which
/// point the reply stream is dropped and the turn closed with an apology.
async fn run_streamed_turn(
    state: InterviewAppState,
    id: SessionId,
    handle: SharedSession,
    content: String,
    tx: mpsc::Sender<StreamEvent>,
) {
    let mut session = handle.lock_owned().await;
    if session.is_finished() {
        let err = ApiError::SessionNotFound(id.to_string());
        let _ = tx.send(StreamEvent::Error(err.to_error_response())).await;
        return;
    }

    let outcome = {
        let mut replies = session.process_message_stream(&content);
        loop {
            let event = tokio::select! {
                _ = tx.closed() => {
                    tracing::info!(session_id = %id, "client disconnected mid-turn");
                    return;
                }
                event = replies.next() => event,
            };
            match event {
                Some(ReplyEvent::Delta(text)) => {
                    // A failed send means the client is gone; the next
                    // iteration sees the closed channel.
                    let _ = tx.send(StreamEvent::delta(text)).await;
                }
                Some(ReplyEvent::Done(outcome)) => break outcome,
                None => return,
            }
        }
    };

    let mut response = TurnResponse::new(&outcome, session.state(), false);
    drop(session);

    let event = if is_exit_signal(&content) {
        match state.finish(id).await {
            Ok(_) => {
                response.session_ended = true;
                StreamEvent::Done(response)
            }
            Err(err) => StreamEvent::Error(err.to_error_response()),
        }
    } else {
        StreamEvent::Done(response)
    };

    if tx.send(event).await.is_err() {
        tracing::debug!(session_id = %id, "client left before final event");
    }
}

/// GET /api/sessions/:session_id/summary - Progress summary
pub async fn get_summary(
    State(state): State<InterviewAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<InterviewSummary>, ApiError> {
    let (_, handle) = state.session(&session_id).await?;
    let summary = InterviewAppState::lock_open(&session_id, &handle)
        .await?
        .summary();
    Ok(Json(summary))
}

/// GET /api/sessions/:session_id/export - Full interview document
pub async fn get_export(
    State(state): State<InterviewAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<InterviewExport>, ApiError> {
    let (_, handle) = state.session(&session_id).await?;
    let export = InterviewAppState::lock_open(&session_id, &handle)
        .await?
        .export();
    Ok(Json(export))
}

/// POST /api/sessions/:session_id/end - Persist and close the interview
pub async fn end_session(
    State(state): State<InterviewAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<EndSessionResponse>, ApiError> {
    let (id, _) = state.session(&session_id).await?;
    let result = state.finish(id).await?;

    Ok(Json(EndSessionResponse {
        candidate_id: result.candidate_id.map(|c| c.as_str().to_string()),
        export_name: result.export_name,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Stored Data Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/exports - Stored export names, newest first
pub async fn list_exports(
    State(state): State<InterviewAppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.transcripts.list().await?))
}

/// GET /api/exports/:name - One stored export
pub async fn load_export(
    State(state): State<InterviewAppState>,
    Path(name): Path<String>,
) -> Result<Json<InterviewExport>, ApiError> {
    Ok(Json(state.transcripts.load(&name).await?))
}

/// GET /api/candidates/statistics - Aggregates over stored records
pub async fn candidate_statistics(
    State(state): State<InterviewAppState>,
) -> Result<Json<CandidateStatistics>, ApiError> {
    Ok(Json(state.candidates.statistics(&Timestamp::now()).await?))
}

/// DELETE /api/candidates/:candidate_id - Erase one stored record
pub async fn delete_candidate(
    State(state): State<InterviewAppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<DeleteCandidateResponse>, ApiError> {
    let id = CandidateId::from(candidate_id.clone());
    if !state.candidates.delete(&id).await? {
        return Err(ApiError::CandidateNotFound(candidate_id));
    }
    Ok(Json(DeleteCandidateResponse { deleted: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("candidate record not found: {0}")]
    CandidateNotFound(String),

    #[error("message exceeds {max} characters")]
    MessageTooLong { max: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            Self::CandidateNotFound(_) => (StatusCode::NOT_FOUND, "CANDIDATE_NOT_FOUND"),
            Self::MessageTooLong { .. } => (StatusCode::BAD_REQUEST, "MESSAGE_TOO_LONG"),
            Self::Storage(StorageError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let (_, code) = self.status_and_code();
        ErrorResponse::new(code, self.to_string())
    }
}

impl From<FinishInterviewError> for ApiError {
    fn from(err: FinishInterviewError) -> Self {
        match err {
            FinishInterviewError::SessionNotFound(id) => Self::SessionNotFound(id.to_string()),
            FinishInterviewError::Storage(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, _) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}
