//! FinishInterviewHandler - Command handler for closing an interview.
//!
//! Saves the full export through the `TranscriptStore`, stores the
//! anonymized candidate record when any field survives sanitation, and
//! unregisters the session. The session stays registered if either write
//! fails, so the caller can retry. Finishing is idempotent under the session
//! lock: once persisted, the session is marked finished and every later
//! finish sees it as gone.

use std::sync::Arc;
use thiserror::Error;

use crate::application::SessionRegistry;
use crate::domain::candidate::{CandidateId, CandidateRecord, DEFAULT_RETENTION_DAYS};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{CandidateRepository, StorageError, TranscriptStore};

/// Command to finish an interview.
#[derive(Debug, Clone)]
pub struct FinishInterviewCommand {
    pub session_id: SessionId,
}

/// Result of a finished interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishInterviewResult {
    /// Name the export was stored under.
    pub export_name: String,
    /// Absent when the candidate gave nothing worth keeping.
    pub candidate_id: Option<CandidateId>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FinishInterviewError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Handler for finishing interviews.
pub struct FinishInterviewHandler {
    registry: SessionRegistry,
    transcripts: Arc<dyn TranscriptStore>,
    candidates: Arc<dyn CandidateRepository>,
    retention_days: i64,
}

impl FinishInterviewHandler {
    pub fn new(
        registry: SessionRegistry,
        transcripts: Arc<dyn TranscriptStore>,
        candidates: Arc<dyn CandidateRepository>,
    ) -> Self {
        Self {
            registry,
            transcripts,
            candidates,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    pub async fn handle(
        &self,
        cmd: FinishInterviewCommand,
    ) -> Result<FinishInterviewResult, FinishInterviewError> {
        let handle = self
            .registry
            .get(&cmd.session_id)
            .await
            .ok_or(FinishInterviewError::SessionNotFound(cmd.session_id))?;
        let mut session = handle.lock().await;
        if session.is_finished() {
            return Err(FinishInterviewError::SessionNotFound(cmd.session_id));
        }

        // 1. Persist the transcript
        let export = session.export();
        let export_name = self.transcripts.save(&export).await?;

        // 2. Persist the anonymized record, if anything is left after sanitation
        for issue in session.state().fields().validation_issues() {
            tracing::info!(session_id = %cmd.session_id, %issue, "field dropped from candidate record");
        }
        let candidate_id = match CandidateRecord::from_field_set(
            session.state().fields(),
            cmd.session_id,
            Timestamp::now(),
            self.retention_days,
        ) {
            Ok(record) => {
                self.candidates.save(&record).await?;
                Some(record.candidate_id)
            }
            Err(reason) => {
                tracing::info!(session_id = %cmd.session_id, %reason, "no candidate record stored");
                None
            }
        };

        // 3. Unregister
        session.mark_finished();
        drop(session);
        self.registry.remove(&cmd.session_id).await;

        tracing::info!(
            session_id = %cmd.session_id,
            export = %export_name,
            candidate_id = ?candidate_id.as_ref().map(CandidateId::as_str),
            "interview persisted"
        );

        Ok(FinishInterviewResult {
            export_name,
            candidate_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::{FileCandidateRepository, FileTranscriptStore};
    use crate::application::CompletionSettings;
    use crate::domain::interview::InterviewExport;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FailingTranscriptStore;

    #[async_trait]
    impl TranscriptStore for FailingTranscriptStore {
        async fn save(&self, _export: &InterviewExport) -> Result<String, StorageError> {
            Err(StorageError::Io("disk full".to_string()))
        }

        async fn list(&self) -> Result<Vec<String>, StorageError> {
            Ok(vec![])
        }

        async fn load(&self, name: &str) -> Result<InterviewExport, StorageError> {
            Err(StorageError::NotFound(name.to_string()))
        }
    }

    struct Fixture {
        _dir: TempDir,
        registry: SessionRegistry,
        transcripts: Arc<FileTranscriptStore>,
        candidates: Arc<FileCandidateRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            Self {
                registry: SessionRegistry::new(
                    Arc::new(MockAIProvider::new()),
                    CompletionSettings::default(),
                ),
                transcripts: Arc::new(FileTranscriptStore::new(dir.path().join("exports"))),
                candidates: Arc::new(FileCandidateRepository::new(dir.path().join("data"))),
                _dir: dir,
            }
        }

        fn handler(&self) -> FinishInterviewHandler {
            FinishInterviewHandler::new(
                self.registry.clone(),
                self.transcripts.clone(),
                self.candidates.clone(),
            )
        }
    }

    #[tokio::test]
    async fn persists_export_and_record_then_unregisters() {
        let fixture = Fixture::new();
        let (id, handle) = fixture.registry.create().await;
        {
            let mut session = handle.lock().await;
            session.process_message("My name is Asha Rao").await;
            session.process_message("asha.rao@example.com").await;
        }

        let result = fixture
            .handler()
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap();

        assert!(result.export_name.starts_with("interview_Asha_Rao_"));
        let candidate_id = result.candidate_id.unwrap();
        let record = fixture.candidates.find_by_id(&candidate_id).await.unwrap().unwrap();
        assert_eq!(record.session_id, id);
        assert_eq!(record.data.name.as_deref(), Some("Asha Rao"));
        assert!(fixture.registry.get(&id).await.is_none());

        let export = fixture.transcripts.load(&result.export_name).await.unwrap();
        assert_eq!(export.conversation_transcript.len(), 5);
    }

    #[tokio::test]
    async fn empty_interview_stores_transcript_only() {
        let fixture = Fixture::new();
        let (id, _) = fixture.registry.create().await;

        let result = fixture
            .handler()
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap();

        assert!(result.export_name.starts_with("interview_candidate_"));
        assert!(result.candidate_id.is_none());
    }

    #[tokio::test]
    async fn retention_days_set_record_expiry() {
        let fixture = Fixture::new();
        let (id, handle) = fixture.registry.create().await;
        handle.lock().await.process_message("My name is Asha Rao").await;

        let result = fixture
            .handler()
            .with_retention_days(30)
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap();

        let record = fixture
            .candidates
            .find_by_id(&result.candidate_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.data_retention_date, record.timestamp.add_days(30));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fixture = Fixture::new();
        let id = SessionId::new();

        let err = fixture
            .handler()
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap_err();

        assert_eq!(err, FinishInterviewError::SessionNotFound(id));
    }

    #[tokio::test]
    async fn racing_finishes_persist_once() {
        let fixture = Fixture::new();
        let (id, handle) = fixture.registry.create().await;
        handle.lock().await.process_message("My name is Asha Rao").await;
        let handler = Arc::new(fixture.handler());

        let first = tokio::spawn({
            let handler = Arc::clone(&handler);
            async move { handler.handle(FinishInterviewCommand { session_id: id }).await }
        });
        let second = tokio::spawn({
            let handler = Arc::clone(&handler);
            async move { handler.handle(FinishInterviewCommand { session_id: id }).await }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| r == &Err(FinishInterviewError::SessionNotFound(id))));
        assert_eq!(fixture.transcripts.list().await.unwrap().len(), 1);
        let stats = fixture.candidates.statistics(&Timestamp::now()).await.unwrap();
        assert_eq!(stats.total_candidates, 1);
    }

    #[tokio::test]
    async fn held_handle_sees_session_finished() {
        let fixture = Fixture::new();
        let (id, handle) = fixture.registry.create().await;

        fixture
            .handler()
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap();

        assert!(handle.lock().await.is_finished());
    }

    #[tokio::test]
    async fn storage_failure_keeps_session_registered() {
        let fixture = Fixture::new();
        let (id, _) = fixture.registry.create().await;
        let handler = FinishInterviewHandler::new(
            fixture.registry.clone(),
            Arc::new(FailingTranscriptStore),
            fixture.candidates.clone(),
        );

        let err = handler
            .handle(FinishInterviewCommand { session_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, FinishInterviewError::Storage(StorageError::Io(_))));
        assert!(fixture.registry.get(&id).await.is_some());
        assert!(!fixture.registry.get(&id).await.unwrap().lock().await.is_finished());
    }
}
