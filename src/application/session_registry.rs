//! Live interview sessions keyed by id.
//!
//! Each session sits behind its own async mutex so one candidate's turns run
//! strictly in order while different candidates proceed concurrently. The map
//! lock is held only long enough to insert, look up or remove a handle.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::interview_session::{CompletionSettings, InterviewSession};
use crate::domain::foundation::SessionId;
use crate::domain::interview::{SessionState, DEFAULT_MAX_TECHNICAL_QUESTIONS};
use crate::ports::AIProvider;

/// Handle to one session. Lock it for the duration of a turn.
pub type SharedSession = Arc<Mutex<InterviewSession>>;

#[derive(Clone)]
pub struct SessionRegistry {
    provider: Arc<dyn AIProvider>,
    settings: CompletionSettings,
    max_technical_questions: u32,
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new(provider: Arc<dyn AIProvider>, settings: CompletionSettings) -> Self {
        Self {
            provider,
            settings,
            max_technical_questions: DEFAULT_MAX_TECHNICAL_QUESTIONS,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of technical questions each new session asks.
    pub fn with_max_technical_questions(mut self, max: u32) -> Self {
        self.max_technical_questions = max;
        self
    }

    /// Starts a fresh interview and registers it.
    pub async fn create(&self) -> (SessionId, SharedSession) {
        let id = SessionId::new();
        let session = InterviewSession::with_state(
            id,
            SessionState::with_max_technical_questions(self.max_technical_questions),
            Arc::clone(&self.provider),
            self.settings,
        );
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        tracing::info!(session_id = %id, "interview session started");
        (id, handle)
    }

    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Unregisters a session. Holders of the handle keep it alive until dropped.
    pub async fn remove(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("settings", &self.settings)
            .field("max_technical_questions", &self.max_technical_questions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Arc::new(MockAIProvider::new()), CompletionSettings::default())
    }

    #[tokio::test]
    async fn create_then_get_returns_same_session() {
        let registry = registry();
        let (id, handle) = registry.create().await;

        let found = registry.get(&id).await.unwrap();
        assert!(Arc::ptr_eq(&handle, &found));
        assert_eq!(found.lock().await.id(), id);
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        assert!(registry().get(&SessionId::new()).await.is_none());
    }

    #[tokio::test]
    async fn remove_unregisters() {
        let registry = registry();
        let (id, _) = registry.create().await;

        assert!(registry.remove(&id).await.is_some());
        assert!(registry.get(&id).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let registry = registry();
        let (a, first) = registry.create().await;
        let (b, second) = registry.create().await;
        assert_ne!(a, b);

        first.lock().await.process_message("My name is Asha Rao").await;

        assert_eq!(first.lock().await.state().log().len(), 3);
        assert_eq!(second.lock().await.state().log().len(), 1);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn configured_question_limit_reaches_sessions() {
        let registry = registry().with_max_technical_questions(3);
        let (_, handle) = registry.create().await;

        assert_eq!(handle.lock().await.state().max_technical_questions(), 3);
    }
}
