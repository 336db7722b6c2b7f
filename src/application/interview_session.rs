//! Per-candidate turn orchestration.
//!
//! `InterviewSession` couples one [`SessionState`] with the completion
//! backend. Each turn follows the same order: log the candidate's text, extract
//! fields, build the prompt, call the backend, log the reply (or an apology on
//! failure), re-run the phase tracker. Failures never escape a turn.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::foundation::SessionId;
use crate::domain::interview::prompts::{apology, system_prompt};
use crate::domain::interview::{
    InterviewExport, InterviewSummary, SessionState, EMPTY_INPUT_REPLY,
};
use crate::domain::conversation::TurnRole;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

use super::reply_stream::ReplyStream;

/// Sampling tunables forwarded with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

impl From<&AiConfig> for CompletionSettings {
    fn from(ai: &AiConfig) -> Self {
        Self {
            temperature: ai.temperature,
            max_tokens: ai.max_tokens,
        }
    }
}

/// What a turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The backend answered; the reply was logged.
    Replied { reply: String },
    /// The backend failed; an apology was logged in its place.
    Degraded { reply: String, reason: String },
    /// Blank input; nothing was logged.
    EmptyInput,
}

impl TurnOutcome {
    /// Text to show the candidate.
    pub fn reply(&self) -> &str {
        match self {
            Self::Replied { reply } | Self::Degraded { reply, .. } => reply,
            Self::EmptyInput => EMPTY_INPUT_REPLY,
        }
    }

    /// Short machine-readable label.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Replied { .. } => "replied",
            Self::Degraded { .. } => "degraded",
            Self::EmptyInput => "empty_input",
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// One candidate's interview, driven one turn at a time.
pub struct InterviewSession {
    id: SessionId,
    state: SessionState,
    provider: Arc<dyn AIProvider>,
    settings: CompletionSettings,
    finished: bool,
}

impl InterviewSession {
    pub fn new(provider: Arc<dyn AIProvider>, settings: CompletionSettings) -> Self {
        Self::with_state(SessionId::new(), SessionState::new(), provider, settings)
    }

    pub fn with_state(
        id: SessionId,
        state: SessionState,
        provider: Arc<dyn AIProvider>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            id,
            state,
            provider,
            settings,
            finished: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// First assistant turn, logged at construction.
    pub fn greeting(&self) -> &str {
        self.state.log().turns().first().map(|t| t.text()).unwrap_or_default()
    }

    /// True once the interview has been persisted. A finished session
    /// accepts no further turns and is not persisted again.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    pub fn summary(&mut self) -> InterviewSummary {
        self.state.summary()
    }

    pub fn export(&mut self) -> InterviewExport {
        self.state.export()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turns
    // ─────────────────────────────────────────────────────────────────────────

    /// Processes one candidate message with a blocking completion call.
    pub async fn process_message(&mut self, text: &str) -> TurnOutcome {
        self.run_turn(text, None).await
    }

    /// Like [`Self::process_message`], but a backend call still running after
    /// `deadline` is abandoned and the turn degrades to the apology.
    pub async fn process_message_with_deadline(
        &mut self,
        text: &str,
        deadline: Duration,
    ) -> TurnOutcome {
        self.run_turn(text, Some(deadline)).await
    }

    /// Processes one candidate message, streaming the reply.
    ///
    /// The returned stream yields fragments, then exactly one terminal
    /// outcome. Dropping it early closes the turn with an apology.
    pub fn process_message_stream(&mut self, text: &str) -> ReplyStream<'_> {
        if text.trim().is_empty() {
            return ReplyStream::immediate(self, TurnOutcome::EmptyInput);
        }
        let request = self.begin_turn(text);
        let provider = Arc::clone(&self.provider);
        let connect = Box::pin(async move { provider.stream_complete(request).await });
        ReplyStream::connecting(self, connect)
    }

    async fn run_turn(&mut self, text: &str, deadline: Option<Duration>) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::EmptyInput;
        }

        let request = self.begin_turn(text);
        let provider = Arc::clone(&self.provider);
        let mut pending = PendingTurn::new(self);
        let call = provider.complete(request);
        let result = match deadline {
            None => call.await,
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(AIError::Timeout {
                    timeout_secs: whole_seconds(limit),
                })
            }),
        };

        pending.conclude(result.map(|response| response.content))
    }

    /// Logs the candidate turn, extracts fields and builds the request.
    pub(crate) fn begin_turn(&mut self, text: &str) -> CompletionRequest {
        let text = text.trim();
        let extracted = self.state.record_user_turn(text);
        if !extracted.is_empty() {
            tracing::debug!(session_id = %self.id, fields = ?extracted, "candidate fields captured");
        }

        let missing = self.state.missing_fields();
        let prompt = system_prompt(&self.state.prompt_context(&missing));

        let mut request = CompletionRequest::new()
            .with_system_prompt(prompt)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens)
            .with_session(self.id);
        for turn in self.state.history_before_latest() {
            let role = match turn.role() {
                TurnRole::User => MessageRole::User,
                TurnRole::Assistant => MessageRole::Assistant,
            };
            request = request.with_message(role, turn.text());
        }
        request.with_message(MessageRole::User, text)
    }

    /// Logs the backend's reply (or an apology), then advances the tracker.
    pub(crate) fn conclude_turn(&mut self, result: Result<String, AIError>) -> TurnOutcome {
        let outcome = match result {
            Ok(reply) if !reply.trim().is_empty() => {
                self.state.record_assistant_reply(&reply);
                TurnOutcome::Replied { reply }
            }
            Ok(_) => self.degrade("empty response from completion service".to_string()),
            Err(err) => self.degrade(err.to_string()),
        };
        self.state.update_progress();
        outcome
    }

    /// Closes a turn whose caller went away before the reply arrived.
    pub(crate) fn abandon_turn(&mut self, reason: &str) {
        self.degrade(reason.to_string());
        self.state.update_progress();
    }

    fn degrade(&mut self, reason: String) -> TurnOutcome {
        tracing::warn!(session_id = %self.id, reason = %reason, "completion failed, replying with apology");
        let reply = apology(&reason);
        self.state.record_fallback_reply(&reply);
        TurnOutcome::Degraded { reply, reason }
    }
}

/// A blocking turn awaiting the backend. Dropped before `conclude`, it closes
/// the turn with an apology so the candidate's message is never left unanswered.
struct PendingTurn<'a> {
    session: &'a mut InterviewSession,
    open: bool,
}

impl<'a> PendingTurn<'a> {
    fn new(session: &'a mut InterviewSession) -> Self {
        Self {
            session,
            open: true,
        }
    }

    fn conclude(&mut self, result: Result<String, AIError>) -> TurnOutcome {
        self.open = false;
        self.session.conclude_turn(result)
    }
}

impl Drop for PendingTurn<'_> {
    fn drop(&mut self) {
        if self.open {
            self.session.abandon_turn("request cancelled");
        }
    }
}

/// Seconds reported for an expired deadline, rounded up so that sub-second
/// limits never read as zero.
fn whole_seconds(limit: Duration) -> u32 {
    u32::try_from(limit.as_millis().div_ceil(1000)).unwrap_or(u32::MAX)
}

impl std::fmt::Debug for InterviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewSession")
            .field("id", &self.id)
            .field("phase", &self.state.phase())
            .field("turns", &self.state.log().len())
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::interview::{InterviewPhase, GREETING};

    fn session(provider: &MockAIProvider) -> InterviewSession {
        InterviewSession::new(Arc::new(provider.clone()), CompletionSettings::default())
    }

    mod blocking {
        use super::*;

        #[tokio::test]
        async fn reply_is_logged_after_user_turn() {
            let provider = MockAIProvider::new().with_response("Nice to meet you, Asha!");
            let mut session = session(&provider);

            let outcome = session.process_message("My name is Asha Rao").await;

            assert_eq!(
                outcome,
                TurnOutcome::Replied {
                    reply: "Nice to meet you, Asha!".to_string()
                }
            );
            let turns = session.state().log().turns();
            assert_eq!(turns.len(), 3);
            assert_eq!(turns[0].text(), GREETING);
            assert_eq!(turns[1].text(), "My name is Asha Rao");
            assert_eq!(turns[2].text(), "Nice to meet you, Asha!");
            assert_eq!(session.state().phase(), InterviewPhase::InformationGathering);
        }

        #[tokio::test]
        async fn request_carries_prompt_history_and_single_user_message() {
            let provider = MockAIProvider::new();
            let mut session = session(&provider);

            session.process_message("My name is Asha Rao").await;
            session.process_message("asha@example.com").await;

            let request = provider.last_call().unwrap();
            let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();
            assert_eq!(contents.len(), 4);
            assert_eq!(contents[0], GREETING);
            assert_eq!(contents[1], "My name is Asha Rao");
            assert_eq!(contents[3], "asha@example.com");
            assert_eq!(
                contents.iter().filter(|c| **c == "asha@example.com").count(),
                1
            );
            assert_eq!(request.messages[3].role, MessageRole::User);
            assert_eq!(request.temperature, Some(0.7));
            assert_eq!(request.max_tokens, Some(4096));
            assert_eq!(request.session_id, Some(session.id()));

            let prompt = request.system_prompt.unwrap();
            assert!(prompt.contains("Interview Phase: information_gathering"));
        }

        #[tokio::test]
        async fn failure_degrades_to_apology_and_keeps_log_paired() {
            let provider = MockAIProvider::new().with_error(AIError::network("connection refused"));
            let mut session = session(&provider);

            let outcome = session.process_message("My name is Asha Rao").await;

            assert!(outcome.is_degraded());
            assert!(outcome.reply().starts_with("I apologize"));
            assert!(outcome.reply().contains("connection refused"));
            let last = session.state().log().last().unwrap();
            assert_eq!(last.role(), TurnRole::Assistant);
            assert_eq!(last.text(), outcome.reply());
            // extraction and tracking still ran
            assert_eq!(session.state().fields().name(), Some("Asha Rao"));
            assert_eq!(session.state().phase_index(), 1);
        }

        #[tokio::test]
        async fn blank_reply_counts_as_failure() {
            let provider = MockAIProvider::new().with_response("   ");
            let mut session = session(&provider);

            let outcome = session.process_message("hello").await;

            assert!(outcome.is_degraded());
        }

        #[tokio::test]
        async fn empty_input_changes_nothing() {
            let provider = MockAIProvider::new();
            let mut session = session(&provider);

            let outcome = session.process_message("   \n\t").await;

            assert_eq!(outcome, TurnOutcome::EmptyInput);
            assert_eq!(outcome.reply(), EMPTY_INPUT_REPLY);
            assert_eq!(session.state().log().len(), 1);
            assert_eq!(session.state().phase_index(), 0);
            assert_eq!(provider.call_count(), 0);
        }

        #[tokio::test]
        async fn deadline_expiry_degrades() {
            let provider = MockAIProvider::new()
                .with_response("too late")
                .with_delay(Duration::from_millis(200));
            let mut session = session(&provider);

            let outcome = session
                .process_message_with_deadline("hello", Duration::from_millis(20))
                .await;

            assert!(matches!(outcome, TurnOutcome::Degraded { ref reason, .. } if reason.contains("timed out")));
            assert_eq!(session.state().log().len(), 3);
        }

        #[tokio::test]
        async fn sub_second_deadline_reports_a_whole_second() {
            let provider = MockAIProvider::new()
                .with_response("too late")
                .with_delay(Duration::from_millis(200));
            let mut session = session(&provider);

            let outcome = session
                .process_message_with_deadline("hello", Duration::from_millis(20))
                .await;

            assert!(matches!(outcome, TurnOutcome::Degraded { ref reason, .. } if reason.contains("1s")));
            assert_eq!(whole_seconds(Duration::from_millis(1500)), 2);
            assert_eq!(whole_seconds(Duration::from_secs(u64::MAX)), u32::MAX);
        }

        #[tokio::test]
        async fn dropped_call_still_logs_an_assistant_turn() {
            let provider = MockAIProvider::new()
                .with_response("too late")
                .with_delay(Duration::from_millis(200))
                .with_response("Thanks, Asha.");
            let mut session = session(&provider);

            let cancelled = tokio::time::timeout(
                Duration::from_millis(20),
                session.process_message("My name is Asha Rao"),
            )
            .await;
            assert!(cancelled.is_err());

            let roles: Vec<TurnRole> = session.state().log().turns().iter().map(|t| t.role()).collect();
            assert_eq!(roles, vec![TurnRole::Assistant, TurnRole::User, TurnRole::Assistant]);
            assert!(session.state().log().last().unwrap().text().contains("request cancelled"));
            assert_eq!(session.state().phase_index(), 1);

            session.process_message("asha@example.com").await;
            let roles: Vec<TurnRole> = session.state().log().turns().iter().map(|t| t.role()).collect();
            assert_eq!(
                roles,
                vec![
                    TurnRole::Assistant,
                    TurnRole::User,
                    TurnRole::Assistant,
                    TurnRole::User,
                    TurnRole::Assistant
                ]
            );
        }

        #[tokio::test]
        async fn deadline_not_reached_replies_normally() {
            let provider = MockAIProvider::new().with_response("quick");
            let mut session = session(&provider);

            let outcome = session
                .process_message_with_deadline("hello", Duration::from_secs(5))
                .await;

            assert_eq!(outcome.reply(), "quick");
        }
    }

    mod progression {
        use super::*;

        #[tokio::test]
        async fn questions_in_technical_phase_advance_to_experience_discussion() {
            let mut provider = MockAIProvider::new();
            for reply in ["Thanks!"; 5] {
                provider = provider.with_response(reply);
            }
            for n in 1..=5 {
                provider = provider.with_response(format!("Technical question {}?", n));
            }
            let mut session = session(&provider);

            for utterance in [
                "My name is Asha Rao",
                "asha.rao@example.com",
                "9876543210",
                "I have 4 years of experience",
                "I'm a backend developer from Pune, tech stack React and Python",
            ] {
                session.process_message(utterance).await;
            }
            assert!(session.state().fields().is_complete());
            assert_eq!(session.state().phase(), InterviewPhase::TechnicalAssessment);

            for answer in ["a queue", "retries", "caching", "indexes", "tests"] {
                session.process_message(answer).await;
            }

            assert_eq!(session.state().technical_questions_asked(), 5);
            assert_eq!(session.state().phase(), InterviewPhase::ExperienceDiscussion);
        }
    }
}
