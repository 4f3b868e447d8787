use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::{Clock, Message, StudyMode, welcome_message};

use crate::error::ChatError;
use crate::gateway::{AssistantGateway, QueryRequest};
use crate::inflight::InflightGate;

/// Fixed assistant-side notice appended when a query fails. Carries no
/// citations.
pub const ANSWER_FAILURE_NOTICE: &str = "❌ Sorry, I ran into an error answering that. Please \
    check that the assistant service is running and try again.";

#[derive(Debug, Default)]
struct ChatState {
    messages: Vec<Message>,
}

/// Append-only chat thread for the free-form study modes.
///
/// Clones share the thread. Messages are only ever appended in event order;
/// the whole thread is replaced on mode re-entry via [`ChatService::reset`].
#[derive(Clone)]
pub struct ChatService {
    gateway: Arc<dyn AssistantGateway>,
    clock: Clock,
    state: Arc<Mutex<ChatState>>,
    gate: InflightGate,
}

impl ChatService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>, clock: Clock) -> Self {
        Self {
            gateway,
            clock,
            state: Arc::new(Mutex::new(ChatState::default())),
            gate: InflightGate::new(),
        }
    }

    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.state().messages.clone()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_busy()
    }

    /// True while the thread holds nothing beyond the greeting. Views use
    /// this to decide whether to keep showing quick prompts.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.state().messages.len() <= 1
    }

    /// Seed the mode greeting. Does nothing when the thread already has
    /// messages, so re-rendering a chat view never duplicates it.
    pub fn initialize(&self, mode: StudyMode, company: Option<&str>) {
        let greeting = welcome_message(mode, company);
        let mut state = self.state();
        if state.messages.is_empty() {
            state
                .messages
                .push(Message::assistant(greeting, self.clock.now()));
        }
    }

    /// Send a question to the assistant and append the exchange.
    ///
    /// The user message is appended before the gateway call resolves; the
    /// assistant's answer (or the fixed failure notice) follows it. A
    /// response that resolves after [`ChatService::reset`] belongs to a
    /// discarded thread and is dropped without touching the fresh one.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyQuestion` for blank input and
    /// `ChatError::Busy` while a previous question is still pending. Both
    /// are rejected before anything is appended.
    pub async fn send(
        &self,
        question: &str,
        mode: StudyMode,
        company: Option<&str>,
        topic: Option<&str>,
    ) -> Result<(), ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        let Some(permit) = self.gate.try_begin() else {
            return Err(ChatError::Busy);
        };

        self.state()
            .messages
            .push(Message::user(question, self.clock.now()));

        let request = QueryRequest::new(
            question,
            mode,
            company.map(str::to_string),
            topic.map(str::to_string),
        );
        let outcome = self.gateway.query(request).await;

        if !permit.is_current() {
            return Ok(());
        }

        let reply = match outcome {
            Ok(answer) => Message::assistant_with_citations(
                answer.answer,
                answer.citations,
                self.clock.now(),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "assistant query failed");
                Message::assistant(ANSWER_FAILURE_NOTICE, self.clock.now())
            }
        };
        self.state().messages.push(reply);
        Ok(())
    }

    /// Discard the thread and mark any in-flight query stale.
    pub fn reset(&self) {
        self.gate.invalidate();
        self.state().messages.clear();
    }
}
