use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::{Clock, Difficulty, StudyMode};

use crate::chat::ChatService;
use crate::corpus::CorpusService;
use crate::error::{ChatError, FlashcardError, QuizError};
use crate::flashcards::FlashcardService;
use crate::gateway::AssistantGateway;
use crate::quiz::QuizService;

/// Which pane the main area shows, derived from corpus and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    /// The corpus is empty; nothing can start until documents are uploaded.
    UploadPrompt,
    Chat,
    Quiz,
    Flashcards,
}

#[derive(Debug, Default)]
struct SessionState {
    mode: StudyMode,
    company: Option<String>,
    topic: Option<String>,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Root aggregate of the client: the active mode, the company/topic scope
/// filters, and the sub-engines. The controller is the only component that
/// resets another engine's state, and it does so in the same synchronous
/// step as the mode change.
#[derive(Clone)]
pub struct SessionController {
    corpus: CorpusService,
    chat: ChatService,
    quiz: QuizService,
    flashcards: FlashcardService,
    state: Arc<Mutex<SessionState>>,
}

impl SessionController {
    /// Composition root: builds every service on top of one gateway handle.
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>, clock: Clock) -> Self {
        let controller = Self {
            corpus: CorpusService::new(Arc::clone(&gateway)),
            chat: ChatService::new(Arc::clone(&gateway), clock),
            quiz: QuizService::new(Arc::clone(&gateway)),
            flashcards: FlashcardService::new(gateway),
            state: Arc::new(Mutex::new(SessionState::default())),
        };
        controller.ensure_chat_greeting();
        controller
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn corpus(&self) -> &CorpusService {
        &self.corpus
    }

    #[must_use]
    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizService {
        &self.quiz
    }

    #[must_use]
    pub fn flashcards(&self) -> &FlashcardService {
        &self.flashcards
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.state().mode
    }

    #[must_use]
    pub fn company(&self) -> Option<String> {
        self.state().company.clone()
    }

    #[must_use]
    pub fn topic(&self) -> Option<String> {
        self.state().topic.clone()
    }

    /// Switch the active activity.
    ///
    /// Quiz and flashcard progress never survives a switch; the chat thread
    /// is dropped when leaving the chat-backed modes and re-seeded with the
    /// new mode's greeting on re-entry. Corpus state and the scope filters
    /// are untouched.
    pub fn set_mode(&self, mode: StudyMode) {
        let (previous, company) = {
            let mut state = self.state();
            let previous = state.mode;
            if previous == mode {
                return;
            }
            state.mode = mode;
            (previous, state.company.clone())
        };

        self.quiz.restart();
        self.flashcards.restart();
        if previous.is_chat() && !mode.is_chat() {
            self.chat.reset();
        }
        if mode.is_chat() {
            self.chat.initialize(mode, company.as_deref());
        }
    }

    /// Scope subsequent queries to a company. Blank selections clear the
    /// filter; already-fetched content is unaffected.
    pub fn set_company(&self, company: Option<String>) {
        self.state().company = normalize(company);
    }

    /// Scope subsequent generate/query calls to a topic. Blank selections
    /// clear the filter; already-fetched content is unaffected.
    pub fn set_topic(&self, topic: Option<String>) {
        self.state().topic = normalize(topic);
    }

    /// Seed the greeting for the current mode if the thread is empty.
    pub fn ensure_chat_greeting(&self) {
        let (mode, company) = {
            let state = self.state();
            (state.mode, state.company.clone())
        };
        if mode.is_chat() {
            self.chat.initialize(mode, company.as_deref());
        }
    }

    /// The pane to show: the upload prompt whenever the corpus is empty,
    /// otherwise whatever the active mode selects.
    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        if self.corpus.is_empty() {
            return ActiveView::UploadPrompt;
        }
        match self.mode() {
            StudyMode::Quiz => ActiveView::Quiz,
            StudyMode::Flashcards => ActiveView::Flashcards,
            StudyMode::General
            | StudyMode::MockInterview
            | StudyMode::ResumeReview
            | StudyMode::CompanySpecific => ActiveView::Chat,
        }
    }

    /// Send a chat question scoped by the current mode and filters.
    ///
    /// # Errors
    ///
    /// Propagates the chat engine's validation rejections.
    pub async fn send_chat(&self, question: &str) -> Result<(), ChatError> {
        let (mode, company, topic) = {
            let state = self.state();
            (state.mode, state.company.clone(), state.topic.clone())
        };
        self.chat
            .send(question, mode, company.as_deref(), topic.as_deref())
            .await
    }

    /// Start a quiz scoped by the current topic filter.
    ///
    /// # Errors
    ///
    /// Propagates the quiz engine's rejections and gateway failures.
    pub async fn generate_quiz(&self, difficulty: Difficulty, count: u32) -> Result<(), QuizError> {
        let topic = self.topic();
        self.quiz.generate(topic.as_deref(), difficulty, count).await
    }

    /// Generate flashcards scoped by the current topic filter.
    ///
    /// # Errors
    ///
    /// Propagates the flashcard engine's rejections and gateway failures.
    pub async fn generate_flashcards(&self, count: u32) -> Result<(), FlashcardError> {
        let topic = self.topic();
        self.flashcards.generate(topic.as_deref(), count).await
    }
}
