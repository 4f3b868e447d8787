//! Scripted in-memory gateway for integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

use prep_core::{AnswerFeedback, Citation, Difficulty, Flashcard, QuizQuestion};
use services::{AssistantGateway, GatewayError, QueryAnswer, QueryRequest, UploadFile};

#[derive(Default)]
struct FakeState {
    documents: Vec<String>,
    health_error: bool,
    list_errors: VecDeque<GatewayError>,
    upload_errors: VecDeque<GatewayError>,
    delete_errors: VecDeque<GatewayError>,
    query_responses: VecDeque<Result<QueryAnswer, GatewayError>>,
    quiz_errors: VecDeque<GatewayError>,
    check_responses: VecDeque<Result<AnswerFeedback, GatewayError>>,
    flashcard_errors: VecDeque<GatewayError>,
    last_query: Option<String>,
    last_quiz_topic: Option<Option<String>>,
    last_quiz_difficulty: Option<Difficulty>,
    list_calls: usize,
}

/// Test double for the remote assistant service. Responses are scripted per
/// operation; `pause()` holds the mutating operations until `release()` so
/// tests can interleave resets with in-flight requests.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
    paused: Arc<AtomicBool>,
    release: Arc<Notify>,
}

#[allow(dead_code)]
impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn error() -> GatewayError {
        GatewayError::Status(StatusCode::SERVICE_UNAVAILABLE)
    }

    pub fn rejected(detail: &str) -> GatewayError {
        GatewayError::Rejected {
            detail: detail.to_string(),
        }
    }

    pub fn seed_documents(&self, names: &[&str]) {
        self.state().documents = names.iter().map(ToString::to_string).collect();
    }

    pub fn fail_health(&self) {
        self.state().health_error = true;
    }

    pub fn fail_next_list(&self) {
        self.state().list_errors.push_back(Self::error());
    }

    pub fn fail_next_upload(&self, error: GatewayError) {
        self.state().upload_errors.push_back(error);
    }

    pub fn fail_next_delete(&self) {
        self.state().delete_errors.push_back(Self::error());
    }

    pub fn script_query(&self, response: Result<QueryAnswer, GatewayError>) {
        self.state().query_responses.push_back(response);
    }

    pub fn fail_next_quiz(&self) {
        self.state().quiz_errors.push_back(Self::error());
    }

    pub fn script_check(&self, response: Result<AnswerFeedback, GatewayError>) {
        self.state().check_responses.push_back(response);
    }

    pub fn fail_next_flashcards(&self) {
        self.state().flashcard_errors.push_back(Self::error());
    }

    pub fn last_query(&self) -> Option<String> {
        self.state().last_query.clone()
    }

    pub fn last_quiz_topic(&self) -> Option<Option<String>> {
        self.state().last_quiz_topic.clone()
    }

    pub fn last_quiz_difficulty(&self) -> Option<Difficulty> {
        self.state().last_quiz_difficulty
    }

    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    /// Hold upload/query/quiz/check/flashcard calls until `release()`.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Let one held call proceed.
    pub fn release(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    async fn barrier(&self) {
        if self.paused.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
    }

    pub fn citation(source: &str, page: u32, excerpt: &str) -> Citation {
        Citation {
            source: source.to_string(),
            page,
            excerpt: excerpt.to_string(),
        }
    }
}

/// Poll until `condition` holds, failing the test after two seconds.
#[allow(dead_code)]
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..2000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition not reached within two seconds");
}

#[async_trait]
impl AssistantGateway for FakeGateway {
    async fn check_health(&self) -> Result<(), GatewayError> {
        if self.state().health_error {
            return Err(Self::error());
        }
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<String>, GatewayError> {
        let mut state = self.state();
        state.list_calls += 1;
        if let Some(error) = state.list_errors.pop_front() {
            return Err(error);
        }
        Ok(state.documents.clone())
    }

    async fn upload(&self, files: Vec<UploadFile>) -> Result<(), GatewayError> {
        self.barrier().await;
        let mut state = self.state();
        if let Some(error) = state.upload_errors.pop_front() {
            return Err(error);
        }
        state.documents.extend(files.into_iter().map(|file| file.name));
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<(), GatewayError> {
        let mut state = self.state();
        if let Some(error) = state.delete_errors.pop_front() {
            return Err(error);
        }
        state.documents.clear();
        Ok(())
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryAnswer, GatewayError> {
        self.barrier().await;
        let mut state = self.state();
        state.last_query = Some(request.question().to_string());
        state.query_responses.pop_front().unwrap_or_else(|| {
            Ok(QueryAnswer {
                answer: format!("Answer to: {}", request.question()),
                citations: Vec::new(),
            })
        })
    }

    async fn generate_quiz(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        self.barrier().await;
        let mut state = self.state();
        state.last_quiz_topic = Some(topic.map(str::to_string));
        state.last_quiz_difficulty = Some(difficulty);
        if let Some(error) = state.quiz_errors.pop_front() {
            return Err(error);
        }
        Ok((1..=count)
            .map(|i| QuizQuestion::new(format!("Q{i}"), difficulty.label()))
            .collect())
    }

    async fn check_answer(
        &self,
        _question: &str,
        user_answer: &str,
        _topic: Option<&str>,
    ) -> Result<AnswerFeedback, GatewayError> {
        self.barrier().await;
        let scripted = self.state().check_responses.pop_front();
        scripted.unwrap_or_else(|| {
            Ok(AnswerFeedback::new(
                true,
                100,
                user_answer.to_string(),
                "Exactly right.",
            ))
        })
    }

    async fn generate_flashcards(
        &self,
        _topic: Option<&str>,
        count: u32,
    ) -> Result<Vec<Flashcard>, GatewayError> {
        self.barrier().await;
        if let Some(error) = self.state().flashcard_errors.pop_front() {
            return Err(error);
        }
        Ok((1..=count)
            .map(|i| Flashcard::new(format!("Front {i}"), format!("Back {i}")))
            .collect())
    }
}
