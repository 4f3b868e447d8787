use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use prep_core::{AnswerFeedback, Citation, Difficulty, Flashcard, QuizQuestion, StudyMode};

use crate::error::GatewayError;

/// Default address of the assistant service when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the assistant service address.
pub const BASE_URL_ENV: &str = "PREP_SERVER_URL";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayConfigError {
    #[error("invalid assistant service url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
}

impl GatewayConfig {
    /// # Errors
    ///
    /// Returns `GatewayConfigError::InvalidBaseUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, GatewayConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Reads `PREP_SERVER_URL`, falling back to the localhost default.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError::InvalidBaseUrl` if the configured value
    /// does not parse.
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        let raw = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&raw)
    }
}

/// A file handed to `upload`, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A document-grounded answer with its source attributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
}

/// A free-form question scoped by the active mode and filters.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    question: String,
    mode: &'static str,
    company: Option<String>,
    topic: Option<String>,
}

impl QueryRequest {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        mode: StudyMode,
        company: Option<String>,
        topic: Option<String>,
    ) -> Self {
        Self {
            question: question.into(),
            mode: mode.wire_name(),
            company,
            topic,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Serialize)]
struct QuizGenerateRequest<'a> {
    topic: Option<&'a str>,
    difficulty: &'static str,
    num_questions: u32,
}

#[derive(Debug, Serialize)]
struct AnswerCheckRequest<'a> {
    question: &'a str,
    user_answer: &'a str,
    topic: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct FlashcardGenerateRequest<'a> {
    topic: Option<&'a str>,
    num_cards: u32,
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    documents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    source: String,
    page: u32,
    content: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: String,
    #[serde(default)]
    sources: Vec<WireSource>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    question: String,
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuizGenerateResponse {
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
struct AnswerCheckResponse {
    is_correct: bool,
    score: u32,
    correct_answer: String,
    feedback: String,
}

#[derive(Debug, Deserialize)]
struct WireFlashcard {
    front: String,
    back: String,
}

#[derive(Debug, Deserialize)]
struct FlashcardGenerateResponse {
    flashcards: Vec<WireFlashcard>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Boundary to the remote assistant service. One request/response exchange
/// per operation; nothing streams.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Probe service reachability.
    async fn check_health(&self) -> Result<(), GatewayError>;

    /// Names of the documents currently in the corpus.
    async fn list_documents(&self) -> Result<Vec<String>, GatewayError>;

    /// Upload documents into the corpus.
    async fn upload(&self, files: Vec<UploadFile>) -> Result<(), GatewayError>;

    /// Remove every document from the corpus.
    async fn delete_all_documents(&self) -> Result<(), GatewayError>;

    /// Ask a document-grounded question.
    async fn query(&self, request: QueryRequest) -> Result<QueryAnswer, GatewayError>;

    /// Generate quiz questions scoped by topic and difficulty.
    async fn generate_quiz(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuizQuestion>, GatewayError>;

    /// Grade a free-text answer against the corpus.
    async fn check_answer(
        &self,
        question: &str,
        user_answer: &str,
        topic: Option<&str>,
    ) -> Result<AnswerFeedback, GatewayError>;

    /// Generate two-sided revision cards scoped by topic.
    async fn generate_flashcards(
        &self,
        topic: Option<&str>,
        count: u32,
    ) -> Result<Vec<Flashcard>, GatewayError>;
}

/// HTTP implementation of [`AssistantGateway`] over a fixed base address.
#[derive(Clone)]
pub struct HttpAssistantGateway {
    client: Client,
    base_url: Url,
}

impl HttpAssistantGateway {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Maps non-success statuses to `Rejected` when the body carries a
    /// `{detail}` payload, `Status` otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        if let Ok(error) = serde_json::from_slice::<ErrorDetail>(&body) {
            return Err(GatewayError::Rejected {
                detail: error.detail,
            });
        }
        Err(GatewayError::Status(status))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                GatewayError::Decode
            } else {
                GatewayError::Transport(err)
            }
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, GatewayError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::ensure_success(response).await
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::ensure_success(response).await
    }
}

#[async_trait]
impl AssistantGateway for HttpAssistantGateway {
    async fn check_health(&self) -> Result<(), GatewayError> {
        self.get("health").await?;
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<String>, GatewayError> {
        let response = self.get("documents").await?;
        let body: DocumentsResponse = Self::decode(response).await?;
        Ok(body.documents)
    }

    async fn upload(&self, files: Vec<UploadFile>) -> Result<(), GatewayError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.endpoint("documents"))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryAnswer, GatewayError> {
        let response = self.post_json("query", &request).await?;
        let body: QueryResponse = Self::decode(response).await?;
        Ok(QueryAnswer {
            answer: body.answer,
            citations: body
                .sources
                .into_iter()
                .map(|source| Citation {
                    source: source.source,
                    page: source.page,
                    excerpt: source.content,
                })
                .collect(),
        })
    }

    async fn generate_quiz(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<QuizQuestion>, GatewayError> {
        let request = QuizGenerateRequest {
            topic,
            difficulty: difficulty.wire_name(),
            num_questions: count,
        };
        let response = self.post_json("quiz/generate", &request).await?;
        let body: QuizGenerateResponse = Self::decode(response).await?;
        Ok(body
            .questions
            .into_iter()
            .map(|question| {
                let label = question
                    .difficulty
                    .unwrap_or_else(|| Difficulty::Medium.label().to_string());
                QuizQuestion::new(question.question, label)
            })
            .collect())
    }

    async fn check_answer(
        &self,
        question: &str,
        user_answer: &str,
        topic: Option<&str>,
    ) -> Result<AnswerFeedback, GatewayError> {
        let request = AnswerCheckRequest {
            question,
            user_answer,
            topic,
        };
        let response = self.post_json("quiz/check", &request).await?;
        let body: AnswerCheckResponse = Self::decode(response).await?;
        Ok(AnswerFeedback::new(
            body.is_correct,
            body.score,
            body.correct_answer,
            body.feedback,
        ))
    }

    async fn generate_flashcards(
        &self,
        topic: Option<&str>,
        count: u32,
    ) -> Result<Vec<Flashcard>, GatewayError> {
        let request = FlashcardGenerateRequest {
            topic,
            num_cards: count,
        };
        let response = self.post_json("flashcards/generate", &request).await?;
        let body: FlashcardGenerateResponse = Self::decode(response).await?;
        Ok(body
            .flashcards
            .into_iter()
            .map(|card| Flashcard::new(card.front, card.back))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = GatewayConfig::new("http://localhost:8000/").unwrap();
        let gateway = HttpAssistantGateway::new(config);
        assert_eq!(gateway.endpoint("health"), "http://localhost:8000/health");
        assert_eq!(
            gateway.endpoint("/quiz/generate"),
            "http://localhost:8000/quiz/generate"
        );
    }

    #[test]
    fn query_request_serializes_wire_fields() {
        let request = QueryRequest::new(
            "What is quicksort?",
            StudyMode::CompanySpecific,
            Some("Amazon".into()),
            None,
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["question"], "What is quicksort?");
        assert_eq!(value["mode"], "company_specific");
        assert_eq!(value["company"], "Amazon");
        assert!(value["topic"].is_null());
    }

    #[test]
    fn quiz_request_serializes_wire_fields() {
        let request = QuizGenerateRequest {
            topic: Some("DSA"),
            difficulty: Difficulty::Hard.wire_name(),
            num_questions: 5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["topic"], "DSA");
        assert_eq!(value["difficulty"], "hard");
        assert_eq!(value["num_questions"], 5);
    }

    #[test]
    fn config_rejects_invalid_urls() {
        assert!(GatewayConfig::new("not a url").is_err());
        assert!(GatewayConfig::new(DEFAULT_BASE_URL).is_ok());
    }
}
