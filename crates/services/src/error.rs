//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the Remote Assistant Gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The service could not be reached, timed out, or closed the connection.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status and no usable detail.
    #[error("assistant service returned status {0}")]
    Status(reqwest::StatusCode),
    /// The service rejected the request with an application-level detail message.
    #[error("{detail}")]
    Rejected { detail: String },
    /// The response body did not match the expected shape.
    #[error("assistant service returned an unexpected response shape")]
    Decode,
}

impl GatewayError {
    /// True when the failure was connectivity rather than an application error.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

/// Errors emitted by `CorpusService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CorpusError {
    #[error("no files selected")]
    NoFiles,
    #[error("upload already in progress")]
    UploadInProgress,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Validation rejections emitted by `ChatService`.
///
/// Gateway failures never surface here; the chat thread absorbs them as a
/// fixed assistant-side error notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("a question is already pending")]
    Busy,
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    InvalidCount,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("a request is already pending for this quiz")]
    Busy,
    #[error("this question was already answered")]
    AlreadyAnswered,
    #[error("no question is active")]
    NoActiveQuestion,
    #[error("the current question has not been answered yet")]
    NotAnswered,
    #[error("assistant returned no questions")]
    EmptyQuiz,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by `FlashcardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("a card set needs at least one card")]
    InvalidCount,
    #[error("a request is already pending for this card set")]
    Busy,
    #[error("assistant returned no flashcards")]
    EmptyDeck,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
