#![forbid(unsafe_code)]

pub mod chat;
pub mod corpus;
pub mod error;
pub mod flashcards;
pub mod gateway;
pub mod inflight;
pub mod quiz;
pub mod session;

pub use prep_core::Clock;

pub use chat::{ANSWER_FAILURE_NOTICE, ChatService};
pub use corpus::{CorpusService, ServerStatus};
pub use error::{ChatError, CorpusError, FlashcardError, GatewayError, QuizError};
pub use flashcards::{FlashcardPhase, FlashcardProgress, FlashcardService};
pub use gateway::{
    AssistantGateway, GatewayConfig, GatewayConfigError, HttpAssistantGateway, QueryAnswer,
    QueryRequest, UploadFile,
};
pub use inflight::{InflightGate, InflightPermit};
pub use quiz::{QuizPhase, QuizProgress, QuizService};
pub use session::{ActiveView, SessionController};
