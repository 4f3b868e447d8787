mod flashcard;
mod message;
mod mode;
mod quiz;

pub use flashcard::Flashcard;
pub use message::{Citation, Message, Role};
pub use mode::{Difficulty, ParseDifficultyError, ParseModeError, StudyMode, welcome_message};
pub use quiz::{AnswerFeedback, QuizQuestion};
