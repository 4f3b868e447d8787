mod chat;
mod flashcards;
mod quiz;
mod sidebar;
mod state;
mod upload;

pub use chat::ChatView;
pub use flashcards::FlashcardsView;
pub use quiz::QuizView;
pub use sidebar::SidebarView;
pub use state::{StateRevision, ViewError};
pub use upload::UploadView;
