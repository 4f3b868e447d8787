use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// Source attribution attached to an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub page: u32,
    pub excerpt: String,
}

/// One entry in a chat thread. Threads are append-only; a message is never
/// edited or removed individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    citations: Vec<Citation>,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// A message typed by the user. User messages never carry citations.
    #[must_use]
    pub fn user(content: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            citations: Vec::new(),
            sent_at,
        }
    }

    /// An assistant message without source attributions.
    #[must_use]
    pub fn assistant(content: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self::assistant_with_citations(content, Vec::new(), sent_at)
    }

    /// An assistant message carrying the citations the answer was grounded in.
    #[must_use]
    pub fn assistant_with_citations(
        content: impl Into<String>,
        citations: Vec<Citation>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            citations,
            sent_at,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    #[must_use]
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
