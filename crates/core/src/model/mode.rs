use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown study mode: {0}")]
pub struct ParseModeError(pub String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);

/// Which learning activity is live. Determines the active pane and which
/// sub-engine receives user actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyMode {
    #[default]
    General,
    Quiz,
    Flashcards,
    MockInterview,
    ResumeReview,
    CompanySpecific,
}

impl StudyMode {
    pub const ALL: [StudyMode; 6] = [
        StudyMode::General,
        StudyMode::Quiz,
        StudyMode::Flashcards,
        StudyMode::MockInterview,
        StudyMode::ResumeReview,
        StudyMode::CompanySpecific,
    ];

    /// Identifier used on the wire when querying the assistant.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            StudyMode::General => "general",
            StudyMode::Quiz => "quiz",
            StudyMode::Flashcards => "flashcard",
            StudyMode::MockInterview => "mock_interview",
            StudyMode::ResumeReview => "resume_review",
            StudyMode::CompanySpecific => "company_specific",
        }
    }

    /// Human-readable label for mode pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StudyMode::General => "General Chat",
            StudyMode::Quiz => "Take Quiz",
            StudyMode::Flashcards => "Flashcards",
            StudyMode::MockInterview => "Mock Interview",
            StudyMode::ResumeReview => "Resume Review",
            StudyMode::CompanySpecific => "Company Prep",
        }
    }

    /// True for modes backed by the chat thread rather than a dedicated engine.
    #[must_use]
    pub fn is_chat(self) -> bool {
        !matches!(self, StudyMode::Quiz | StudyMode::Flashcards)
    }
}

impl FromStr for StudyMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.wire_name() == s)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested difficulty for generated quiz questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.wire_name() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed greeting shown when a chat thread opens in the given mode.
///
/// One template per chat-backed mode; everything else falls back to the
/// general greeting.
#[must_use]
pub fn welcome_message(mode: StudyMode, company: Option<&str>) -> String {
    match mode {
        StudyMode::MockInterview => "🎤 **Mock Interview Mode**\n\nI'll ask you interview \
            questions based on your uploaded materials. Try:\n- 'Ask me DSA questions'\n- 'Give \
            me system design questions'\n- 'Ask behavioral questions'"
            .to_string(),
        StudyMode::ResumeReview => "📄 **Resume Review Mode**\n\nUpload your resume and I'll \
            provide detailed feedback:\n- 'Review my resume'\n- 'Suggest improvements for my \
            skills section'\n- 'How can I make my resume ATS-friendly?'"
            .to_string(),
        StudyMode::CompanySpecific => {
            let scope = company
                .filter(|name| !name.trim().is_empty())
                .map(|name| format!(" - {name}"))
                .unwrap_or_default();
            format!(
                "🏢 **Company-Specific Mode**{scope}\n\nI'll help you prepare for specific \
                 companies:\n- 'What does Amazon ask in interviews?'\n- 'TCS interview \
                 pattern'\n- 'Common questions asked at Google'"
            )
        }
        StudyMode::General => "👋 **Welcome to your study assistant!**\n\nI'm here to help you \
            prepare for placements using your uploaded study materials.\n\n**Try asking:**\n- \
            'Explain quicksort algorithm'\n- 'What are DBMS normalization forms?'\n- 'Give me OS \
            process scheduling questions'\n- 'Common interview questions for Amazon'"
            .to_string(),
        StudyMode::Quiz | StudyMode::Flashcards => "👋 **Welcome!**\n\nAsk me anything about \
            your uploaded study materials."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for mode in StudyMode::ALL {
            assert_eq!(mode.wire_name().parse::<StudyMode>().unwrap(), mode);
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(
                difficulty.wire_name().parse::<Difficulty>().unwrap(),
                difficulty
            );
        }
    }

    #[test]
    fn unknown_wire_names_are_rejected() {
        assert!("cramming".parse::<StudyMode>().is_err());
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn chat_backed_modes() {
        assert!(StudyMode::General.is_chat());
        assert!(StudyMode::MockInterview.is_chat());
        assert!(StudyMode::ResumeReview.is_chat());
        assert!(StudyMode::CompanySpecific.is_chat());
        assert!(!StudyMode::Quiz.is_chat());
        assert!(!StudyMode::Flashcards.is_chat());
    }

    #[test]
    fn company_greeting_embeds_company_name() {
        let message = welcome_message(StudyMode::CompanySpecific, Some("Amazon"));
        assert!(message.contains("- Amazon"));

        let unscoped = welcome_message(StudyMode::CompanySpecific, None);
        assert!(!unscoped.contains(" - "));

        let blank = welcome_message(StudyMode::CompanySpecific, Some("  "));
        assert_eq!(blank, unscoped);
    }

    #[test]
    fn each_chat_mode_has_its_own_greeting() {
        let chat_modes = [
            StudyMode::General,
            StudyMode::MockInterview,
            StudyMode::ResumeReview,
            StudyMode::CompanySpecific,
        ];
        for (i, a) in chat_modes.iter().enumerate() {
            for b in &chat_modes[i + 1..] {
                assert_ne!(welcome_message(*a, None), welcome_message(*b, None));
            }
        }
    }
}
