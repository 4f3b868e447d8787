use serde::{Deserialize, Serialize};

/// A generated quiz question. Immutable for the lifetime of one quiz run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    text: String,
    difficulty_label: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(text: impl Into<String>, difficulty_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            difficulty_label: difficulty_label.into(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn difficulty_label(&self) -> &str {
        &self.difficulty_label
    }
}

/// Grading outcome for one submitted answer. Only the most recent round's
/// feedback is retained by the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    is_correct: bool,
    score: u8,
    correct_answer: String,
    feedback: String,
}

impl AnswerFeedback {
    /// Scores above 100 are clamped at the boundary so the 0-100 display
    /// convention holds no matter what the service returns.
    #[must_use]
    pub fn new(
        is_correct: bool,
        score: u32,
        correct_answer: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            is_correct,
            score: u8::try_from(score.min(100)).unwrap_or(100),
            correct_answer: correct_answer.into(),
            feedback: feedback.into(),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// Per-round score in `0..=100`.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped_to_100() {
        let feedback = AnswerFeedback::new(true, 250, "42", "Close enough.");
        assert_eq!(feedback.score(), 100);

        let feedback = AnswerFeedback::new(false, 0, "42", "Not quite.");
        assert_eq!(feedback.score(), 0);
    }
}
