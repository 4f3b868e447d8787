use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::{AnswerFeedback, Difficulty, QuizQuestion};

use crate::error::QuizError;
use crate::gateway::AssistantGateway;
use crate::inflight::InflightGate;

/// Where a quiz run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No run installed; the setup screen is showing.
    NotStarted,
    /// The current question is waiting for an answer.
    Unanswered,
    /// The current question was graded; feedback is showing.
    Answered,
    /// Every question has been graded.
    Complete,
}

#[derive(Debug, Clone)]
struct QuizRun {
    topic: Option<String>,
    questions: Vec<QuizQuestion>,
    current: usize,
    answered: usize,
    score_total: u32,
    last_feedback: Option<AnswerFeedback>,
}

impl QuizRun {
    fn new(topic: Option<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            topic,
            questions,
            current: 0,
            answered: 0,
            score_total: 0,
            last_feedback: None,
        }
    }

    /// Completion is the answered count reaching the question count; the
    /// index agrees with it by construction and tests assert the equivalence.
    fn phase(&self) -> QuizPhase {
        if self.answered == self.questions.len() {
            QuizPhase::Complete
        } else if self.last_feedback.is_some() {
            QuizPhase::Answered
        } else {
            QuizPhase::Unanswered
        }
    }
}

/// Rendering snapshot of a quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub phase: QuizPhase,
    /// 0-based index of the question being shown.
    pub current: usize,
    pub total: usize,
    pub answered: usize,
    /// Rounded average of the per-round 0-100 scores, 0 before any grading.
    pub average_score: u32,
    pub last_feedback: Option<AnswerFeedback>,
    pub current_question: Option<QuizQuestion>,
}

impl QuizProgress {
    fn not_started() -> Self {
        Self {
            phase: QuizPhase::NotStarted,
            current: 0,
            total: 0,
            answered: 0,
            average_score: 0,
            last_feedback: None,
            current_question: None,
        }
    }
}

/// State machine for a bounded sequence of question/answer/grade rounds.
///
/// Clones share the run. One gateway request may be in flight at a time;
/// a restart marks any outstanding request stale so its response cannot
/// touch the replacement run.
#[derive(Clone)]
pub struct QuizService {
    gateway: Arc<dyn AssistantGateway>,
    run: Arc<Mutex<Option<QuizRun>>>,
    gate: InflightGate,
}

impl QuizService {
    #[must_use]
    pub fn new(gateway: Arc<dyn AssistantGateway>) -> Self {
        Self {
            gateway,
            run: Arc::new(Mutex::new(None)),
            gate: InflightGate::new(),
        }
    }

    fn run(&self) -> MutexGuard<'_, Option<QuizRun>> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.run()
            .as_ref()
            .map_or(QuizPhase::NotStarted, QuizRun::phase)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_busy()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let guard = self.run();
        let Some(run) = guard.as_ref() else {
            return QuizProgress::not_started();
        };

        let average_score = match u32::try_from(run.answered) {
            Ok(answered) if answered > 0 => (run.score_total + answered / 2) / answered,
            _ => 0,
        };

        QuizProgress {
            phase: run.phase(),
            current: run.current,
            total: run.questions.len(),
            answered: run.answered,
            average_score,
            last_feedback: run.last_feedback.clone(),
            current_question: run.questions.get(run.current).cloned(),
        }
    }

    /// Fetch a fresh run of `count` questions and start it at question 0.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidCount` for `count == 0`, `QuizError::Busy`
    /// while another request is in flight, `QuizError::EmptyQuiz` when the
    /// service returns no questions, and `QuizError::Gateway` on failure —
    /// in which case the engine stays where it was.
    pub async fn generate(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<(), QuizError> {
        if count == 0 {
            return Err(QuizError::InvalidCount);
        }
        let Some(permit) = self.gate.try_begin() else {
            return Err(QuizError::Busy);
        };

        let questions = self.gateway.generate_quiz(topic, difficulty, count).await?;

        if !permit.is_current() {
            return Ok(());
        }
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        *self.run() = Some(QuizRun::new(topic.map(str::to_string), questions));
        Ok(())
    }

    /// Grade the answer to the current question.
    ///
    /// On success the feedback is recorded, the answered count advances, and
    /// the score is added to the running total iff the answer was correct.
    /// On failure the round stays unanswered so the user can edit and retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyAnswer` for blank text, `QuizError::Busy`
    /// while a request is pending, `QuizError::NoActiveQuestion` before a
    /// run starts, `QuizError::AlreadyAnswered` after the current question
    /// was graded, and `QuizError::Gateway` when grading fails.
    pub async fn submit_answer(&self, text: &str) -> Result<(), QuizError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        let Some(permit) = self.gate.try_begin() else {
            return Err(QuizError::Busy);
        };

        let (question, topic) = {
            let guard = self.run();
            let Some(run) = guard.as_ref() else {
                return Err(QuizError::NoActiveQuestion);
            };
            match run.phase() {
                QuizPhase::Unanswered => {}
                QuizPhase::Answered | QuizPhase::Complete => {
                    return Err(QuizError::AlreadyAnswered);
                }
                QuizPhase::NotStarted => return Err(QuizError::NoActiveQuestion),
            }
            let question = run
                .questions
                .get(run.current)
                .ok_or(QuizError::NoActiveQuestion)?
                .text()
                .to_string();
            (question, run.topic.clone())
        };

        let feedback = self
            .gateway
            .check_answer(&question, text, topic.as_deref())
            .await?;

        if !permit.is_current() {
            return Ok(());
        }

        let mut guard = self.run();
        if let Some(run) = guard.as_mut() {
            run.answered += 1;
            if feedback.is_correct() {
                run.score_total += u32::from(feedback.score());
            }
            run.last_feedback = Some(feedback);
        }
        Ok(())
    }

    /// Move past the feedback of a graded question: on to the next question
    /// mid-run, or clear the final feedback once the run is complete.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveQuestion` before a run starts and
    /// `QuizError::NotAnswered` while the current question is ungraded.
    pub fn advance(&self) -> Result<(), QuizError> {
        let mut guard = self.run();
        let Some(run) = guard.as_mut() else {
            return Err(QuizError::NoActiveQuestion);
        };
        match run.phase() {
            QuizPhase::Answered => {
                run.last_feedback = None;
                run.current += 1;
                Ok(())
            }
            QuizPhase::Complete => {
                run.last_feedback = None;
                Ok(())
            }
            QuizPhase::Unanswered => Err(QuizError::NotAnswered),
            QuizPhase::NotStarted => Err(QuizError::NoActiveQuestion),
        }
    }

    /// Discard the run and mark any in-flight request stale.
    pub fn restart(&self) {
        self.gate.invalidate();
        *self.run() = None;
    }
}
