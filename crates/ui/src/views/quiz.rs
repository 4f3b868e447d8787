use dioxus::prelude::*;

use prep_core::Difficulty;
use services::{QuizPhase, QuizProgress};

use crate::context::AppContext;
use crate::views::{StateRevision, ViewError};

const QUESTION_COUNTS: [u32; 4] = [3, 5, 10, 15];

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<StateRevision>();
    revision.subscribe();

    let controller = ctx.controller();
    let quiz = controller.quiz().clone();
    let progress = quiz.progress();
    let pending = quiz.is_pending();
    let topic = controller.topic();

    let mut difficulty = use_signal(|| Difficulty::Medium);
    let mut count = use_signal(|| 5_u32);
    let mut answer = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);

    let on_generate = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            let mut revision = revision;
            spawn(async move {
                revision.bump();
                match controller.generate_quiz(difficulty(), count()).await {
                    Ok(()) => {
                        error.set(None);
                        answer.set(String::new());
                    }
                    Err(err) => error.set(Some(ViewError::new(err))),
                }
                revision.bump();
            });
        }
    };

    let on_submit = {
        let quiz = quiz.clone();
        move |_| {
            let quiz = quiz.clone();
            let mut revision = revision;
            spawn(async move {
                revision.bump();
                match quiz.submit_answer(&answer()).await {
                    Ok(()) => error.set(None),
                    Err(err) => error.set(Some(ViewError::new(err))),
                }
                revision.bump();
            });
        }
    };

    let on_advance = {
        let quiz = quiz.clone();
        move |_| {
            if quiz.advance().is_ok() {
                answer.set(String::new());
                error.set(None);
            }
            let mut revision = revision;
            revision.bump();
        }
    };

    let on_restart = {
        let quiz = quiz.clone();
        move |_| {
            quiz.restart();
            answer.set(String::new());
            error.set(None);
            let mut revision = revision;
            revision.bump();
        }
    };

    if progress.phase == QuizPhase::NotStarted {
        let topic_label = topic.unwrap_or_else(|| "All topics".to_string());
        return rsx! {
            div { class: "quiz-setup",
                h2 { "🎯 Start Your Quiz" }
                p { "Test your knowledge with questions from your uploaded materials!" }

                div { class: "quiz-settings",
                    div { class: "setting",
                        label { "Topic:" }
                        input { value: "{topic_label}", disabled: true }
                    }
                    div { class: "setting",
                        label { "Difficulty:" }
                        select {
                            value: "{difficulty().wire_name()}",
                            onchange: move |evt| {
                                difficulty.set(evt.value().parse().unwrap_or_default());
                            },
                            for level in Difficulty::ALL {
                                option { value: "{level.wire_name()}", "{level.label()}" }
                            }
                        }
                    }
                    div { class: "setting",
                        label { "Number of Questions:" }
                        select {
                            value: "{count}",
                            onchange: move |evt| {
                                count.set(evt.value().parse().unwrap_or(5));
                            },
                            for n in QUESTION_COUNTS {
                                option { value: "{n}", "{n}" }
                            }
                        }
                    }
                }

                if let Some(err) = error() {
                    p { class: "quiz-error", "{err.message()}" }
                }

                button {
                    class: "start-btn",
                    disabled: pending,
                    onclick: on_generate,
                    if pending { "Generating..." } else { "Start Quiz 🚀" }
                }
            }
        };
    }

    let question_heading = progress.current_question.as_ref().map(|question| {
        (
            question.difficulty_label().to_string(),
            format!("Q{}: {}", progress.current + 1, question.text()),
        )
    });

    rsx! {
        div { class: "quiz-mode",
            QuizHeader { progress: progress.clone() }

            if let Some(err) = error() {
                p { class: "quiz-error", "{err.message()}" }
            }

            match progress.phase {
                QuizPhase::Unanswered => rsx! {
                    div { class: "question-container",
                        div { class: "question-card",
                            if let Some((badge, title)) = question_heading.as_ref() {
                                div { class: "question-badge", "{badge}" }
                                h3 { "{title}" }
                            }
                            div { class: "answer-section",
                                textarea {
                                    value: "{answer}",
                                    placeholder: "Type your answer here...",
                                    rows: "6",
                                    disabled: pending,
                                    oninput: move |evt| answer.set(evt.value()),
                                }
                                button {
                                    class: "submit-btn",
                                    disabled: pending || answer().trim().is_empty(),
                                    onclick: on_submit,
                                    if pending { "Checking..." } else { "Submit Answer" }
                                }
                            }
                        }
                    }
                },
                QuizPhase::Answered => rsx! {
                    ResultCard {
                        progress: progress.clone(),
                        user_answer: answer(),
                        on_advance,
                    }
                },
                QuizPhase::Complete => rsx! {
                    div { class: "quiz-complete",
                        h2 { "🎉 Quiz Complete!" }
                        div { class: "final-score",
                            span { class: "score-value", "{progress.average_score}" }
                            span { class: "score-label", " / 100" }
                        }
                        p { class: "completion-message",
                            "You answered {progress.answered} questions"
                        }
                        button { class: "restart-btn", onclick: on_restart, "↻ Try Again" }
                    }
                },
                QuizPhase::NotStarted => rsx! {},
            }
        }
    }
}

#[component]
fn QuizHeader(progress: QuizProgress) -> Element {
    let shown = (progress.current + 1).min(progress.total);
    rsx! {
        div { class: "quiz-header",
            div { class: "quiz-progress",
                span { "Question {shown} of {progress.total}" }
            }
            div { class: "quiz-score", "Score: {progress.average_score}/100" }
        }
    }
}

#[component]
fn ResultCard(
    progress: QuizProgress,
    user_answer: String,
    on_advance: EventHandler<MouseEvent>,
) -> Element {
    let Some(feedback) = progress.last_feedback.clone() else {
        return rsx! {};
    };
    let (card_class, headline) = if feedback.is_correct() {
        ("result-card correct", "Great Job! ✨")
    } else {
        ("result-card incorrect", "Keep Learning! 📚")
    };
    let next_label = if progress.current + 1 < progress.total {
        "Next Question →"
    } else {
        "See Results"
    };

    rsx! {
        div { class: "result-section",
            div { class: "{card_class}",
                div { class: "result-header",
                    h3 { "{headline}" }
                    div { class: "result-score", "Score: {feedback.score()}/100" }
                }
                div { class: "your-answer",
                    h4 { "Your Answer:" }
                    p { "{user_answer}" }
                }
                div { class: "correct-answer",
                    h4 { "Expected Answer:" }
                    p { "{feedback.correct_answer()}" }
                }
                div { class: "feedback",
                    h4 { "Feedback:" }
                    p { "{feedback.feedback()}" }
                }
                button {
                    class: "next-btn",
                    onclick: move |evt| on_advance.call(evt),
                    "{next_label}"
                }
            }
        }
    }
}
