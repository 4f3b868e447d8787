use dioxus::prelude::*;

use services::FlashcardPhase;

use crate::context::AppContext;
use crate::views::{StateRevision, ViewError};

const CARD_COUNTS: [u32; 4] = [5, 10, 15, 20];

#[component]
pub fn FlashcardsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<StateRevision>();
    revision.subscribe();

    let controller = ctx.controller();
    let cards = controller.flashcards().clone();
    let progress = cards.progress();
    let pending = cards.is_pending();
    let topic = controller.topic();

    let mut count = use_signal(|| 10_u32);
    let mut error = use_signal(|| None::<ViewError>);

    let on_generate = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            let mut revision = revision;
            spawn(async move {
                revision.bump();
                match controller.generate_flashcards(count()).await {
                    Ok(()) => error.set(None),
                    Err(err) => error.set(Some(ViewError::new(err))),
                }
                revision.bump();
            });
        }
    };

    let topic_label = topic.unwrap_or_else(|| "All Topics".to_string());

    if progress.phase == FlashcardPhase::NotStarted {
        return rsx! {
            div { class: "flashcard-setup",
                h2 { "📇 Generate Flashcards" }
                p { "Create quick revision cards from your uploaded materials!" }

                div { class: "flashcard-settings",
                    div { class: "setting",
                        label { "Topic:" }
                        input { value: "{topic_label}", disabled: true }
                    }
                    div { class: "setting",
                        label { "Number of Cards:" }
                        select {
                            value: "{count}",
                            onchange: move |evt| count.set(evt.value().parse().unwrap_or(10)),
                            for n in CARD_COUNTS {
                                option { value: "{n}", "{n} cards" }
                            }
                        }
                    }
                }

                if let Some(err) = error() {
                    p { class: "flashcard-error", "{err.message()}" }
                }

                button {
                    class: "generate-btn",
                    disabled: pending,
                    onclick: on_generate,
                    if pending { "Generating..." } else { "Generate Flashcards ✨" }
                }
            }
        };
    }

    let counter_label = format!("Card {} of {}", progress.current + 1, progress.total);
    let cards_for_flip = cards.clone();
    let cards_for_prev = cards.clone();
    let cards_for_next = cards.clone();
    let cards_for_flip_btn = cards.clone();
    let cards_for_restart = cards.clone();
    let at_first = progress.current == 0;
    let at_last = progress.current + 1 >= progress.total;

    rsx! {
        div { class: "flashcard-viewer",
            div { class: "flashcard-header",
                h2 { "📇 Flashcards - {topic_label}" }
                div { class: "flashcard-counter", "{counter_label}" }
            }

            div { class: "flashcard-container",
                div {
                    class: if progress.flipped { "flashcard flipped" } else { "flashcard" },
                    onclick: move |_| {
                        cards_for_flip.flip();
                        let mut revision = revision;
                        revision.bump();
                    },
                    if let Some(card) = progress.card.as_ref() {
                        if progress.flipped {
                            div { class: "flashcard-back",
                                div { class: "card-label", "Answer" }
                                div { class: "card-content", "{card.back()}" }
                                div { class: "flip-hint", "↻ Click to flip" }
                            }
                        } else {
                            div { class: "flashcard-front",
                                div { class: "card-label", "Question" }
                                div { class: "card-content", "{card.front()}" }
                                div { class: "flip-hint", "↻ Click to flip" }
                            }
                        }
                    }
                }
            }

            div { class: "flashcard-controls",
                button {
                    class: "nav-btn",
                    disabled: at_first,
                    onclick: move |_| {
                        cards_for_prev.previous();
                        let mut revision = revision;
                        revision.bump();
                    },
                    "← Previous"
                }
                button {
                    class: "flip-btn",
                    onclick: move |_| {
                        cards_for_flip_btn.flip();
                        let mut revision = revision;
                        revision.bump();
                    },
                    "↻ Flip Card"
                }
                button {
                    class: "nav-btn",
                    disabled: at_last,
                    onclick: move |_| {
                        cards_for_next.next();
                        let mut revision = revision;
                        revision.bump();
                    },
                    "Next →"
                }
            }

            div { class: "flashcard-progress",
                div { class: "progress-dots",
                    for index in 0..progress.total {
                        ProgressDot {
                            index,
                            current: progress.current,
                        }
                    }
                }
            }

            div { class: "flashcard-actions",
                button {
                    class: "restart-btn",
                    onclick: move |_| {
                        cards_for_restart.restart();
                        error.set(None);
                        let mut revision = revision;
                        revision.bump();
                    },
                    "↻ New Set"
                }
            }
        }
    }
}

#[component]
fn ProgressDot(index: usize, current: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<StateRevision>();
    let cards = ctx.controller().flashcards().clone();

    let class = if index == current {
        "dot active"
    } else if index < current {
        "dot completed"
    } else {
        "dot"
    };

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| {
                cards.jump_to(index);
                let mut revision = revision;
                revision.bump();
            },
        }
    }
}
