use dioxus::prelude::*;

use prep_core::Message;

use crate::context::AppContext;
use crate::views::StateRevision;
use crate::views::upload::DocumentPicker;
use crate::vm::markdown_to_html;

const QUICK_PROMPTS: [&str; 6] = [
    "Ask me DSA questions",
    "Explain DBMS normalization",
    "What are OS scheduling algorithms?",
    "Give me behavioral questions",
    "Review my resume",
    "Common interview questions",
];

#[component]
pub fn ChatView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<StateRevision>();
    revision.subscribe();

    let controller = ctx.controller();
    // A freshly entered chat mode seeds its greeting on first render.
    controller.ensure_chat_greeting();

    let mode = controller.mode();
    let company = controller.company();
    let topic = controller.topic();
    let chat = controller.chat().clone();
    let messages = chat.messages();
    let pending = chat.is_pending();
    let fresh = chat.is_fresh();
    let uploading = controller.corpus().is_uploading();

    let mut input = use_signal(String::new);

    let submit = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let question = input().trim().to_string();
            if question.is_empty() {
                return;
            }
            input.set(String::new());
            let controller = controller.clone();
            let mut revision = revision;
            spawn(async move {
                revision.bump();
                // Busy/blank rejections are silent no-ops; the input stays gated.
                let _ = controller.send_chat(&question).await;
                revision.bump();
            });
        }
    };

    let mode_badge = mode.label().to_uppercase();

    rsx! {
        div { class: "chat-interface",
            div { class: "chat-header",
                div { class: "mode-indicator",
                    span { class: "mode-badge", "{mode_badge}" }
                    if let Some(company) = company.as_deref() {
                        span { class: "company-badge", "{company}" }
                    }
                    if let Some(topic) = topic.as_deref() {
                        span { class: "topic-badge", "{topic}" }
                    }
                }
                div { class: "upload-more",
                    if uploading {
                        span { class: "uploading-note", "Uploading..." }
                    } else {
                        DocumentPicker { class: "upload-more-input" }
                    }
                }
            }

            div { class: "messages-container",
                for message in messages.iter() {
                    MessageBubble { message: message.clone() }
                }
                if pending {
                    div { class: "message assistant",
                        div { class: "message-content typing-indicator", "..." }
                    }
                }
            }

            if fresh {
                div { class: "quick-prompts",
                    p { "Quick prompts:" }
                    div { class: "prompt-buttons",
                        for prompt in QUICK_PROMPTS {
                            button {
                                class: "prompt-btn",
                                onclick: move |_| input.set(prompt.to_string()),
                                "{prompt}"
                            }
                        }
                    }
                }
            }

            form { class: "chat-input-form", onsubmit: submit,
                input {
                    class: "chat-input",
                    value: "{input}",
                    placeholder: "Ask me anything about your study materials...",
                    disabled: pending,
                    oninput: move |evt| input.set(evt.value()),
                }
                button {
                    class: "send-btn",
                    r#type: "submit",
                    disabled: pending || input().trim().is_empty(),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: Message) -> Element {
    let class = if message.is_user() {
        "message user"
    } else {
        "message assistant"
    };
    let html = markdown_to_html(message.content());

    rsx! {
        div { class: "{class}",
            div { class: "message-content",
                div { class: "message-text", dangerous_inner_html: "{html}" }
                if !message.citations().is_empty() {
                    div { class: "sources",
                        h4 { "📚 Sources:" }
                        for citation in message.citations() {
                            div { class: "source-item",
                                strong { "{citation.source}" }
                                span { class: "source-page", " (Page {citation.page})" }
                                p { "{citation.excerpt}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
