use dioxus::prelude::*;

use prep_core::StudyMode;

use crate::context::AppContext;
use crate::views::{StateRevision, ViewError};

const COMPANIES: [&str; 15] = [
    "Amazon",
    "Google",
    "Microsoft",
    "Meta",
    "Apple",
    "TCS",
    "Infosys",
    "Wipro",
    "Cognizant",
    "Accenture",
    "Adobe",
    "Oracle",
    "Salesforce",
    "Flipkart",
    "PayTM",
];

const TOPICS: [&str; 14] = [
    "DSA",
    "System Design",
    "OS",
    "DBMS",
    "Computer Networks",
    "OOP",
    "JavaScript",
    "React",
    "Python",
    "Java",
    "SQL",
    "Behavioral",
    "HR Round",
    "Aptitude",
];

#[component]
pub fn SidebarView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<StateRevision>();
    revision.subscribe();

    let controller = ctx.controller();
    let documents = controller.corpus().documents();
    let mode = controller.mode();
    let company = controller.company().unwrap_or_default();
    let topic = controller.topic().unwrap_or_default();

    let mut confirming_clear = use_signal(|| false);
    let mut clear_error = use_signal(|| None::<ViewError>);

    let on_clear = {
        let controller = controller.clone();
        move |_| {
            if !confirming_clear() {
                confirming_clear.set(true);
                return;
            }
            confirming_clear.set(false);
            let controller = controller.clone();
            let mut revision = revision;
            spawn(async move {
                match controller.corpus().clear_all().await {
                    Ok(()) => clear_error.set(None),
                    Err(err) => clear_error.set(Some(ViewError::new(err))),
                }
                revision.bump();
            });
        }
    };

    let on_mode = {
        let controller = controller.clone();
        move |next: StudyMode| {
            controller.set_mode(next);
            let mut revision = revision;
            revision.bump();
        }
    };

    let controller_for_company = controller.clone();
    let controller_for_topic = controller.clone();

    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-section",
                h3 { "📚 Documents ({documents.len()})" }
                div { class: "documents-list",
                    if documents.is_empty() {
                        p { class: "no-documents", "No documents uploaded" }
                    } else {
                        for name in documents.iter() {
                            div { class: "document-item", "📄 {name}" }
                        }
                    }
                }
                if !documents.is_empty() {
                    button {
                        class: if confirming_clear() { "clear-btn confirming" } else { "clear-btn" },
                        onclick: on_clear,
                        if confirming_clear() { "Really clear all documents?" } else { "🗑 Clear All" }
                    }
                }
                if let Some(err) = clear_error() {
                    p { class: "sidebar-error", "{err.message()}" }
                }
            }

            div { class: "sidebar-section",
                h3 { "Study Mode" }
                div { class: "mode-buttons",
                    for candidate in StudyMode::ALL {
                        button {
                            class: if candidate == mode { "mode-btn active" } else { "mode-btn" },
                            onclick: {
                                let mut on_mode = on_mode.clone();
                                move |_| on_mode(candidate)
                            },
                            "{candidate.label()}"
                        }
                    }
                }
            }

            if mode == StudyMode::CompanySpecific {
                div { class: "sidebar-section",
                    h3 { "Select Company" }
                    select {
                        class: "company-select",
                        value: "{company}",
                        onchange: move |evt| {
                            controller_for_company.set_company(Some(evt.value()));
                            let mut revision = revision;
                            revision.bump();
                        },
                        option { value: "", "All Companies" }
                        for name in COMPANIES {
                            option { value: "{name}", "{name}" }
                        }
                    }
                }
            }

            div { class: "sidebar-section",
                h3 { "Focus Topic (Optional)" }
                select {
                    class: "topic-select",
                    value: "{topic}",
                    onchange: move |evt| {
                        controller_for_topic.set_topic(Some(evt.value()));
                        let mut revision = revision;
                        revision.bump();
                    },
                    option { value: "", "All Topics" }
                    for name in TOPICS {
                        option { value: "{name}", "{name}" }
                    }
                }
            }

            div { class: "sidebar-section tips-section",
                h3 { "💡 Pro Tips" }
                ul { class: "tips-list",
                    li { "Upload more documents to get better answers" }
                    li { "Take quizzes to test your knowledge" }
                    li { "Use flashcards for quick revision" }
                    li { "Practice with mock interviews regularly" }
                }
            }
        }
    }
}
