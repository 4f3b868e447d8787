use dioxus::prelude::*;

use services::{ActiveView, ServerStatus};

use crate::context::AppContext;
use crate::views::{ChatView, FlashcardsView, QuizView, SidebarView, StateRevision, UploadView};

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context_provider(|| StateRevision(Signal::new(0)));

    // Startup probe: connectivity indicator plus the initial document list.
    let startup_controller = ctx.controller();
    use_future(move || {
        let controller = startup_controller.clone();
        let mut revision = revision;
        async move {
            controller.corpus().check_health().await;
            controller.corpus().refresh().await;
            revision.bump();
        }
    });

    revision.subscribe();
    let controller = ctx.controller();
    let status = controller.corpus().status();
    let view = controller.active_view();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Study Assistant" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                header { class: "app-header",
                    h1 { "🎯 Study Assistant" }
                    ConnectionBadge { status }
                }
                div { class: "app-container",
                    SidebarView {}
                    main { class: "main-content",
                        match view {
                            ActiveView::UploadPrompt => rsx! { UploadView {} },
                            ActiveView::Chat => rsx! { ChatView {} },
                            ActiveView::Quiz => rsx! { QuizView {} },
                            ActiveView::Flashcards => rsx! { FlashcardsView {} },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConnectionBadge(status: ServerStatus) -> Element {
    let (class, label) = match status {
        ServerStatus::Checking => ("status-indicator checking", "⏳ Checking..."),
        ServerStatus::Connected => ("status-indicator connected", "🟢 Connected"),
        ServerStatus::Disconnected => ("status-indicator disconnected", "🔴 Disconnected"),
    };
    rsx! {
        div { class: "{class}", "{label}" }
    }
}
