use dioxus::prelude::*;

use services::UploadFile;

use crate::context::AppContext;
use crate::views::{StateRevision, ViewError};

/// File input wired to the corpus upload pipeline. Reused by the chat
/// header's "Upload More" control.
#[component]
pub(crate) fn DocumentPicker(class: &'static str) -> Element {
    let ctx = use_context::<AppContext>();
    let mut revision = use_context::<StateRevision>();
    let mut error = use_signal(|| None::<ViewError>);
    let controller = ctx.controller();

    rsx! {
        input {
            class: "{class}",
            r#type: "file",
            accept: ".pdf",
            multiple: true,
            onchange: move |evt| {
                let picked = evt.files();
                if picked.is_empty() {
                    return;
                }
                let controller = controller.clone();
                let mut revision = revision;
                spawn(async move {
                    let mut files = Vec::new();
                    for file in picked {
                        match file.read_bytes().await {
                            Ok(bytes) => files.push(UploadFile::new(file.name(), bytes.to_vec())),
                            Err(err) => {
                                error.set(Some(ViewError::new(err)));
                                revision.bump();
                                return;
                            }
                        }
                    }
                    revision.bump();
                    match controller.corpus().upload(files).await {
                        Ok(()) => error.set(None),
                        Err(err) => error.set(Some(ViewError::new(err))),
                    }
                    revision.bump();
                });
            },
        }
        if let Some(err) = error() {
            p { class: "upload-error", "{err.message()}" }
        }
    }
}

/// Full-pane prompt shown while the corpus is empty, whatever the mode.
#[component]
pub fn UploadView() -> Element {
    let ctx = use_context::<AppContext>();
    let revision = use_context::<StateRevision>();
    revision.subscribe();
    let uploading = ctx.controller().corpus().is_uploading();

    rsx! {
        div { class: "file-upload-container",
            div { class: "upload-card",
                h2 { "Upload Your Study Materials" }
                p { class: "upload-description",
                    "Upload PDFs containing DSA notes, interview experiences, company \
                     materials, resumes, OS/DBMS/CN notes, or any placement preparation \
                     material."
                }

                div { class: "drop-zone",
                    DocumentPicker { class: "file-input" }
                    p { "Choose PDF files to add to your corpus" }
                    span { class: "file-types", "Supported: PDF files only" }
                }

                if uploading {
                    div { class: "upload-progress",
                        div { class: "spinner" }
                        p { "Processing your documents..." }
                    }
                }

                div { class: "upload-tips",
                    h3 { "💡 What you can upload:" }
                    ul {
                        li { "📚 DSA (Data Structures & Algorithms) notes" }
                        li { "💻 OS, DBMS, Computer Networks notes" }
                        li { "🏢 Company interview experiences" }
                        li { "📄 Your resume for feedback" }
                        li { "📊 Aptitude and reasoning materials" }
                        li { "🎯 Previous year placement questions" }
                    }
                }
            }
        }
    }
}
