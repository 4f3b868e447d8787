use dioxus::prelude::*;

/// One-shot notice for a failed user action. The raw error text is shown
/// inline next to the control that triggered it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError(String);

impl ViewError {
    #[must_use]
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self(error.to_string())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Re-render handle for state held outside the signal graph.
///
/// The services own their state behind shared handles, so views subscribe to
/// this revision counter and bump it after every operation that may have
/// changed what a snapshot would return.
#[derive(Clone, Copy)]
pub struct StateRevision(pub Signal<u64>);

impl StateRevision {
    /// Subscribe the current component to revision bumps.
    pub fn subscribe(&self) {
        let _ = (self.0)();
    }

    /// Trigger a re-render of every subscribed component.
    pub fn bump(&mut self) {
        self.0 += 1;
    }
}
