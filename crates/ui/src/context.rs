use services::SessionController;

/// Context handed to every view by the application composition root
/// (`crates/app`). Cloning is cheap; the controller's clones share state.
#[derive(Clone)]
pub struct AppContext {
    controller: SessionController,
}

impl AppContext {
    #[must_use]
    pub fn new(controller: SessionController) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn controller(&self) -> SessionController {
        self.controller.clone()
    }
}
