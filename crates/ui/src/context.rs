use std::sync::Arc;

use services::{Clock, ExamApi};
use storage::{ExamSession, SessionStore};

/// What the composition root provides to the UI.
pub trait UiApp: Send + Sync {
    fn exam_api(&self) -> Arc<dyn ExamApi>;
    fn session_store(&self) -> Arc<dyn SessionStore>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    exam_api: Arc<dyn ExamApi>,
    session_store: Arc<dyn SessionStore>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam_api: app.exam_api(),
            session_store: app.session_store(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::clone(&self.exam_api)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Typed view over the session-scoped storage tier.
    #[must_use]
    pub fn exam_session(&self) -> ExamSession {
        ExamSession::new(Arc::clone(&self.session_store))
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
