use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{ExamSummary, LessonData};
use exam_core::time::fixed_clock;
use services::{
    ApiError, CheckRequest, CheckResponse, Clock, ExamApi, GuardianRequest, GuardianResponse,
    LessonRequest, SummaryRequest, WelcomeRequest, WelcomeResponse,
};
use storage::{InMemoryStore, SessionStore};

use crate::context::{build_app_context, UiApp};
use crate::views::{EgzaminatorView, SelectorView};

/// Backend stub for render smoke tests. Every endpoint fails as unreachable,
/// so what renders comes purely from the seeded session store.
struct UnreachableApi;

#[async_trait]
impl ExamApi for UnreachableApi {
    async fn welcome(&self, _request: &WelcomeRequest) -> Result<WelcomeResponse, ApiError> {
        Err(ApiError::Unreachable)
    }

    async fn guardian(&self, _request: &GuardianRequest) -> Result<GuardianResponse, ApiError> {
        Err(ApiError::Unreachable)
    }

    async fn check(&self, _request: &CheckRequest) -> Result<CheckResponse, ApiError> {
        Err(ApiError::Unreachable)
    }

    async fn lesson(&self, _request: &LessonRequest) -> Result<LessonData, ApiError> {
        Err(ApiError::Unreachable)
    }

    async fn summary(&self, _request: &SummaryRequest) -> Result<ExamSummary, ApiError> {
        Err(ApiError::Unreachable)
    }
}

#[derive(Clone)]
struct TestApp {
    store: Arc<InMemoryStore>,
}

impl UiApp for TestApp {
    fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::new(UnreachableApi)
    }

    fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store) as Arc<dyn SessionStore>
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Selector,
    Egzaminator,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Selector => rsx! { SelectorView {} },
        ViewKind::Egzaminator => rsx! { EgzaminatorView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<InMemoryStore>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_store(view, Arc::new(InMemoryStore::new()))
}

pub fn setup_view_harness_with_store(view: ViewKind, store: Arc<InMemoryStore>) -> ViewHarness {
    let app = Arc::new(TestApp {
        store: Arc::clone(&store),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, store }
}
