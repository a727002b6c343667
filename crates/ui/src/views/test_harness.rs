use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learn_core::QuizResult;
use learn_core::model::{Identity, LessonId, Module, UserId};
use learn_core::time::fixed_clock;
use services::{AppServices, AuthService, Clock, LessonService, ProgressService, SpeechRate};

use crate::context::{AuthState, UiApp, build_app_context};
use crate::views::{DaysView, HomeView, LessonView, ModuleView, ProgressView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn speech_rate(&self) -> SpeechRate {
        self.services.speech_rate()
    }

    fn muted(&self) -> bool {
        true
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Days,
    Lesson(String),
    Module(Module),
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    identity: Option<Identity>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    AuthState::provide(props.identity.clone());
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
    match use_context::<ViewKind>() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Days => rsx! { DaysView {} },
        ViewKind::Lesson(id) => rsx! { LessonView { id } },
        ViewKind::Module(module) => rsx! { ModuleView { module } },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
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

    /// Rebuild and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
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

pub fn learner() -> Identity {
    Identity::new(UserId::random(), "asha@example.com", Some("Asha Nair".into()))
}

/// Build a harness for `view`, optionally signed in with `completed_days`
/// day lessons already passed.
pub async fn setup_view_harness(
    view: ViewKind,
    identity: Option<Identity>,
    completed_days: u8,
) -> ViewHarness {
    let services = AppServices::in_memory(fixed_clock()).expect("builtin catalog");
    if let Some(identity) = identity.as_ref() {
        let progress = services.progress();
        let perfect = QuizResult::new(5, 5).expect("valid result");
        for day in 1..=completed_days {
            let lesson = LessonId::new(format!("day-{day}")).expect("day slug");
            progress
                .record_result(Some(identity), &lesson, &perfect)
                .await
                .expect("record result");
        }
    }

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            identity,
        },
    );
    ViewHarness { dom }
}
