use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use learn_core::QuizResult;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::quiz::QuizPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContinueTarget, DashboardVm, ModuleCardVm, QuizVm, map_dashboard};

#[component]
pub fn HomeView() -> Element {
    let auth_state = use_auth_state();

    rsx! {
        div { class: "page home-page",
            if auth_state.is_signed_in() {
                Dashboard {}
            } else {
                Landing {}
            }
        }
    }
}

#[component]
fn Landing() -> Element {
    rsx! {
        section { class: "hero",
            h1 { class: "malayalam-text hero-title", "മലയാളം" }
            h2 { "Learn Malayalam" }
            p { class: "hero-subtitle",
                "Study a few phrases every day, test yourself and unlock the next day."
            }
            div { class: "hero-actions",
                Link { class: "btn btn-primary", to: Route::Days {}, "Start Learning" }
                Link { class: "btn btn-secondary", to: Route::Register {}, "Create an Account" }
            }
        }
        DailyQuestion {}
    }
}

/// One question per calendar day, the same for every learner.
#[component]
fn DailyQuestion() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = use_signal(|| {
        let today = ctx.clock().today();
        match ctx.lessons().daily_quiz(today) {
            Ok(session) => Some(QuizVm::new(session)),
            Err(err) => {
                warn!(error = %err, "no question of the day");
                None
            }
        }
    });
    let mut answered = use_signal(|| None::<QuizResult>);

    if quiz.read().is_none() {
        return rsx! {};
    }

    rsx! {
        section { class: "daily-question",
            h3 { "Question of the Day" }
            if let Some(result) = answered() {
                p { class: "daily-verdict",
                    if result.is_passing() {
                        "Well done! Come back tomorrow for a new question."
                    } else {
                        "Not quite. A new question arrives tomorrow."
                    }
                }
            } else {
                QuizPanel {
                    quiz,
                    on_complete: move |result| answered.set(Some(result)),
                }
            }
        }
    }
}

#[component]
fn Dashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let identity = auth_state.identity();
        async move {
            let Some(identity) = identity else {
                return Err(ViewError::Unknown);
            };
            let overview = progress.overview(Some(&identity)).await.map_err(|err| {
                warn!(error = %err, "cannot load progress");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_dashboard(&identity, &overview))
        }
    });

    match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "view-error", "{err.message()}" }
        },
        ViewState::Ready(vm) => rsx! {
            DashboardBody { vm }
        },
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    let navigator = use_navigator();
    let target = match vm.continue_card.target.clone() {
        ContinueTarget::Lesson(id) => Route::Lesson { id: id.to_string() },
        ContinueTarget::AllDays => Route::Days {},
    };

    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "Welcome back, {vm.greeting_name}!" }
            p { class: "view-subtitle", "Continue your Malayalam learning journey" }
        }
        div { class: "stats-grid",
            StatCard { value: vm.days_label.clone(), label: "Days Completed" }
            StatCard { value: vm.lessons_completed.to_string(), label: "Lessons Completed" }
            StatCard { value: vm.overall_label.clone(), label: "Overall Progress" }
            StatCard { value: vm.tests_taken.to_string(), label: "Tests Taken" }
        }
        section { class: "continue-card",
            h3 { "{vm.continue_card.title}" }
            p { "{vm.continue_card.message}" }
            button {
                class: "btn btn-primary",
                id: "dashboard-continue",
                r#type: "button",
                onclick: move |_| {
                    navigator.push(target.clone());
                },
                "{vm.continue_card.cta}"
            }
        }
        section { class: "module-grid",
            for card in vm.modules.iter().cloned() {
                ModuleCard { key: "{card.title}", card }
            }
        }
    }
}

#[component]
fn StatCard(value: String, label: &'static str) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    rsx! {
        Link { class: "module-card", to: Route::for_module(card.module),
            div { class: "module-icon", "{card.icon}" }
            h3 { "{card.title}" }
            p { "{card.description}" }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {card.percentage}%" }
            }
            span { class: "progress-text", "{card.percentage}% complete" }
        }
    }
}
