use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgressPageVm, map_progress_page};

#[component]
pub fn ProgressView() -> Element {
    let auth_state = use_auth_state();

    rsx! {
        div { class: "page progress-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Progress" }
            }
            if auth_state.is_signed_in() {
                ProgressReport {}
            } else {
                div { class: "sign-in-prompt",
                    p { "Sign in to track your progress across lessons." }
                    Link { class: "btn btn-primary", to: Route::Login {}, "Sign In" }
                }
            }
        }
    }
}

#[component]
fn ProgressReport() -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let identity = auth_state.identity();
        async move {
            let overview = progress.overview(identity.as_ref()).await.map_err(|err| {
                warn!(error = %err, "cannot load progress");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_progress_page(&overview))
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
            ProgressBody { vm }
        },
    }
}

#[component]
fn ProgressBody(vm: ProgressPageVm) -> Element {
    rsx! {
        section { class: "overall-progress",
            div { class: "progress-circle",
                span { class: "progress-circle-value", "{vm.overall_percentage}%" }
            }
            p { "{vm.overall_caption}" }
        }
        section { class: "module-progress",
            h3 { "By Module" }
            for module in vm.modules.iter() {
                div { key: "{module.title}", class: "module-progress-row",
                    span { class: "module-progress-title", "{module.icon} {module.title}" }
                    div { class: "progress-bar",
                        div { class: "progress-fill", style: "width: {module.percentage}%" }
                    }
                    span { class: "progress-text", "{module.percentage}%" }
                }
            }
        }
        section { class: "stats-grid",
            div { class: "stat-card",
                div { class: "stat-value", "{vm.days_label}" }
                div { class: "stat-label", "Days Completed" }
            }
            div { class: "stat-card",
                div { class: "stat-value", "{vm.lessons_completed}" }
                div { class: "stat-label", "Lessons Completed" }
            }
            div { class: "stat-card",
                div { class: "stat-value", "{vm.tests_taken}" }
                div { class: "stat-label", "Tests Taken" }
            }
        }
    }
}
