use dioxus::prelude::*;
use dioxus_router::Link;
use learn_core::model::Module;
use services::LessonCard;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{module_description, module_icon};

/// Lesson listing of a non-day module.
#[component]
pub fn ModuleView(module: Module) -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();
    let lessons = ctx.lessons();
    let progress = ctx.progress();

    let resource = use_resource(use_reactive!(|(module,)| {
        let lessons = lessons.clone();
        let progress = progress.clone();
        let identity = auth_state.identity();
        async move {
            let records = progress.records(identity.as_ref()).await.map_err(|err| {
                warn!(error = %err, "cannot load progress");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(lessons.module_lessons(module, &records))
        }
    }));

    rsx! {
        div { class: "page module-page",
            header { class: "view-header",
                h2 { class: "view-title", "{module_icon(module)} {module.title()}" }
                p { class: "view-subtitle", "{module_description(module)}" }
            }
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "view-error", "{err.message()}" }
                },
                ViewState::Ready(cards) if cards.is_empty() => rsx! {
                    p { class: "empty-state", "No lessons yet." }
                },
                ViewState::Ready(cards) => rsx! {
                    div { class: "lessons-grid",
                        for card in cards {
                            LessonCardView { key: "{card.lesson_id}", card }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn LessonCardView(card: LessonCard) -> Element {
    let class = if card.completed {
        "lesson-card completed"
    } else {
        "lesson-card"
    };
    rsx! {
        Link { class: "{class}", to: Route::Lesson { id: card.lesson_id.to_string() },
            h3 { "{card.title}" }
            p { "{card.description}" }
            div { class: "lesson-meta",
                span { "{card.item_count} items" }
                if card.question_count > 0 {
                    span { "{card.question_count} questions" }
                }
            }
            if card.completed {
                span { class: "lesson-badge", "✓ Completed" }
            }
        }
    }
}
