use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DayCardState, DayCardVm, day_progress_label, map_day_cards};

#[derive(Clone, Debug, PartialEq)]
struct DaysData {
    cards: Vec<DayCardVm>,
    progress_label: String,
    percentage: u8,
}

#[component]
pub fn DaysView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();
    let lessons = ctx.lessons();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        let progress = progress.clone();
        let identity = auth_state.identity();
        async move {
            let overview = progress.overview(identity.as_ref()).await.map_err(|err| {
                warn!(error = %err, "cannot load progress");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(DaysData {
                cards: map_day_cards(&lessons.days(&overview.records)),
                progress_label: day_progress_label(&overview.days),
                percentage: overview.days.percentage,
            })
        }
    });

    rsx! {
        div { class: "page days-page",
            header { class: "view-header",
                h2 { class: "view-title", "Daily Lessons" }
                p { class: "view-subtitle",
                    "Complete each day's test to unlock the next one."
                }
            }
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "view-error", "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "days-progress",
                        div { class: "progress-bar",
                            div { class: "progress-fill", style: "width: {data.percentage}%" }
                        }
                        p { class: "progress-text", "{data.progress_label}" }
                    }
                    div { class: "days-grid",
                        for card in data.cards {
                            DayCardView { key: "{card.day}", card }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn DayCardView(card: DayCardVm) -> Element {
    let body = rsx! {
        div { class: "day-number", "Day {card.day}" }
        h3 { "{card.title}" }
        p { class: "day-description", "{card.description}" }
        span { class: "day-items", "{card.items_label}" }
    };

    match card.state {
        DayCardState::Locked { message } => rsx! {
            div { class: "day-card locked",
                {body}
                p { class: "day-lock", "🔒 {message}" }
            }
        },
        DayCardState::Open => rsx! {
            Link {
                class: "day-card",
                to: Route::Lesson { id: card.lesson_id.to_string() },
                {body}
            }
        },
        DayCardState::Completed => rsx! {
            Link {
                class: "day-card completed",
                to: Route::Lesson { id: card.lesson_id.to_string() },
                {body}
                span { class: "day-badge", "✓ Completed" }
            }
        },
    }
}
