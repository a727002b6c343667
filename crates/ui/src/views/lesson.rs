use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use learn_core::QuizResult;
use learn_core::model::LessonId;
use tracing::warn;

use crate::context::{AppContext, use_auth_state};
use crate::routes::Route;
use crate::views::audio::SpeakButton;
use crate::views::quiz::QuizPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonItemVm, LessonVm, QuizResultVm, QuizVm, SaveStatus, map_lesson};

#[derive(Clone, Debug, PartialEq)]
struct LessonData {
    lesson: LessonVm,
    next_day: Option<(LessonId, u8)>,
}

#[derive(Clone, Debug, PartialEq)]
enum LessonMode {
    Study,
    Quiz,
    Result(QuizResultVm),
}

#[component]
pub fn LessonView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let auth_state = use_auth_state();
    let navigator = use_navigator();
    let lessons = ctx.lessons();
    let progress = ctx.progress();

    let mut mode = use_signal(|| LessonMode::Study);
    let mut quiz = use_signal(|| None::<QuizVm>);

    let lessons_for_resource = lessons.clone();
    let progress_for_resource = progress.clone();
    let resource = use_resource(use_reactive!(|(id,)| {
        let lessons = lessons_for_resource.clone();
        let progress = progress_for_resource.clone();
        let identity = auth_state.identity();
        async move {
            let lesson_id = LessonId::new(id).map_err(|_| ViewError::NotFound)?;
            let records = progress
                .records(identity.as_ref())
                .await
                .map_err(|_| ViewError::Unknown)?;
            lessons
                .ensure_accessible(&records, &lesson_id)
                .map_err(|e| ViewError::from_lesson(&e))?;
            let lesson = lessons
                .lesson(&lesson_id)
                .map_err(|e| ViewError::from_lesson(&e))?;
            let next = lessons.next_day_lesson(&lesson_id);
            Ok::<_, ViewError>(LessonData {
                lesson: map_lesson(lesson, next),
                next_day: next.and_then(|l| l.day.map(|d| (l.id.clone(), d.value()))),
            })
        }
    }));

    let state = view_state_from_resource(&resource);

    let start_quiz = {
        let lessons = lessons.clone();
        use_callback(move |lesson_id: LessonId| match lessons.start_quiz(&lesson_id) {
            Ok(session) => {
                quiz.set(Some(QuizVm::new(session)));
                mode.set(LessonMode::Quiz);
            }
            Err(err) => warn!(lesson_id = %lesson_id, error = %err, "cannot start quiz"),
        })
    };

    let data = match &state {
        ViewState::Ready(data) => Some(data.clone()),
        _ => None,
    };
    let on_complete = {
        let data = data.clone();
        move |result: QuizResult| {
            let Some(data) = data.clone() else {
                return;
            };
            let pending = QuizResultVm::new(result, data.next_day.clone(), SaveStatus::Saving);
            mode.set(LessonMode::Result(pending.clone()));
            let progress = progress.clone();
            let identity = auth_state.identity();
            spawn(async move {
                let status = match progress
                    .record_result(identity.as_ref(), &data.lesson.id, &result)
                    .await
                {
                    Ok(saved) => SaveStatus::from_saved(saved.as_ref()),
                    Err(err) => {
                        warn!(lesson_id = %data.lesson.id, error = %err, "progress not saved");
                        SaveStatus::Failed
                    }
                };
                // The learner may have retaken the test meanwhile.
                let still_pending =
                    matches!(&*mode.peek(), LessonMode::Result(card) if *card == pending);
                if still_pending {
                    mode.set(LessonMode::Result(pending.with_status(status)));
                }
            });
        }
    };

    let current_mode = mode();

    rsx! {
        div { class: "page lesson-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "lesson-error",
                        p { "{err.message()}" }
                        Link { class: "btn btn-secondary", to: Route::Days {}, "Back to Days" }
                    }
                },
                ViewState::Ready(data) => {
                    let back = Route::for_module(data.lesson.module);
                    let module_title = data.lesson.module.title();
                    rsx! {
                        header { class: "view-header",
                            Link { class: "back-link", to: back, "← {module_title}" }
                            h2 { class: "view-title", "{data.lesson.heading}" }
                            if !data.lesson.description.is_empty() {
                                p { class: "view-subtitle", "{data.lesson.description}" }
                            }
                        }
                        match current_mode {
                            LessonMode::Study => rsx! {
                                for section in data.lesson.sections.iter().cloned() {
                                    section { class: "lesson-section",
                                        h3 { "{section.title}" }
                                        if !section.description.is_empty() {
                                            p { class: "section-description", "{section.description}" }
                                        }
                                        div { class: "lesson-items",
                                            for item in section.items.iter().cloned() {
                                                LessonItemCard { item }
                                            }
                                        }
                                    }
                                }
                                if let Some(label) = data.lesson.quiz_label.clone() {
                                    section { class: "test-section",
                                        h3 { "Test Your Knowledge" }
                                        if let Some(hint) = data.lesson.unlock_hint.clone() {
                                            p { "{hint}" }
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            id: "lesson-start-test",
                                            r#type: "button",
                                            onclick: {
                                                let lesson_id = data.lesson.id.clone();
                                                move |_| start_quiz.call(lesson_id.clone())
                                            },
                                            "{label}"
                                        }
                                    }
                                }
                            },
                            LessonMode::Quiz => rsx! {
                                QuizPanel { quiz, on_complete }
                            },
                            LessonMode::Result(card) => rsx! {
                                div { class: if card.passed { "result-card passed" } else { "result-card" },
                                    div { class: "result-score", "{card.percentage_label}" }
                                    p { class: "result-summary", "{card.summary}" }
                                    h3 { "{card.headline}" }
                                    p { "{card.message}" }
                                    if let Some(notice) = card.notice {
                                        p { class: "save-notice", "{notice}" }
                                    }
                                    div { class: "result-actions",
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| {
                                                if let Some(vm) = quiz.write().as_mut() {
                                                    vm.restart();
                                                }
                                                mode.set(LessonMode::Quiz);
                                            },
                                            "Retake Test"
                                        }
                                        button {
                                            class: "btn btn-secondary",
                                            r#type: "button",
                                            onclick: move |_| mode.set(LessonMode::Study),
                                            "Review Lesson"
                                        }
                                        if let Some((next_id, cta)) = card.continue_to.clone() {
                                            button {
                                                class: "btn btn-primary",
                                                r#type: "button",
                                                onclick: move |_| {
                                                    quiz.set(None);
                                                    mode.set(LessonMode::Study);
                                                    navigator.push(Route::Lesson { id: next_id.to_string() });
                                                },
                                                "{cta}"
                                            }
                                        }
                                    }
                                }
                            },
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn LessonItemCard(item: LessonItemVm) -> Element {
    rsx! {
        div { class: "lesson-item",
            div { class: "item-main",
                span { class: "malayalam-text item-malayalam", "{item.malayalam}" }
                SpeakButton { text: item.malayalam.clone() }
            }
            if !item.transliteration.is_empty() {
                p { class: "item-transliteration", "{item.transliteration}" }
            }
            if !item.english.is_empty() {
                p { class: "item-english", "{item.english}" }
            }
            if let Some(category) = item.category.as_ref() {
                span { class: "item-category", "{category}" }
            }
        }
    }
}
