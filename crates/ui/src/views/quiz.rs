use dioxus::prelude::*;
use learn_core::QuizResult;

use crate::views::audio::SpeakButton;
use crate::vm::{OptionVm, QuizIntent, QuizOutcome, QuizVm};

/// Interactive multiple-choice test over the quiz held in `quiz`.
#[component]
pub fn QuizPanel(quiz: Signal<Option<QuizVm>>, on_complete: EventHandler<QuizResult>) -> Element {
    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut quiz = quiz;
        let outcome = quiz
            .write()
            .as_mut()
            .map_or(QuizOutcome::Ignored, |vm| vm.dispatch(intent));
        if let QuizOutcome::Completed(result) = outcome {
            on_complete.call(result);
        }
    });

    let guard = quiz.read();
    let Some(vm) = guard.as_ref() else {
        return rsx! { p { class: "quiz-empty", "No questions available" } };
    };
    let header = vm.header();
    let score = vm.score_label();
    let prompt = vm.prompt().unwrap_or_default().to_owned();
    let options = vm.options();
    let feedback_label = vm.feedback_label();
    let explanation = vm.feedback().map(|f| f.explanation.clone());
    let primary = vm.primary_action();
    let can_submit = vm.can_submit();
    let dots = vm.dots();
    drop(guard);

    rsx! {
        div { class: "quiz",
            div { class: "quiz-header",
                h3 { "{header}" }
                div { class: "quiz-score", "{score}" }
            }
            div { class: "question-card",
                p { class: "question-text", "{prompt}" }
                div { class: "quiz-options",
                    for option in options {
                        QuizOption { option, dispatch }
                    }
                }
                if let (Some(label), Some(explanation)) = (feedback_label, explanation) {
                    div { class: "quiz-explanation",
                        p { class: "explanation-verdict", "{label}" }
                        p { "{explanation}" }
                    }
                }
                div { class: "quiz-actions",
                    if let Some((intent, label)) = primary {
                        button {
                            class: "btn btn-primary",
                            id: "quiz-primary",
                            r#type: "button",
                            disabled: intent == QuizIntent::Submit && !can_submit,
                            onclick: move |_| dispatch.call(intent),
                            "{label}"
                        }
                    }
                }
            }
            div { class: "quiz-progress",
                for (i, dot) in dots.into_iter().enumerate() {
                    div { key: "{i}", class: dot.class() }
                }
            }
        }
    }
}

#[component]
fn QuizOption(option: OptionVm, dispatch: Callback<QuizIntent>) -> Element {
    let index = option.index;
    rsx! {
        div { class: "quiz-option-row",
            button {
                class: option.state.class(),
                r#type: "button",
                disabled: option.state.is_locked(),
                onclick: move |_| dispatch.call(QuizIntent::Select(index)),
                span { class: "option-letter", "{option.letter}" }
                span { class: "option-content",
                    span { class: "option-text malayalam-text", "{option.text}" }
                    if let Some(reading) = option.pronunciation.as_ref() {
                        span { class: "option-transliteration", "Read as: {reading}" }
                    }
                }
            }
            SpeakButton { text: option.text.clone() }
        }
    }
}
