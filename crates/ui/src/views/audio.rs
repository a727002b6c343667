//! Pronunciation playback through the web speech engine of the webview.

use async_trait::async_trait;
use dioxus::document::eval;
use dioxus::prelude::*;
use services::{SilentSpeech, SpeechError, SpeechEvent, SpeechRequest, SpeechSynthesizer};
use tracing::{debug, warn};

use crate::context::AppContext;

/// Speaks through `window.speechSynthesis`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebSpeech;

#[async_trait(?Send)]
impl SpeechSynthesizer for WebSpeech {
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechEvent, SpeechError> {
        let outcome = eval(&speak_script(request))
            .join::<String>()
            .await
            .map_err(|e| SpeechError::Failed(e.to_string()))?;
        match outcome.as_str() {
            "ended" => Ok(SpeechEvent::Ended),
            "cancelled" => Ok(SpeechEvent::Cancelled),
            "unsupported" => Err(SpeechError::Unsupported),
            other => Err(SpeechError::Failed(other.to_owned())),
        }
    }

    async fn cancel(&self) -> Result<(), SpeechError> {
        eval("if ('speechSynthesis' in window) { window.speechSynthesis.cancel(); } return true;")
            .join::<bool>()
            .await
            .map(|_| ())
            .map_err(|e| SpeechError::Failed(e.to_string()))
    }
}

pub(crate) fn speak_script(request: &SpeechRequest) -> String {
    format!(
        r#"return await new Promise((resolve) => {{
            if (!("speechSynthesis" in window)) {{
                resolve("unsupported");
                return;
            }}
            window.speechSynthesis.cancel();
            const utterance = new SpeechSynthesisUtterance({text:?});
            utterance.lang = {lang:?};
            utterance.rate = {rate};
            utterance.pitch = {pitch};
            utterance.volume = {volume};
            utterance.onend = () => resolve("ended");
            utterance.onerror = (event) => {{
                if (event.error === "interrupted" || event.error === "canceled") {{
                    resolve("cancelled");
                }} else {{
                    resolve("speech error: " + event.error);
                }}
            }};
            window.speechSynthesis.speak(utterance);
        }});"#,
        text = request.text,
        lang = request.lang,
        rate = request.rate,
        pitch = request.pitch,
        volume = request.volume,
    )
}

/// Speak through the webview, or hand the request to `silent` when muted.
pub(crate) async fn play(
    silent: Option<&SilentSpeech>,
    request: &SpeechRequest,
) -> Result<SpeechEvent, SpeechError> {
    match silent {
        Some(silent) => {
            debug!(text = %request.text, "speech muted");
            silent.speak(request).await
        }
        None => WebSpeech.speak(request).await,
    }
}

/// A small "listen" button next to Malayalam text.
#[component]
pub fn SpeakButton(text: String) -> Element {
    let ctx = use_context::<AppContext>();
    let rate = ctx.speech_rate();
    let silent = ctx.silent_speech();
    let mut speaking = use_signal(|| false);

    let on_click = move |_| {
        let request = match SpeechRequest::malayalam(&text, rate) {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "nothing to speak");
                return;
            }
        };
        speaking.set(true);
        let silent = silent.clone();
        spawn(async move {
            match play(silent.as_deref(), &request).await {
                Ok(event) => debug!(?event, "speech finished"),
                Err(err) => warn!(error = %err, "speech failed"),
            }
            speaking.set(false);
        });
    };

    let class = if speaking() {
        "audio-button speaking"
    } else {
        "audio-button"
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            title: "Listen ({rate})",
            onclick: on_click,
            if speaking() { "🔊" } else { "🔈" }
        }
    }
}
