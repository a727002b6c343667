use std::sync::Arc;

use dioxus::prelude::*;
use learn_core::model::Identity;
use services::{AuthService, Clock, LessonService, ProgressService, SilentSpeech, SpeechRate};

pub trait UiApp: Send + Sync {
    fn lessons(&self) -> Arc<LessonService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn auth(&self) -> Arc<AuthService>;
    fn speech_rate(&self) -> SpeechRate;
    fn muted(&self) -> bool;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    speech_rate: SpeechRate,
    /// Set when muted; pronunciation requests land here instead of the speech engine.
    silent_speech: Option<Arc<SilentSpeech>>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lessons: app.lessons(),
            progress: app.progress(),
            auth: app.auth(),
            speech_rate: app.speech_rate(),
            silent_speech: app.muted().then(|| Arc::new(SilentSpeech::new())),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn speech_rate(&self) -> SpeechRate {
        self.speech_rate
    }

    #[must_use]
    pub fn silent_speech(&self) -> Option<Arc<SilentSpeech>> {
        self.silent_speech.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in learner, shared by every view. `None` while signed out.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthState(Signal<Option<Identity>>);

impl AuthState {
    /// Install the auth state for the component tree. Call once, at the root.
    pub fn provide(initial: Option<Identity>) -> Self {
        use_context_provider(|| AuthState(Signal::new(initial)))
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.0.read().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.0.read().is_some()
    }

    pub fn set(&mut self, identity: Option<Identity>) {
        self.0.set(identity);
    }
}

#[must_use]
pub fn use_auth_state() -> AuthState {
    use_context::<AuthState>()
}
