#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod config;
pub mod error;
pub mod lesson_service;
pub mod progress_service;
pub mod speech;
pub mod supabase;

pub use learn_core::Clock;

pub use app_services::AppServices;
pub use auth::{
    AuthProvider, AuthService, LocalProfileAuth, MIN_PASSWORD_LEN, SignInRequest, SignUpOutcome,
    SignUpRequest,
};
pub use config::{BackendConfig, DEFAULT_DB_URL, SupabaseConfig, normalize_sqlite_url};
pub use error::{
    AppServicesError, AuthError, ConfigError, LessonServiceError, ProgressServiceError,
    SpeechError, SupabaseError,
};
pub use lesson_service::{DayCard, LessonCard, LessonService};
pub use progress_service::{ModuleProgress, ProgressOverview, ProgressService};
pub use speech::{
    MALAYALAM_LANG, SilentSpeech, SpeechEvent, SpeechRate, SpeechRequest, SpeechSynthesizer,
};
pub use supabase::{SupabaseAuth, SupabaseClient, SupabaseProgressRepository};
