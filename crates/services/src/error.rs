//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::{DayNumber, LessonId};
use learn_core::{CatalogError, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson {0} does not exist")]
    NotFound(LessonId),
    #[error("complete Day {} to unlock Day {day}", previous_day(.day))]
    Locked { day: DayNumber },
    #[error("no daily question is available")]
    NoDailyQuestion,
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

fn previous_day(day: &DayNumber) -> u8 {
    day.previous().map_or(0, |d| d.value())
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by authentication providers.
///
/// Display strings are shown to the learner as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Password reset is not available for offline profiles")]
    ResetUnsupported,
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Could not reach the server. Please try again.")]
    Http(#[from] reqwest::Error),
    #[error("Something went wrong: {0}")]
    Storage(#[from] StorageError),
}

/// Errors emitted by the hosted backend client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SupabaseError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl From<SupabaseError> for AuthError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Http(e) => AuthError::Http(e),
            SupabaseError::Status { status, message } => AuthError::Rejected { status, message },
        }
    }
}

impl From<SupabaseError> for StorageError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Http(e) if e.is_decode() => StorageError::Serialization(e.to_string()),
            other => StorageError::Connection(other.to_string()),
        }
    }
}

/// Errors emitted by speech synthesizers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech synthesis is not supported on this device")]
    Unsupported,
    #[error("nothing to speak")]
    EmptyText,
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// Errors emitted while resolving configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("database url cannot be empty")]
    EmptyDbUrl,
    #[error("invalid speech rate {0:?}, expected 0.5, 0.7 or 1.0")]
    InvalidSpeechRate(String),
    #[error("both a Supabase url and an anon key are required, got only the {0}")]
    PartialSupabase(&'static str),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Content(#[from] learn_core::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<CatalogError> for AppServicesError {
    fn from(err: CatalogError) -> Self {
        AppServicesError::Content(err.into())
    }
}
