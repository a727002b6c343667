use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::speech::SpeechRate;

pub const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";

/// Connection details of the hosted auth + row storage backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Which backend the app talks to, plus learner-facing defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    /// Local database holding offline profiles and progress.
    pub db_url: String,
    /// When set, auth and progress go to the hosted backend instead.
    pub supabase: Option<SupabaseConfig>,
    pub speech_rate: SpeechRate,
    pub shuffle_questions: bool,
    /// Pronunciation requests are recorded but not played.
    pub muted: bool,
}

impl BackendConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` for an empty database url or when only one of
    /// the Supabase url and anon key is given.
    pub fn new(
        db_url: &str,
        supabase_url: Option<String>,
        supabase_anon_key: Option<String>,
        speech_rate: SpeechRate,
    ) -> Result<Self, ConfigError> {
        if db_url.trim().is_empty() {
            return Err(ConfigError::EmptyDbUrl);
        }
        let present = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        let supabase = match (present(supabase_url), present(supabase_anon_key)) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_owned(),
                anon_key,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::PartialSupabase("url")),
            (None, Some(_)) => return Err(ConfigError::PartialSupabase("anon key")),
        };

        Ok(Self {
            db_url: normalize_sqlite_url(db_url),
            supabase,
            speech_rate,
            shuffle_questions: false,
            muted: false,
        })
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Reads `LEARN_DB_URL`, `LEARN_SUPABASE_URL`, `LEARN_SUPABASE_ANON_KEY`,
    /// `LEARN_SPEECH_RATE` and `LEARN_MUTE` (`1` or `true`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for invalid values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db_url = env::var("LEARN_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.into());
        let speech_rate = match env::var("LEARN_SPEECH_RATE") {
            Ok(raw) => raw.parse()?,
            Err(_) => SpeechRate::default(),
        };
        let muted = env::var("LEARN_MUTE").is_ok_and(|raw| is_truthy(&raw));
        Ok(Self::new(
            &db_url,
            env::var("LEARN_SUPABASE_URL").ok(),
            env::var("LEARN_SUPABASE_ANON_KEY").ok(),
            speech_rate,
        )?
        .with_muted(muted))
    }

    #[must_use]
    pub fn uses_remote_backend(&self) -> bool {
        self.supabase.is_some()
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Turns `dev.sqlite3`, `sqlite:dev.sqlite3` or a relative `sqlite://` path
/// into an absolute `sqlite://` url. `sqlite::memory:` and shared in-memory
/// urls are returned unchanged.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite:file:") {
        return trimmed.to_owned();
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_backend_without_supabase() {
        let cfg = BackendConfig::new("sqlite::memory:", None, None, SpeechRate::Slow).unwrap();
        assert!(!cfg.uses_remote_backend());
        assert!(!cfg.muted);
        assert_eq!(cfg.db_url, "sqlite::memory:");
        assert!(cfg.with_muted(true).muted);
    }

    #[test]
    fn mute_flag_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn remote_backend_needs_both_values() {
        let cfg = BackendConfig::new(
            "sqlite::memory:",
            Some("https://demo.supabase.co/".into()),
            Some("anon".into()),
            SpeechRate::Slow,
        )
        .unwrap();
        assert_eq!(
            cfg.supabase,
            Some(SupabaseConfig {
                url: "https://demo.supabase.co".into(),
                anon_key: "anon".into(),
            })
        );

        let err = BackendConfig::new(
            "sqlite::memory:",
            Some("https://demo.supabase.co".into()),
            Some("  ".into()),
            SpeechRate::Slow,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::PartialSupabase("url"));
    }

    #[test]
    fn empty_db_url_is_rejected() {
        let err = BackendConfig::new(" ", None, None, SpeechRate::Slow).unwrap_err();
        assert_eq!(err, ConfigError::EmptyDbUrl);
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/a.db"), "sqlite:///tmp/a.db");
        assert_eq!(normalize_sqlite_url("sqlite:/tmp/a.db"), "sqlite:///tmp/a.db");
        let relative = normalize_sqlite_url("dev.sqlite3");
        assert!(relative.starts_with("sqlite:///"));
        assert!(relative.ends_with("dev.sqlite3"));
        assert_eq!(
            normalize_sqlite_url("sqlite:file:mem?mode=memory&cache=shared"),
            "sqlite:file:mem?mode=memory&cache=shared"
        );
    }
}
