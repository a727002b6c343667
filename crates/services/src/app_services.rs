use std::sync::Arc;

use learn_core::Catalog;
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::auth::{AuthProvider, AuthService, LocalProfileAuth};
use crate::config::BackendConfig;
use crate::error::AppServicesError;
use crate::lesson_service::LessonService;
use crate::progress_service::ProgressService;
use crate::speech::SpeechRate;
use crate::supabase::{SupabaseAuth, SupabaseClient, SupabaseProgressRepository};

/// Assembles app-facing services over the configured backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
    speech_rate: SpeechRate,
    muted: bool,
    remote: bool,
}

impl AppServices {
    /// Build services for the configured backend.
    ///
    /// The local database is only opened when no hosted backend is configured.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the lesson content is invalid, the
    /// database cannot be opened, or the HTTP client cannot be built.
    pub async fn build(config: &BackendConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);

        let (storage, provider): (Storage, Arc<dyn AuthProvider>) = match &config.supabase {
            Some(remote) => {
                let client = SupabaseClient::new(remote)?;
                let progress = Arc::new(SupabaseProgressRepository::new(client.clone()));
                info!(url = client.base_url(), "using hosted backend");
                let provider: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(client));
                (Storage::in_memory().with_progress(progress), provider)
            }
            None => {
                let storage = Storage::sqlite(&config.db_url).await?;
                info!(db_url = %config.db_url, "using local database");
                let provider: Arc<dyn AuthProvider> =
                    Arc::new(LocalProfileAuth::new(clock, Arc::clone(&storage.profiles)));
                (storage, provider)
            }
        };

        Ok(Self::assemble(catalog, &storage, provider, clock, config))
    }

    /// Services over in-memory storage with offline profiles.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Content` if the lesson content is invalid.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let storage = Storage::in_memory();
        let provider = Arc::new(LocalProfileAuth::new(clock, Arc::clone(&storage.profiles)));
        let config = BackendConfig {
            db_url: "sqlite::memory:".into(),
            supabase: None,
            speech_rate: SpeechRate::default(),
            shuffle_questions: false,
            muted: false,
        };
        Ok(Self::assemble(catalog, &storage, provider, clock, &config))
    }

    fn assemble(
        catalog: Arc<Catalog>,
        storage: &Storage,
        provider: Arc<dyn AuthProvider>,
        clock: Clock,
        config: &BackendConfig,
    ) -> Self {
        let lessons = Arc::new(
            LessonService::new(Arc::clone(&catalog))
                .with_shuffle_questions(config.shuffle_questions),
        );
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.progress),
            Arc::clone(&catalog),
        ));
        Self {
            catalog,
            lessons,
            progress,
            auth: Arc::new(AuthService::new(provider)),
            speech_rate: config.speech_rate,
            muted: config.muted,
            remote: config.uses_remote_backend(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
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

    /// `true` when pronunciation should not be played aloud.
    #[must_use]
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// `true` when accounts and progress live on the hosted backend.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote
    }
}
