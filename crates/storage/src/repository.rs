use async_trait::async_trait;
use chrono::{DateTime, Utc};
use learn_core::model::{Identity, LessonId, ProgressRecord, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("credential error: {0}")]
    Credential(String),
}

//
// ─── PROFILES ──────────────────────────────────────────────────────────────────
//

/// A learner profile kept by the offline backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    /// Argon2 PHC string; `None` for profiles created before passwords were stored.
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Whether `password` matches the stored hash. Profiles without a hash never match.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| crate::credential::verify_password(hash, password))
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.email.clone(), self.full_name.clone())
    }
}

/// Profile to be inserted. The email is normalised to trimmed lowercase and
/// the password is only kept as a salted hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewProfile {
    /// # Errors
    ///
    /// Returns `StorageError::Credential` if the password cannot be hashed.
    pub fn new(
        email: &str,
        full_name: Option<String>,
        password: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            id: UserId::random(),
            email: normalize_email(email),
            full_name: full_name
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty()),
            password_hash: crate::credential::hash_password(password)?,
            created_at,
        })
    }

    #[must_use]
    pub fn into_record(self) -> ProfileRecord {
        ProfileRecord {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            password_hash: Some(self.password_hash),
            created_at: self.created_at,
        }
    }
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Repository contract for quiz progress, one row per `(user, lesson)`.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert or overwrite the record for `(record.user_id, record.lesson_id)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// All records of a user, ordered by lesson id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be loaded.
    async fn list_progress(&self, user: UserId) -> Result<Vec<ProgressRecord>, StorageError>;
}

/// Repository contract for locally stored learner profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Store a new profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_profile(&self, profile: &NewProfile) -> Result<ProfileRecord, StorageError>;

    /// Look a profile up by (normalised) email.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<(UserId, LessonId), ProgressRecord>>>,
    profiles: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert((record.user_id, record.lesson_id.clone()), record.clone());
        Ok(())
    }

    async fn list_progress(&self, user: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut records: Vec<ProgressRecord> = guard
            .values()
            .filter(|r| r.user_id == user)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.lesson_id.cmp(&b.lesson_id));
        Ok(records)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn insert_profile(&self, profile: &NewProfile) -> Result<ProfileRecord, StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.values().any(|p| p.email == profile.email) || guard.contains_key(&profile.id) {
            return Err(StorageError::Conflict);
        }
        let record = profile.clone().into_record();
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError> {
        let email = normalize_email(email);
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().find(|p| p.email == email).cloned())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { progress, profiles }
    }

    /// Replace the progress backend, keeping profiles.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressRepository>) -> Self {
        self.progress = progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::time::fixed_now;

    fn lesson(slug: &str) -> LessonId {
        LessonId::new(slug).unwrap()
    }

    #[tokio::test]
    async fn save_progress_upserts_per_lesson() {
        let repo = InMemoryRepository::new();
        let user = UserId::random();

        repo.save_progress(&ProgressRecord::new(user, lesson("day-1"), 2, false, fixed_now()))
            .await
            .unwrap();
        repo.save_progress(&ProgressRecord::new(user, lesson("day-1"), 4, true, fixed_now()))
            .await
            .unwrap();

        let records = repo.list_progress(user).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 4);
        assert!(records[0].completed);
    }

    #[tokio::test]
    async fn list_progress_is_per_user_and_ordered() {
        let repo = InMemoryRepository::new();
        let (asha, ravi) = (UserId::random(), UserId::random());

        for slug in ["day-2", "alphabets", "day-1"] {
            repo.save_progress(&ProgressRecord::new(asha, lesson(slug), 1, true, fixed_now()))
                .await
                .unwrap();
        }
        repo.save_progress(&ProgressRecord::new(ravi, lesson("day-1"), 1, true, fixed_now()))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .list_progress(asha)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.lesson_id.to_string())
            .collect();
        assert_eq!(ids, ["alphabets", "day-1", "day-2"]);
        let ravi_ids: Vec<LessonId> = repo
            .list_progress(ravi)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.lesson_id)
            .collect();
        assert_eq!(ravi_ids, [lesson("day-1")]);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryRepository::new();
        let first =
            NewProfile::new("Asha@Example.com ", Some("Asha".into()), "secret1", fixed_now()).unwrap();
        let stored = repo.insert_profile(&first).await.unwrap();
        assert_eq!(stored.email, "asha@example.com");

        let again = NewProfile::new("asha@example.com", None, "other1", fixed_now()).unwrap();
        let err = repo.insert_profile(&again).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));

        let found = repo.find_by_email("ASHA@example.com").await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn stored_profile_keeps_only_a_hash() {
        let repo = InMemoryRepository::new();
        let new = NewProfile::new("asha@example.com", None, "secret1", fixed_now()).unwrap();
        let stored = repo.insert_profile(&new).await.unwrap();

        assert_ne!(stored.password_hash.as_deref(), Some("secret1"));
        assert!(stored.verify_password("secret1"));
        assert!(!stored.verify_password("Secret1"));
    }

    #[test]
    fn profile_without_hash_never_verifies() {
        let record = ProfileRecord {
            id: UserId::random(),
            email: "old@example.com".into(),
            full_name: None,
            password_hash: None,
            created_at: fixed_now(),
        };
        assert!(!record.verify_password(""));
    }
}
