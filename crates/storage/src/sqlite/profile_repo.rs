use super::SqliteRepository;
use super::mapping::{conn, map_profile_row};
use crate::repository::{
    NewProfile, ProfileRecord, ProfileRepository, StorageError, normalize_email,
};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn insert_profile(&self, profile: &NewProfile) -> Result<ProfileRecord, StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, email, full_name, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(profile.id.to_string())
        .bind(profile.email.as_str())
        .bind(profile.full_name.as_deref())
        .bind(profile.password_hash.as_str())
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::Conflict
            } else {
                conn(e)
            }
        })?;

        Ok(profile.clone().into_record())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ProfileRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, email, full_name, password_hash, created_at
            FROM profiles WHERE email = ?1
            ",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_profile_row).transpose()
    }
}
