use learn_core::model::{ProgressRecord, UserId};

use super::SqliteRepository;
use super::mapping::{conn, map_progress_row, score_to_i64};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_progress (user_id, lesson_id, score, completed, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, lesson_id) DO UPDATE SET
                score = excluded.score,
                completed = excluded.completed,
                updated_at = excluded.updated_at
            ",
        )
        .bind(record.user_id.to_string())
        .bind(record.lesson_id.as_str())
        .bind(score_to_i64(record.score))
        .bind(i64::from(record.completed))
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn list_progress(&self, user: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, lesson_id, score, completed, updated_at
            FROM user_progress
            WHERE user_id = ?1
            ORDER BY lesson_id ASC
            ",
        )
        .bind(user.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_progress_row).collect()
    }
}
