use async_trait::async_trait;
use learn_core::model::{ProgressRecord, UserId};
use storage::repository::{ProgressRepository, StorageError};
use tracing::debug;

use super::{SupabaseClient, send};
use crate::error::SupabaseError;

const TABLE: &str = "/rest/v1/user_progress";
const COLUMNS: &str = "user_id,lesson_id,score,completed,updated_at";

/// `user_progress` rows on the hosted backend, keyed by `(user_id, lesson_id)`.
#[derive(Clone)]
pub struct SupabaseProgressRepository {
    client: SupabaseClient,
}

impl SupabaseProgressRepository {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgressRepository for SupabaseProgressRepository {
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        send(
            self.client
                .post(&format!("{TABLE}?on_conflict=user_id,lesson_id"))
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&[record]),
        )
        .await?;
        debug!(lesson_id = %record.lesson_id, "progress upserted remotely");
        Ok(())
    }

    async fn list_progress(&self, user: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let path = format!("{TABLE}?user_id=eq.{user}&select={COLUMNS}&order=lesson_id.asc");
        let response = send(self.client.get(&path)).await?;
        let rows: Vec<ProgressRecord> = response.json().await.map_err(SupabaseError::from)?;
        Ok(rows)
    }
}
