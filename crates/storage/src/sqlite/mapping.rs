use learn_core::model::{LessonId, ProgressRecord, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{ProfileRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn user_id_from_str(raw: &str) -> Result<UserId, StorageError> {
    raw.parse::<UserId>().map_err(ser)
}

pub(crate) fn score_to_i64(score: u32) -> i64 {
    i64::from(score)
}

fn score_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid score: {v}")))
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let user_id = user_id_from_str(&row.try_get::<String, _>("user_id").map_err(ser)?)?;
    let lesson_id = LessonId::new(row.try_get::<String, _>("lesson_id").map_err(ser)?).map_err(ser)?;
    let score = score_from_i64(row.try_get::<i64, _>("score").map_err(ser)?)?;
    let completed = row.try_get::<i64, _>("completed").map_err(ser)? != 0;

    Ok(ProgressRecord::new(
        user_id,
        lesson_id,
        score,
        completed,
        row.try_get("updated_at").map_err(ser)?,
    ))
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<ProfileRecord, StorageError> {
    Ok(ProfileRecord {
        id: user_id_from_str(&row.try_get::<String, _>("id").map_err(ser)?)?,
        email: row.try_get("email").map_err(ser)?,
        full_name: row.try_get("full_name").map_err(ser)?,
        password_hash: row.try_get("password_hash").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}
