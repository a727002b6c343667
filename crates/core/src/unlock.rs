//! Sequential unlocking of the daily course.
//!
//! Day 1 is always open; day N opens once day N-1 has a completed record.
//! All functions here are pure predicates over already-loaded records.

use serde::{Deserialize, Serialize};

use crate::model::{DayNumber, LessonId, ProgressRecord};
use crate::model::progress::{count_u32, percent_or_zero};

/// `true` when any record for `lesson` is marked completed.
#[must_use]
pub fn is_lesson_completed(records: &[ProgressRecord], lesson: &LessonId) -> bool {
    records
        .iter()
        .any(|r| r.completed && &r.lesson_id == lesson)
}

#[must_use]
pub fn is_day_completed(records: &[ProgressRecord], day: DayNumber) -> bool {
    is_lesson_completed(records, &LessonId::day(day))
}

/// Whether the lesson for `day` may be opened.
#[must_use]
pub fn is_day_unlocked(records: &[ProgressRecord], day: DayNumber) -> bool {
    match day.previous() {
        None => true,
        Some(previous) => is_day_completed(records, previous),
    }
}

/// Summary of a learner's position in a course of `total_days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub total_days: u8,
    pub completed_days: u8,
    pub percentage: u8,
    /// First day not yet completed, or the last day once all are done.
    pub current_day: DayNumber,
}

impl DayProgress {
    #[must_use]
    pub fn from_records(records: &[ProgressRecord], total_days: u8) -> Self {
        let days: Vec<DayNumber> = (1..=total_days)
            .filter_map(|d| DayNumber::new(d).ok())
            .collect();

        let completed = days
            .iter()
            .filter(|day| is_day_completed(records, **day))
            .count();
        let current_day = days
            .iter()
            .copied()
            .find(|day| !is_day_completed(records, *day))
            .or_else(|| days.last().copied())
            .unwrap_or(DayNumber::FIRST);

        let completed_days = u8::try_from(completed).unwrap_or(total_days);
        Self {
            total_days,
            completed_days,
            percentage: percent_or_zero(count_u32(completed), u32::from(total_days)),
            current_day,
        }
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.total_days > 0 && self.completed_days == self.total_days
    }
}
