use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{LessonId, UserId};
use crate::quiz::{QuizResult, rounded_percentage};

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Stored outcome of the latest quiz attempt for one lesson.
///
/// At most one record exists per `(user_id, lesson_id)`; saving again
/// overwrites the previous attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    /// Number of correctly answered questions.
    pub score: u32,
    /// `true` when the attempt reached the pass threshold.
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(
        user_id: UserId,
        lesson_id: LessonId,
        score: u32,
        completed: bool,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            lesson_id,
            score,
            completed,
            updated_at,
        }
    }

    /// Record for a finished quiz. `completed` is derived from the pass threshold.
    #[must_use]
    pub fn from_result(
        user_id: UserId,
        lesson_id: LessonId,
        result: &QuizResult,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(user_id, lesson_id, result.score(), result.is_passing(), now)
    }
}

//
// ─── AGGREGATES ────────────────────────────────────────────────────────────────
//

/// Share of all catalog lessons completed by a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverallProgress {
    pub total: u32,
    pub completed: u32,
    pub percentage: u8,
}

impl OverallProgress {
    /// Counts completed records against `total_lessons`. A zero total yields 0%.
    #[must_use]
    pub fn from_records(records: &[ProgressRecord], total_lessons: u32) -> Self {
        let completed = count_u32(records.iter().filter(|r| r.completed).count());
        let completed = completed.min(total_lessons);
        Self {
            total: total_lessons,
            completed,
            percentage: percent_or_zero(completed, total_lessons),
        }
    }
}

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressStats {
    /// One per lesson with a stored attempt.
    pub tests_taken: u32,
    pub lessons_completed: u32,
}

impl ProgressStats {
    #[must_use]
    pub fn from_records(records: &[ProgressRecord]) -> Self {
        Self {
            tests_taken: count_u32(records.len()),
            lessons_completed: count_u32(records.iter().filter(|r| r.completed).count()),
        }
    }
}

/// Rounded share of `lessons` that have a completed record. An empty set yields 0.
#[must_use]
pub fn module_progress(records: &[ProgressRecord], lessons: &[LessonId]) -> u8 {
    let done = lessons
        .iter()
        .filter(|lesson| crate::unlock::is_lesson_completed(records, lesson))
        .count();
    percent_or_zero(count_u32(done), count_u32(lessons.len()))
}

pub(crate) fn percent_or_zero(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        0
    } else {
        rounded_percentage(part.min(whole), whole)
    }
}

pub(crate) fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn record(lesson: &str, completed: bool) -> ProgressRecord {
        ProgressRecord::new(
            UserId::random(),
            LessonId::new(lesson).unwrap(),
            3,
            completed,
            fixed_now(),
        )
    }

    #[test]
    fn from_result_uses_pass_threshold() {
        let user = UserId::random();
        let lesson = LessonId::new("day-1").unwrap();

        let passed = QuizResult::new(3, 5).unwrap();
        let rec = ProgressRecord::from_result(user, lesson.clone(), &passed, fixed_now());
        assert!(rec.completed);
        assert_eq!(rec.score, 3);

        let failed = QuizResult::new(2, 5).unwrap();
        let rec = ProgressRecord::from_result(user, lesson, &failed, fixed_now());
        assert!(!rec.completed);
    }

    #[test]
    fn overall_progress_is_zero_safe() {
        let overall = OverallProgress::from_records(&[record("day-1", true)], 0);
        assert_eq!(overall.percentage, 0);
        assert_eq!(overall.completed, 0);
    }

    #[test]
    fn overall_progress_counts_completed_only() {
        let records = [
            record("day-1", true),
            record("day-2", false),
            record("alphabets", true),
        ];
        let overall = OverallProgress::from_records(&records, 20);
        assert_eq!(overall.completed, 2);
        assert_eq!(overall.percentage, 10);

        let stats = ProgressStats::from_records(&records);
        assert_eq!(stats.tests_taken, 3);
        assert_eq!(stats.lessons_completed, 2);
    }

    #[test]
    fn module_progress_averages_lessons() {
        let basics: Vec<LessonId> = ["alphabets", "greetings", "pronouns"]
            .into_iter()
            .map(|s| LessonId::new(s).unwrap())
            .collect();
        let records = [record("alphabets", true), record("pronouns", false)];
        assert_eq!(module_progress(&records, &basics), 33);
        assert_eq!(module_progress(&records, &[]), 0);
    }
}
