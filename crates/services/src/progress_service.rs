use std::sync::Arc;

use learn_core::model::{
    Identity, LessonId, Module, OverallProgress, ProgressRecord, ProgressStats, module_progress,
};
use learn_core::{Catalog, DayProgress, QuizResult};
use serde::Serialize;
use storage::repository::ProgressRepository;
use tracing::{debug, info};

use crate::Clock;
use crate::error::ProgressServiceError;

/// Completion share of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleProgress {
    pub module: Module,
    pub percentage: u8,
}

/// Everything the dashboard and progress pages show for a learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressOverview {
    pub records: Vec<ProgressRecord>,
    pub days: DayProgress,
    pub overall: OverallProgress,
    pub stats: ProgressStats,
    pub modules: Vec<ModuleProgress>,
}

impl ProgressOverview {
    /// Aggregate already-loaded records against the catalog.
    #[must_use]
    pub fn from_records(catalog: &Catalog, records: Vec<ProgressRecord>) -> Self {
        let days = DayProgress::from_records(&records, catalog.day_count());
        let modules = Module::ALL
            .into_iter()
            .map(|module| ModuleProgress {
                module,
                percentage: match module {
                    Module::Days => days.percentage,
                    _ => module_progress(&records, &catalog.module_lesson_ids(module)),
                },
            })
            .collect();

        Self {
            days,
            overall: OverallProgress::from_records(&records, catalog.total_lessons()),
            stats: ProgressStats::from_records(&records),
            modules,
            records,
        }
    }

    #[must_use]
    pub fn module(&self, module: Module) -> u8 {
        self.modules
            .iter()
            .find(|m| m.module == module)
            .map_or(0, |m| m.percentage)
    }
}

/// Persists quiz outcomes and aggregates progress.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    catalog: Arc<Catalog>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>, catalog: Arc<Catalog>) -> Self {
        Self {
            clock,
            progress,
            catalog,
        }
    }

    /// Store the outcome of a finished quiz for the signed-in learner.
    ///
    /// Anonymous learners get `Ok(None)`: nothing is stored and the quiz
    /// result stays valid for display.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the record cannot be saved.
    pub async fn record_result(
        &self,
        identity: Option<&Identity>,
        lesson: &LessonId,
        result: &QuizResult,
    ) -> Result<Option<ProgressRecord>, ProgressServiceError> {
        let Some(identity) = identity else {
            debug!(lesson_id = %lesson, "anonymous quiz result not persisted");
            return Ok(None);
        };

        let record =
            ProgressRecord::from_result(identity.user_id, lesson.clone(), result, self.clock.now());
        self.progress.save_progress(&record).await?;
        info!(
            user_id = %identity.user_id,
            lesson_id = %lesson,
            score = record.score,
            percentage = result.percentage(),
            completed = record.completed,
            "saved quiz result"
        );
        Ok(Some(record))
    }

    /// All records of the learner; empty when signed out.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if loading fails.
    pub async fn records(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<ProgressRecord>, ProgressServiceError> {
        match identity {
            Some(identity) => Ok(self.progress.list_progress(identity.user_id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Aggregated progress for the dashboard and progress page.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if loading fails.
    pub async fn overview(
        &self,
        identity: Option<&Identity>,
    ) -> Result<ProgressOverview, ProgressServiceError> {
        let records = self.records(identity).await?;
        Ok(ProgressOverview::from_records(&self.catalog, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::model::UserId;
    use learn_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> ProgressService {
        ProgressService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            Arc::new(Catalog::builtin().unwrap()),
        )
    }

    fn learner() -> Identity {
        Identity::new(UserId::random(), "asha@example.com", None)
    }

    fn id(slug: &str) -> LessonId {
        LessonId::new(slug).unwrap()
    }

    #[tokio::test]
    async fn anonymous_results_are_not_persisted() {
        let svc = service();
        let result = QuizResult::new(5, 5).unwrap();
        let saved = svc.record_result(None, &id("day-1"), &result).await.unwrap();
        assert!(saved.is_none());
        assert!(svc.records(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn passing_result_marks_lesson_completed() {
        let svc = service();
        let me = learner();
        let result = QuizResult::new(3, 5).unwrap();
        let saved = svc
            .record_result(Some(&me), &id("day-1"), &result)
            .await
            .unwrap()
            .unwrap();
        assert!(saved.completed);
        assert_eq!(saved.score, 3);

        let overview = svc.overview(Some(&me)).await.unwrap();
        assert_eq!(overview.days.completed_days, 1);
        assert_eq!(overview.days.current_day.value(), 2);
        assert_eq!(overview.stats.tests_taken, 1);
        assert_eq!(overview.module(Module::Days), 20);
    }

    #[tokio::test]
    async fn retake_overwrites_previous_attempt() {
        let svc = service();
        let me = learner();
        svc.record_result(Some(&me), &id("alphabets"), &QuizResult::new(1, 4).unwrap())
            .await
            .unwrap();
        svc.record_result(Some(&me), &id("alphabets"), &QuizResult::new(4, 4).unwrap())
            .await
            .unwrap();

        let records = svc.records(Some(&me)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].completed);

        let overview = svc.overview(Some(&me)).await.unwrap();
        assert_eq!(overview.module(Module::Basics), 33);
        assert_eq!(overview.overall.completed, 1);
        assert_eq!(overview.overall.total, 10);
        assert_eq!(overview.overall.percentage, 10);
    }
}
