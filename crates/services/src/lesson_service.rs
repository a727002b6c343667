use std::sync::Arc;

use chrono::NaiveDate;
use learn_core::model::{DayNumber, Lesson, LessonId, Module, ProgressRecord, Question};
use learn_core::{Catalog, QuizSession, is_day_completed, is_day_unlocked, is_lesson_completed};
use rand::rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::LessonServiceError;

/// A day lesson as shown on the day picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub day: DayNumber,
    pub lesson_id: LessonId,
    pub title: String,
    pub description: String,
    pub item_count: usize,
    pub unlocked: bool,
    pub completed: bool,
}

/// A non-day lesson as shown in a module listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub lesson_id: LessonId,
    pub title: String,
    pub description: String,
    pub item_count: usize,
    pub question_count: usize,
    pub completed: bool,
}

/// Read access to lesson content and quiz construction.
#[derive(Clone)]
pub struct LessonService {
    catalog: Arc<Catalog>,
    shuffle_questions: bool,
}

impl LessonService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            shuffle_questions: false,
        }
    }

    /// Present quiz questions in random order. Options keep their order.
    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch a lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for unknown ids.
    pub fn lesson(&self, id: &LessonId) -> Result<&Lesson, LessonServiceError> {
        self.catalog
            .lesson(id)
            .ok_or_else(|| LessonServiceError::NotFound(id.clone()))
    }

    /// Lesson following `id` in the daily course, if `id` is a day lesson.
    #[must_use]
    pub fn next_day_lesson(&self, id: &LessonId) -> Option<&Lesson> {
        let next = id.as_day()?.next()?;
        self.catalog.day_lesson(next)
    }

    /// Check that `id` may be opened given the learner's records.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for unknown ids and
    /// `LessonServiceError::Locked` for a day whose predecessor is not completed.
    pub fn ensure_accessible(
        &self,
        records: &[ProgressRecord],
        id: &LessonId,
    ) -> Result<(), LessonServiceError> {
        let lesson = self.lesson(id)?;
        match lesson.day {
            Some(day) if !is_day_unlocked(records, day) => {
                debug!(lesson_id = %id, "lesson is locked");
                Err(LessonServiceError::Locked { day })
            }
            _ => Ok(()),
        }
    }

    /// Build a fresh quiz over the lesson's questions.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for unknown ids and
    /// `LessonServiceError::Quiz` when the lesson has no questions.
    pub fn start_quiz(&self, id: &LessonId) -> Result<QuizSession, LessonServiceError> {
        let lesson = self.lesson(id)?;
        let questions = self.arrange(lesson.questions.clone());
        debug!(lesson_id = %id, questions = questions.len(), "starting quiz");
        Ok(QuizSession::new(questions)?)
    }

    /// Day cards in day order with lock and completion state.
    #[must_use]
    pub fn days(&self, records: &[ProgressRecord]) -> Vec<DayCard> {
        self.catalog
            .days()
            .into_iter()
            .filter_map(|lesson| {
                let day = lesson.day?;
                Some(DayCard {
                    day,
                    lesson_id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    description: lesson.description.clone(),
                    item_count: lesson.item_count(),
                    unlocked: is_day_unlocked(records, day),
                    completed: is_day_completed(records, day),
                })
            })
            .collect()
    }

    /// Lesson cards of a module with completion state.
    #[must_use]
    pub fn module_lessons(&self, module: Module, records: &[ProgressRecord]) -> Vec<LessonCard> {
        self.catalog
            .module(module)
            .into_iter()
            .map(|lesson| LessonCard {
                lesson_id: lesson.id.clone(),
                title: lesson.title.clone(),
                description: lesson.description.clone(),
                item_count: lesson.item_count(),
                question_count: lesson.questions.len(),
                completed: is_lesson_completed(records, &lesson.id),
            })
            .collect()
    }

    #[must_use]
    pub fn daily_question(&self, date: NaiveDate) -> Option<&Question> {
        self.catalog.daily_question(date)
    }

    /// Single-question quiz for the question of the day.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NoDailyQuestion` when the pool is empty.
    pub fn daily_quiz(&self, date: NaiveDate) -> Result<QuizSession, LessonServiceError> {
        let question = self
            .daily_question(date)
            .ok_or(LessonServiceError::NoDailyQuestion)?;
        Ok(QuizSession::new(vec![question.clone()])?)
    }

    fn arrange(&self, mut questions: Vec<Question>) -> Vec<Question> {
        if self.shuffle_questions {
            let mut rng = rng();
            questions.as_mut_slice().shuffle(&mut rng);
        }
        questions
    }
}
