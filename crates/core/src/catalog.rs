//! Built-in lesson content.
//!
//! Lessons are JSON documents compiled into the binary. The catalog validates
//! them once at load time so the rest of the app can index freely.

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{DayNumber, Lesson, LessonError, LessonId, Module, Question};

const BUILTIN_LESSONS: &[(&str, &str)] = &[
    ("day-1", include_str!("../content/day-1.json")),
    ("day-2", include_str!("../content/day-2.json")),
    ("day-3", include_str!("../content/day-3.json")),
    ("day-4", include_str!("../content/day-4.json")),
    ("day-5", include_str!("../content/day-5.json")),
    ("alphabets", include_str!("../content/alphabets.json")),
    ("greetings", include_str!("../content/greetings.json")),
    ("pronouns", include_str!("../content/pronouns.json")),
    ("tenses", include_str!("../content/tenses.json")),
    (
        "casual-conversations",
        include_str!("../content/casual-conversations.json"),
    ),
];

const BUILTIN_DAILY: &str = include_str!("../content/daily.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to parse lesson document {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid lesson {id}: {source}")]
    InvalidLesson {
        id: LessonId,
        #[source]
        source: LessonError,
    },

    #[error("duplicate lesson id {0}")]
    DuplicateLesson(LessonId),

    #[error("day {0} is assigned to more than one lesson")]
    DuplicateDay(u8),

    #[error("day lessons must be numbered 1..=N without gaps, missing day {0}")]
    MissingDay(u8),
}

/// All lessons and the daily question pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    lessons: Vec<Lesson>,
    daily: Vec<Question>,
}

impl Catalog {
    /// Loads the content shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an embedded document is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_documents(BUILTIN_LESSONS, BUILTIN_DAILY)
    }

    /// Parses `(name, json)` lesson documents and a JSON array of daily questions.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for unparsable or invalid documents, duplicate
    /// ids, and gaps in the day numbering.
    pub fn from_documents(documents: &[(&str, &str)], daily: &str) -> Result<Self, CatalogError> {
        let mut lessons = Vec::with_capacity(documents.len());
        for (name, json) in documents {
            let lesson: Lesson = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                name: (*name).to_owned(),
                source,
            })?;
            lessons.push(lesson);
        }
        let daily: Vec<Question> =
            serde_json::from_str(daily).map_err(|source| CatalogError::Parse {
                name: "daily".to_owned(),
                source,
            })?;

        Self::new(lessons, daily)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` for invalid lessons, duplicate ids or days, and
    /// gaps in the day numbering.
    pub fn new(lessons: Vec<Lesson>, daily: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for lesson in &lessons {
            lesson
                .validate()
                .map_err(|source| CatalogError::InvalidLesson {
                    id: lesson.id.clone(),
                    source,
                })?;
            if !seen.insert(lesson.id.clone()) {
                return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
            }
        }

        let mut days = HashSet::new();
        for day in lessons.iter().filter_map(|l| l.day.map(|d| d.value())) {
            if !days.insert(day) {
                return Err(CatalogError::DuplicateDay(day));
            }
        }
        let day_count = u8::try_from(days.len()).unwrap_or(u8::MAX);
        if let Some(missing) = (1..=day_count).find(|d| !days.contains(d)) {
            return Err(CatalogError::MissingDay(missing));
        }

        Ok(Self { lessons, daily })
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn day_lesson(&self, day: DayNumber) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.day == Some(day))
    }

    /// Day lessons ordered by day number.
    #[must_use]
    pub fn days(&self) -> Vec<&Lesson> {
        let mut days: Vec<&Lesson> = self.lessons.iter().filter(|l| l.day.is_some()).collect();
        days.sort_by_key(|l| l.day);
        days
    }

    #[must_use]
    pub fn day_count(&self) -> u8 {
        let count = self.lessons.iter().filter(|l| l.day.is_some()).count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    /// Lessons of one module in catalog order (days by day number).
    #[must_use]
    pub fn module(&self, module: Module) -> Vec<&Lesson> {
        if module == Module::Days {
            return self.days();
        }
        self.lessons.iter().filter(|l| l.module == module).collect()
    }

    #[must_use]
    pub fn module_lesson_ids(&self, module: Module) -> Vec<LessonId> {
        self.module(module).into_iter().map(|l| l.id.clone()).collect()
    }

    /// Number of lessons that end in a quiz, i.e. that can be completed.
    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        let count = self.lessons.iter().filter(|l| l.has_quiz()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn daily_pool(&self) -> &[Question] {
        &self.daily
    }

    /// The question of the day. Stable for a calendar date, `None` for an empty pool.
    #[must_use]
    pub fn daily_question(&self, date: NaiveDate) -> Option<&Question> {
        if self.daily.is_empty() {
            return None;
        }
        let index = daily_seed(date) % self.daily.len();
        self.daily.get(index)
    }
}

/// Sum of the characters of a date rendered like `Sat Oct 17 2026`.
fn daily_seed(date: NaiveDate) -> usize {
    date.format("%a %b %d %Y")
        .to_string()
        .chars()
        .map(|c| c as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.day_count(), 5);
        assert_eq!(catalog.total_lessons(), 10);
        assert!(!catalog.daily_pool().is_empty());
        for lesson in catalog.lessons() {
            assert!(lesson.has_quiz(), "{} has no quiz", lesson.id);
            assert!(lesson.item_count() > 0, "{} has no items", lesson.id);
        }
    }

    #[test]
    fn days_are_ordered() {
        let catalog = Catalog::builtin().unwrap();
        let days: Vec<u8> = catalog
            .days()
            .iter()
            .filter_map(|l| l.day.map(|d| d.value()))
            .collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn basics_module_lists_three_lessons() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<String> = catalog
            .module_lesson_ids(Module::Basics)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids, ["alphabets", "greetings", "pronouns"]);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        let id = LessonId::new("tenses").unwrap();
        assert_eq!(catalog.lesson(&id).unwrap().module, Module::Tenses);
        assert!(catalog.lesson(&LessonId::new("day-9").unwrap()).is_none());
    }

    #[test]
    fn daily_question_is_stable_per_date() {
        let catalog = Catalog::builtin().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let first = catalog.daily_question(date).unwrap();
        let again = catalog.daily_question(date).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn daily_seed_sums_date_string() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expected: usize = "Fri Jan 05 2024".bytes().map(usize::from).sum();
        assert_eq!(daily_seed(date), expected);
    }

    #[test]
    fn rejects_gaps_in_days() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.lessons.retain(|l| l.id.as_str() != "day-3");
        let err = Catalog::new(catalog.lessons, Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingDay(3)));
    }

    #[test]
    fn rejects_duplicates() {
        let catalog = Catalog::builtin().unwrap();
        let mut lessons = catalog.lessons.clone();
        lessons.push(catalog.lessons[0].clone());
        let err = Catalog::new(lessons, Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLesson(_)));
    }

    #[test]
    fn rejects_two_lessons_on_one_day() {
        let catalog = Catalog::builtin().unwrap();
        let mut lessons = catalog.lessons.clone();
        let mut twin = catalog.lessons[1].clone();
        twin.id = LessonId::new("day-02").unwrap();
        assert_eq!(twin.id.as_day(), twin.day);
        lessons.push(twin);
        let err = Catalog::new(lessons, Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateDay(2)));
    }

    #[test]
    fn malformed_document_is_reported_by_name() {
        let err = Catalog::from_documents(&[("broken", "{")], "[]").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
