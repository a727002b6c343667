use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{DayNumber, LessonId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson {id} is a day lesson but carries day {day:?}")]
    DayMismatch { id: LessonId, day: Option<DayNumber> },
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// Top-level grouping of lessons in navigation and progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Days,
    Basics,
    Tenses,
    Conversations,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::Days,
        Module::Basics,
        Module::Tenses,
        Module::Conversations,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Module::Days => "Daily Lessons",
            Module::Basics => "Basics",
            Module::Tenses => "Tenses",
            Module::Conversations => "Conversations",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// A single word, letter or phrase with its pronunciation and meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonItem {
    pub id: String,
    pub malayalam: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSection {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<LessonItem>,
}

/// One page of learning content together with the quiz gating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub module: Module,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<DayNumber>,
    #[serde(default)]
    pub sections: Vec<LessonSection>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Lesson {
    /// Checks the invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` for a blank title and
    /// `LessonError::DayMismatch` when a `day-N` id and `day` disagree.
    pub fn validate(&self) -> Result<(), LessonError> {
        if self.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if self.id.as_day() != self.day {
            return Err(LessonError::DayMismatch {
                id: self.id.clone(),
                day: self.day,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.questions.is_empty()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Heading used on lesson pages, e.g. `Day 1: Introduction to Malayalam`.
    #[must_use]
    pub fn heading(&self) -> String {
        match self.day {
            Some(day) => format!("Day {day}: {}", self.title),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, day: Option<u8>) -> Lesson {
        Lesson {
            id: LessonId::new(id).unwrap(),
            title: "Title".into(),
            description: String::new(),
            module: Module::Days,
            day: day.map(|d| DayNumber::new(d).unwrap()),
            sections: Vec::new(),
            questions: Vec::new(),
        }
    }

    #[test]
    fn day_lessons_must_agree_with_their_id() {
        assert!(lesson("day-2", Some(2)).validate().is_ok());
        assert!(lesson("day-2", Some(3)).validate().is_err());
        assert!(lesson("day-2", None).validate().is_err());
        assert!(lesson("alphabets", None).validate().is_ok());
    }

    #[test]
    fn heading_includes_day() {
        assert_eq!(lesson("day-4", Some(4)).heading(), "Day 4: Title");
        assert_eq!(lesson("tenses", None).heading(), "Title");
    }
}
