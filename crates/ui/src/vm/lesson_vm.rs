use learn_core::PASS_THRESHOLD;
use learn_core::model::{Lesson, LessonId, LessonItem, Module};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonItemVm {
    pub id: String,
    pub malayalam: String,
    pub transliteration: String,
    pub english: String,
    pub category: Option<String>,
}

impl From<&LessonItem> for LessonItemVm {
    fn from(item: &LessonItem) -> Self {
        Self {
            id: item.id.clone(),
            malayalam: item.malayalam.clone(),
            transliteration: item.transliteration.clone(),
            english: item.english.clone(),
            category: item.category.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonSectionVm {
    pub title: String,
    pub description: String,
    pub items: Vec<LessonItemVm>,
}

/// A lesson page before the quiz starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub id: LessonId,
    pub heading: String,
    pub description: String,
    pub module: Module,
    pub sections: Vec<LessonSectionVm>,
    pub quiz_label: Option<String>,
    /// Shown under the quiz button of a day lesson.
    pub unlock_hint: Option<String>,
}

/// `next_day` is the day lesson that follows `lesson` in the catalog, if any.
#[must_use]
pub fn map_lesson(lesson: &Lesson, next_day: Option<&Lesson>) -> LessonVm {
    let sections = lesson
        .sections
        .iter()
        .map(|section| LessonSectionVm {
            title: section.title.clone(),
            description: section.description.clone(),
            items: section.items.iter().map(LessonItemVm::from).collect(),
        })
        .collect();
    let quiz_label = lesson
        .has_quiz()
        .then(|| format!("Take the Test ({} questions)", lesson.questions.len()));
    let unlock_hint = next_day
        .and_then(|next| next.day)
        .map(|next| format!("Score {PASS_THRESHOLD}% or more to unlock Day {next}!"));

    LessonVm {
        id: lesson.id.clone(),
        heading: lesson.heading(),
        description: lesson.description.clone(),
        module: lesson.module,
        sections,
        quiz_label,
        unlock_hint,
    }
}
