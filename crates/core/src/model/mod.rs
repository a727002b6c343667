mod identity;
mod ids;
mod lesson;
pub(crate) mod progress;
mod question;

pub use identity::{FALLBACK_DISPLAY_NAME, Identity};
pub use ids::{DayNumber, LessonId, ParseIdError, UserId};
pub use lesson::{Lesson, LessonError, LessonItem, LessonSection, Module};
pub use progress::{OverallProgress, ProgressRecord, ProgressStats, module_progress};
pub use question::{AnswerOption, Question, QuestionError};
