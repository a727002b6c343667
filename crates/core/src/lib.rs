//! Domain model for the Malayalam lesson app: lesson content, quiz evaluation,
//! progress records and the day unlock policy. No I/O lives here.

pub mod catalog;
pub mod error;
pub mod model;
pub mod quiz;
pub mod time;
pub mod unlock;

pub use catalog::{Catalog, CatalogError};
pub use error::Error;
pub use quiz::{
    Advance, AnswerFeedback, AnswerRecord, PASS_THRESHOLD, QuizAction, QuizError, QuizPhase,
    QuizResult, QuizSession,
};
pub use time::Clock;
pub use unlock::{DayProgress, is_day_completed, is_day_unlocked, is_lesson_completed};
