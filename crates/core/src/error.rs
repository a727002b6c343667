use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{LessonError, ParseIdError, QuestionError};
use crate::quiz::QuizError;

/// Umbrella error for callers that do not need to tell domain failures apart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
