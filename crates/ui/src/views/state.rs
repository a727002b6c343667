use dioxus::prelude::*;
use services::LessonServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    /// The day lesson is locked behind the given previous day.
    Locked { day: u8 },
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.".to_owned(),
            ViewError::NotFound => "This lesson does not exist.".to_owned(),
            ViewError::Locked { day } => format!(
                "🔒 Complete Day {} to unlock Day {day}.",
                day.saturating_sub(1)
            ),
        }
    }

    #[must_use]
    pub fn from_lesson(err: &LessonServiceError) -> Self {
        match err {
            LessonServiceError::NotFound(_) => ViewError::NotFound,
            LessonServiceError::Locked { day } => ViewError::Locked { day: day.value() },
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
