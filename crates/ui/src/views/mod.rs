mod audio;
mod days;
mod home;
mod lesson;
mod login;
mod module;
mod progress;
mod quiz;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use audio::{SpeakButton, WebSpeech};
pub use days::DaysView;
pub use home::HomeView;
pub use lesson::LessonView;
pub use login::LoginView;
pub use module::ModuleView;
pub use progress::ProgressView;
pub use quiz::QuizPanel;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
