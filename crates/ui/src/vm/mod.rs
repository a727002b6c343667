mod auth_vm;
mod dashboard_vm;
mod days_vm;
mod lesson_vm;
mod quiz_vm;

pub use auth_vm::{FormStatus, LoginForm, LoginMode, RegisterForm, reset_notice, sign_up_status};
pub use dashboard_vm::{
    ContinueTarget, ContinueVm, DashboardVm, ModuleCardVm, ProgressPageVm, map_dashboard,
    map_progress_page, module_description, module_icon,
};
pub use days_vm::{DayCardState, DayCardVm, day_progress_label, map_day_cards};
pub use lesson_vm::{LessonItemVm, LessonSectionVm, LessonVm, map_lesson};
pub use quiz_vm::{
    DotState, OptionState, OptionVm, QuizIntent, QuizOutcome, QuizResultVm, QuizVm, SaveStatus,
};
