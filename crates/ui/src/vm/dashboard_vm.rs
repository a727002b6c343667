use learn_core::model::{Identity, LessonId, Module};
use services::ProgressOverview;

/// Where the "continue learning" card points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContinueTarget {
    Lesson(LessonId),
    AllDays,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinueVm {
    pub title: String,
    pub message: String,
    pub cta: String,
    pub target: ContinueTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub module: Module,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub percentage: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting_name: String,
    pub days_label: String,
    pub lessons_completed: u32,
    pub overall_label: String,
    pub tests_taken: u32,
    pub continue_card: ContinueVm,
    pub modules: Vec<ModuleCardVm>,
}

#[must_use]
pub fn module_icon(module: Module) -> &'static str {
    match module {
        Module::Days => "📅",
        Module::Basics => "📚",
        Module::Tenses => "⏳",
        Module::Conversations => "💬",
    }
}

#[must_use]
pub fn module_description(module: Module) -> &'static str {
    match module {
        Module::Days => "Structured day-by-day learning path",
        Module::Basics => "Alphabets, greetings, and pronouns",
        Module::Tenses => "Past, present and future forms",
        Module::Conversations => "Common phrases for everyday situations",
    }
}

fn module_cards(overview: &ProgressOverview) -> Vec<ModuleCardVm> {
    overview
        .modules
        .iter()
        .map(|m| ModuleCardVm {
            module: m.module,
            title: m.module.title(),
            description: module_description(m.module),
            icon: module_icon(m.module),
            percentage: m.percentage,
        })
        .collect()
}

#[must_use]
pub fn map_dashboard(identity: &Identity, overview: &ProgressOverview) -> DashboardVm {
    let days = &overview.days;
    let continue_card = if days.all_completed() {
        ContinueVm {
            title: format!("Day {}: All Days Complete!", days.current_day),
            message: format!(
                "You've completed all {} days! Explore the other modules.",
                days.total_days
            ),
            cta: "View All Days →".to_owned(),
            target: ContinueTarget::AllDays,
        }
    } else {
        ContinueVm {
            title: format!("Day {}: Continue Your Journey", days.current_day),
            message: format!("Continue with Day {} to keep learning", days.current_day),
            cta: format!("Continue Day {} →", days.current_day),
            target: ContinueTarget::Lesson(LessonId::day(days.current_day)),
        }
    };

    DashboardVm {
        greeting_name: identity.display_name().to_owned(),
        days_label: format!("{}/{}", days.completed_days, days.total_days),
        lessons_completed: overview.stats.lessons_completed,
        overall_label: format!("{}%", overview.overall.percentage),
        tests_taken: overview.stats.tests_taken,
        continue_card,
        modules: module_cards(overview),
    }
}

/// The progress page: overall circle, module bars and counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressPageVm {
    pub overall_percentage: u8,
    pub overall_caption: String,
    pub modules: Vec<ModuleCardVm>,
    pub tests_taken: u32,
    pub lessons_completed: u32,
    pub days_label: String,
}

#[must_use]
pub fn map_progress_page(overview: &ProgressOverview) -> ProgressPageVm {
    ProgressPageVm {
        overall_percentage: overview.overall.percentage,
        overall_caption: format!(
            "{} of {} lessons completed",
            overview.overall.completed, overview.overall.total
        ),
        modules: module_cards(overview),
        tests_taken: overview.stats.tests_taken,
        lessons_completed: overview.stats.lessons_completed,
        days_label: format!(
            "{}/{}",
            overview.days.completed_days, overview.days.total_days
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::Catalog;
    use learn_core::model::{ProgressRecord, UserId};
    use learn_core::time::fixed_now;

    fn overview(completed_days: u8) -> ProgressOverview {
        let user = UserId::random();
        let records = (1..=completed_days)
            .map(|d| {
                ProgressRecord::new(
                    user,
                    LessonId::new(format!("day-{d}")).unwrap(),
                    5,
                    true,
                    fixed_now(),
                )
            })
            .collect();
        ProgressOverview::from_records(&Catalog::builtin().unwrap(), records)
    }

    fn learner() -> Identity {
        Identity::new(UserId::random(), "asha@example.com", None)
    }

    #[test]
    fn dashboard_points_at_current_day() {
        let vm = map_dashboard(&learner(), &overview(2));
        assert_eq!(vm.greeting_name, "asha");
        assert_eq!(vm.days_label, "2/5");
        assert_eq!(vm.continue_card.cta, "Continue Day 3 →");
        assert_eq!(
            vm.continue_card.target,
            ContinueTarget::Lesson(LessonId::new("day-3").unwrap())
        );
        assert_eq!(vm.modules[0].percentage, 40);
    }

    #[test]
    fn dashboard_after_all_days() {
        let vm = map_dashboard(&learner(), &overview(5));
        assert_eq!(vm.continue_card.target, ContinueTarget::AllDays);
        assert_eq!(vm.tests_taken, 5);
    }

    #[test]
    fn progress_page_caption() {
        let vm = map_progress_page(&overview(1));
        assert_eq!(vm.overall_caption, "1 of 10 lessons completed");
        assert_eq!(vm.overall_percentage, 10);
        assert_eq!(vm.modules.len(), 4);
    }
}
