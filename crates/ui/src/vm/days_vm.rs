use learn_core::DayProgress;
use learn_core::model::LessonId;
use services::DayCard;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DayCardState {
    Locked { message: String },
    Open,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCardVm {
    pub day: u8,
    pub lesson_id: LessonId,
    pub title: String,
    pub description: String,
    pub items_label: String,
    pub state: DayCardState,
}

impl From<&DayCard> for DayCardVm {
    fn from(card: &DayCard) -> Self {
        let state = if !card.unlocked {
            let previous = card.day.previous().map_or(0, |d| d.value());
            DayCardState::Locked {
                message: format!("Complete Day {previous} to unlock"),
            }
        } else if card.completed {
            DayCardState::Completed
        } else {
            DayCardState::Open
        };
        Self {
            day: card.day.value(),
            lesson_id: card.lesson_id.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            items_label: format!("{} phrases", card.item_count),
            state,
        }
    }
}

#[must_use]
pub fn map_day_cards(cards: &[DayCard]) -> Vec<DayCardVm> {
    cards.iter().map(DayCardVm::from).collect()
}

#[must_use]
pub fn day_progress_label(progress: &DayProgress) -> String {
    format!(
        "{}/{} Days Completed ({}%)",
        progress.completed_days, progress.total_days, progress.percentage
    )
}
