use learn_core::model::{LessonId, ProgressRecord};
use learn_core::{Advance, AnswerFeedback, PASS_THRESHOLD, QuizError, QuizPhase, QuizResult, QuizSession};
use tracing::{debug, warn};

/// How an answer button is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
    /// Revealed, neither picked nor correct.
    Disabled,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Idle => "quiz-option",
            OptionState::Selected => "quiz-option selected",
            OptionState::Correct => "quiz-option correct",
            OptionState::Incorrect => "quiz-option incorrect",
            OptionState::Disabled => "quiz-option disabled",
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        !matches!(self, OptionState::Idle | OptionState::Selected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub pronunciation: Option<String>,
    pub state: OptionState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotState {
    Done,
    Active,
    Pending,
}

impl DotState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            DotState::Done => "quiz-dot completed",
            DotState::Active => "quiz-dot active",
            DotState::Pending => "quiz-dot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Submit,
    Advance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed(QuizResult),
    /// The event did not apply to the current phase and was dropped.
    Ignored,
}

/// UI wrapper around a [`QuizSession`].
pub struct QuizVm {
    session: QuizSession,
    feedback: Option<AnswerFeedback>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            feedback: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Apply a learner action. Out-of-phase events are logged and dropped.
    pub fn dispatch(&mut self, intent: QuizIntent) -> QuizOutcome {
        let applied = match intent {
            QuizIntent::Select(index) => self
                .session
                .select_answer(index)
                .map(|()| QuizOutcome::Continue),
            QuizIntent::Submit => self.session.submit_answer().map(|feedback| {
                self.feedback = Some(feedback);
                QuizOutcome::Continue
            }),
            QuizIntent::Advance => self.session.advance().map(|advance| {
                self.feedback = None;
                match advance {
                    Advance::Next { .. } => QuizOutcome::Continue,
                    Advance::Completed(result) => QuizOutcome::Completed(result),
                }
            }),
        };
        applied.unwrap_or_else(|err| Self::ignored(intent, &err))
    }

    fn ignored(intent: QuizIntent, err: &QuizError) -> QuizOutcome {
        if err.is_ignorable() {
            debug!(?intent, error = %err, "quiz event ignored");
        } else {
            warn!(?intent, error = %err, "quiz event rejected");
        }
        QuizOutcome::Ignored
    }

    /// Start over on the same questions.
    pub fn restart(&mut self) {
        self.session = self.session.restarted();
        self.feedback = None;
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.session.result()
    }

    #[must_use]
    pub fn header(&self) -> String {
        let shown = (self.session.current_index() + 1).min(self.session.questions().len());
        format!("Question {shown} of {}", self.session.total())
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!(
            "Score: {}/{}",
            self.session.correct_count(),
            self.session.total()
        )
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.session.current_question().map(|q| q.prompt())
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let Some(question) = self.session.current_question() else {
            return Vec::new();
        };
        let selected = self.session.selected();
        let revealed = self.session.is_revealed();

        question
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let state = match (revealed, selected == Some(index)) {
                    (false, true) => OptionState::Selected,
                    (false, false) => OptionState::Idle,
                    (true, _) if question.is_correct(index) => OptionState::Correct,
                    (true, true) => OptionState::Incorrect,
                    (true, false) => OptionState::Disabled,
                };
                OptionVm {
                    index,
                    letter: option_letter(index),
                    text: option.display().to_owned(),
                    pronunciation: option.pronunciation().map(str::to_owned),
                    state,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn feedback_label(&self) -> Option<&'static str> {
        self.feedback.as_ref().map(|f| {
            if f.correct {
                "✅ Correct!"
            } else {
                "❌ Incorrect"
            }
        })
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.phase() == QuizPhase::Unanswered && self.session.selected().is_some()
    }

    /// Intent and label of the main button, `None` once completed.
    #[must_use]
    pub fn primary_action(&self) -> Option<(QuizIntent, &'static str)> {
        match self.session.phase() {
            QuizPhase::Unanswered => Some((QuizIntent::Submit, "Submit Answer")),
            QuizPhase::Submitted if self.session.is_last_question() => {
                Some((QuizIntent::Advance, "Finish Test"))
            }
            QuizPhase::Submitted => Some((QuizIntent::Advance, "Next Question")),
            QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn dots(&self) -> Vec<DotState> {
        let current = self.session.current_index();
        (0..self.session.questions().len())
            .map(|i| match i.cmp(&current) {
                std::cmp::Ordering::Less => DotState::Done,
                std::cmp::Ordering::Equal => DotState::Active,
                std::cmp::Ordering::Greater => DotState::Pending,
            })
            .collect()
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}

/// Where a quiz result stands in progress storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    Saving,
    /// Stored; `completed` is the flag of the stored record.
    Saved { completed: bool },
    SignedOut,
    Failed,
}

impl SaveStatus {
    /// Status after `record_result` returned `saved`.
    #[must_use]
    pub fn from_saved(saved: Option<&ProgressRecord>) -> Self {
        match saved {
            Some(record) => SaveStatus::Saved {
                completed: record.completed,
            },
            None => SaveStatus::SignedOut,
        }
    }

    fn notice(self) -> Option<&'static str> {
        match self {
            SaveStatus::Saving => Some("Saving your progress..."),
            SaveStatus::Saved { .. } => None,
            SaveStatus::SignedOut => Some("Sign in to save your progress."),
            SaveStatus::Failed => Some("Your result could not be saved. Please try again later."),
        }
    }
}

/// The card shown after a lesson quiz.
///
/// The next day is only announced, and offered, once a completed record has
/// been stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub percentage_label: String,
    pub summary: String,
    pub passed: bool,
    pub headline: &'static str,
    pub message: String,
    pub notice: Option<&'static str>,
    /// Next day lesson to continue with.
    pub continue_to: Option<(LessonId, String)>,
    result: QuizResult,
    next_day: Option<(LessonId, u8)>,
}

impl QuizResultVm {
    /// `next_day` is the following day lesson and its day number, if any.
    #[must_use]
    pub fn new(result: QuizResult, next_day: Option<(LessonId, u8)>, status: SaveStatus) -> Self {
        let passed = result.is_passing();
        let stored_complete = matches!(status, SaveStatus::Saved { completed: true });
        let message = match (passed, stored_complete, next_day.as_ref()) {
            (true, true, Some((_, day))) => format!("Day {day} is now unlocked!"),
            (true, true, None) => "Lesson completed. Great work!".to_owned(),
            (true, false, _) => "You passed this test.".to_owned(),
            (false, _, Some(_)) => {
                format!("Keep practicing! You need {PASS_THRESHOLD}% to unlock the next day.")
            }
            (false, _, None) => {
                format!("Keep practicing! You need {PASS_THRESHOLD}% to complete this lesson.")
            }
        };
        let continue_to = next_day
            .as_ref()
            .filter(|_| passed && stored_complete)
            .map(|(id, day)| (id.clone(), format!("Continue to Day {day} →")));

        Self {
            percentage_label: format!("{}%", result.percentage()),
            summary: format!(
                "You got {} out of {} questions correct!",
                result.score(),
                result.total()
            ),
            passed,
            headline: if passed {
                "🎉 Congratulations!"
            } else {
                "📚 Almost there!"
            },
            message,
            notice: status.notice(),
            continue_to,
            result,
            next_day,
        }
    }

    /// The same card once the save settled as `status`.
    #[must_use]
    pub fn with_status(&self, status: SaveStatus) -> Self {
        Self::new(self.result, self.next_day.clone(), status)
    }
}
