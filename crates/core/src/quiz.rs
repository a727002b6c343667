//! Multiple-choice quiz evaluation.
//!
//! A [`QuizSession`] walks an ordered, non-empty list of [`Question`]s one at a
//! time: `Unanswered → Submitted → (Unanswered | Completed)`. Transitions that
//! are not valid in the current phase leave the session untouched and report a
//! [`QuizError`], so duplicate UI events can be dropped by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Question;

/// Minimum percentage for a quiz to count as passed (and its lesson as completed).
pub const PASS_THRESHOLD: u8 = 60;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("too many questions for a single quiz: {len}")]
    TooManyQuestions { len: usize },

    #[error("cannot {action} while the question is {phase}")]
    InvalidTransition { action: QuizAction, phase: QuizPhase },

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("score {score} exceeds total {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

impl QuizError {
    /// True for errors that only signal an ignored UI event.
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidTransition { .. } | QuizError::OptionOutOfRange { .. }
        )
    }
}

//
// ─── PHASES & ACTIONS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Waiting for the learner to pick and submit an option.
    Unanswered,
    /// Answer revealed together with the explanation.
    Submitted,
    /// All questions answered; the result is final.
    Completed,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizPhase::Unanswered => "unanswered",
            QuizPhase::Submitted => "submitted",
            QuizPhase::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAction {
    Select,
    Submit,
    Advance,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizAction::Select => "select an answer",
            QuizAction::Submit => "submit an answer",
            QuizAction::Advance => "advance",
        })
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Final score of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    score: u32,
    total: u32,
    percentage: u8,
}

impl QuizResult {
    /// Build a result from raw counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for a zero total and
    /// `QuizError::ScoreExceedsTotal` when `score > total`.
    pub fn new(score: u32, total: u32) -> Result<Self, QuizError> {
        if total == 0 {
            return Err(QuizError::Empty);
        }
        if score > total {
            return Err(QuizError::ScoreExceedsTotal { score, total });
        }
        Ok(Self {
            score,
            total,
            percentage: rounded_percentage(score, total),
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// `percentage >= PASS_THRESHOLD`.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.percentage >= PASS_THRESHOLD
    }
}

/// `round(part * 100 / whole)` with halves rounded up. `whole` must be non-zero.
pub(crate) fn rounded_percentage(part: u32, whole: u32) -> u8 {
    debug_assert!(whole > 0 && part <= whole);
    let part = u64::from(part);
    let whole = u64::from(whole);
    let pct = (part * 200 + whole) / (whole * 2);
    u8::try_from(pct).unwrap_or(100)
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// What the learner sees after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub selected: usize,
    pub correct_index: usize,
    pub correct: bool,
    pub explanation: String,
}

/// One submitted answer, kept for the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: usize,
    pub correct: bool,
}

/// Outcome of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The last question was answered.
    Completed(QuizResult),
}

type CompletionCallback = Box<dyn FnOnce(&QuizResult) + Send>;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one learner working through a quiz.
pub struct QuizSession {
    questions: Vec<Question>,
    total: u32,
    current: usize,
    selected: Option<usize>,
    phase: QuizPhase,
    correct_count: u32,
    answers: Vec<AnswerRecord>,
    result: Option<QuizResult>,
    on_complete: Option<CompletionCallback>,
}

impl QuizSession {
    /// Start a quiz at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when `questions` is empty; no session is created.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let total = u32::try_from(questions.len())
            .map_err(|_| QuizError::TooManyQuestions { len: questions.len() })?;

        Ok(Self {
            answers: Vec::with_capacity(questions.len()),
            questions,
            total,
            current: 0,
            selected: None,
            phase: QuizPhase::Unanswered,
            correct_count: 0,
            result: None,
            on_complete: None,
        })
    }

    /// Register a callback that receives the result once, when the quiz completes.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(&QuizResult) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// A fresh session over the same questions. The completion callback is not carried over.
    #[must_use]
    pub fn restarted(&self) -> Self {
        Self {
            answers: Vec::with_capacity(self.questions.len()),
            questions: self.questions.clone(),
            total: self.total,
            current: 0,
            selected: None,
            phase: QuizPhase::Unanswered,
            correct_count: 0,
            result: None,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.phase == QuizPhase::Submitted
    }

    /// Zero-based index of the current question; equals `total()` once completed.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// The final result, available once the quiz is completed.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    /// Choose an option for the current question.
    ///
    /// The choice can be changed freely until the answer is submitted.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` after the answer was revealed or the
    /// quiz completed, and `QuizError::OptionOutOfRange` for an unknown option.
    /// The session is unchanged in both cases.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), QuizError> {
        self.expect_phase(QuizAction::Select, QuizPhase::Unanswered)?;
        let len = self
            .current_question()
            .map_or(0, |question| question.options().len());
        if option_index >= len {
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                len,
            });
        }
        self.selected = Some(option_index);
        Ok(())
    }

    /// Reveal the answer for the current question and score it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` when nothing is selected or the
    /// answer was already revealed. The session is unchanged.
    pub fn submit_answer(&mut self) -> Result<AnswerFeedback, QuizError> {
        self.expect_phase(QuizAction::Submit, QuizPhase::Unanswered)?;
        let (Some(selected), Some(question)) = (self.selected, self.questions.get(self.current))
        else {
            return Err(QuizError::InvalidTransition {
                action: QuizAction::Submit,
                phase: self.phase,
            });
        };

        let correct = question.is_correct(selected);
        let feedback = AnswerFeedback {
            question_index: self.current,
            selected,
            correct_index: question.correct_index(),
            correct,
            explanation: question.explanation().to_owned(),
        };

        if correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        self.answers.push(AnswerRecord {
            question_index: self.current,
            selected,
            correct,
        });
        self.phase = QuizPhase::Submitted;

        Ok(feedback)
    }

    /// Move past a revealed answer, completing the quiz after the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the current answer was revealed.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.expect_phase(QuizAction::Advance, QuizPhase::Submitted)?;

        if !self.is_last_question() {
            self.current += 1;
            self.selected = None;
            self.phase = QuizPhase::Unanswered;
            return Ok(Advance::Next {
                index: self.current,
            });
        }

        let result = QuizResult::new(self.correct_count, self.total)?;
        self.current = self.questions.len();
        self.phase = QuizPhase::Completed;
        self.result = Some(result);
        if let Some(callback) = self.on_complete.take() {
            callback(&result);
        }
        Ok(Advance::Completed(result))
    }

    fn expect_phase(&self, action: QuizAction, expected: QuizPhase) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("phase", &self.phase)
            .field("correct_count", &self.correct_count)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
