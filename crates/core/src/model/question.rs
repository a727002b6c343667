use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("option {index} has no display text")]
    EmptyOption { index: usize },

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One selectable answer: the text shown to the learner and an optional
/// romanised pronunciation hint ("Read as: ...").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption", into = "RawOptionObject")]
pub struct AnswerOption {
    display: String,
    pronunciation: Option<String>,
}

impl AnswerOption {
    #[must_use]
    pub fn new(display: impl Into<String>, pronunciation: Option<String>) -> Self {
        Self {
            display: display.into(),
            pronunciation: pronunciation.filter(|p| !p.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn text(display: impl Into<String>) -> Self {
        Self::new(display, None)
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[must_use]
    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref()
    }
}

// Content files use either a bare string or a `{ malayalam, transliteration }` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Object(RawOptionObject),
}

#[derive(Serialize, Deserialize)]
struct RawOptionObject {
    malayalam: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transliteration: Option<String>,
}

impl From<RawOption> for AnswerOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(display) => AnswerOption::text(display),
            RawOption::Object(obj) => AnswerOption::new(obj.malayalam, obj.transliteration),
        }
    }
}

impl From<AnswerOption> for RawOptionObject {
    fn from(option: AnswerOption) -> Self {
        Self {
            malayalam: option.display,
            transliteration: option.pronunciation,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct Question {
    prompt: String,
    options: Vec<AnswerOption>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, any option is blank,
    /// fewer than two options are given, or `correct_index` is out of range.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if let Some(index) = options.iter().position(|o| o.display.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &AnswerOption {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact index match; there is no partial credit.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }
}

#[derive(Serialize, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<AnswerOption>,
    #[serde(alias = "correctAnswer")]
    correct: usize,
    #[serde(default)]
    explanation: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(raw.question, raw.options, raw.correct, raw.explanation)
    }
}

impl From<Question> for RawQuestion {
    fn from(q: Question) -> Self {
        Self {
            question: q.prompt,
            options: q.options,
            correct: q.correct_index,
            explanation: q.explanation,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<AnswerOption> {
        (0..n).map(|i| AnswerOption::text(format!("opt {i}"))).collect()
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new("  ", options(2), 0, "").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = Question::new("Q", options(3), 3, "").unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectIndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("Q", options(1), 0, "").unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn empty_pronunciation_is_dropped() {
        let option = AnswerOption::new("Hello", Some(String::new()));
        assert_eq!(option.pronunciation(), None);
    }

    #[test]
    fn deserializes_mixed_option_shapes() {
        let json = r#"{
            "question": "What is the Malayalam word for 'I'?",
            "options": [
                { "malayalam": "നീ", "transliteration": "nī" },
                { "malayalam": "ഞാൻ", "transliteration": "ñān" },
                "Hello",
                { "malayalam": "How are you?", "transliteration": "" }
            ],
            "correctAnswer": 1,
            "explanation": "ഞാൻ (ñān) means 'I'"
        }"#;

        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_index(), 1);
        assert_eq!(q.correct_option().display(), "ഞാൻ");
        assert_eq!(q.correct_option().pronunciation(), Some("ñān"));
        assert_eq!(q.options()[2].pronunciation(), None);
        assert_eq!(q.options()[3].pronunciation(), None);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn invalid_content_fails_to_deserialize() {
        let json = r#"{ "question": "Q", "options": ["a", "b"], "correct": 5 }"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
