// src/models/quiz.rs

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the four option labels a question carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(format!("'{other}' is not one of A, B, C, D")),
        }
    }
}

/// A validated multiple-choice question.
///
/// Always holds exactly four options, one per label, so `correct_answer`
/// is guaranteed to name an option that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    options: [String; 4],
    pub correct_answer: OptionLabel,
}

impl Question {
    pub fn new(text: String, options: [String; 4], correct_answer: OptionLabel) -> Self {
        Self {
            text,
            options,
            correct_answer,
        }
    }

    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// Options in label order.
    pub fn options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL.into_iter().map(|l| (l, self.option(l)))
    }

    pub fn correct_text(&self) -> &str {
        self.option(self.correct_answer)
    }
}

/// A quiz produced by one successful parse of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    /// Fresh per parse. Answer submissions carry it back so that answers
    /// aimed at a replaced quiz can be told apart.
    pub id: Uuid,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Selected label per question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSheet(BTreeMap<usize, OptionLabel>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<OptionLabel> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, index: usize, label: OptionLabel) {
        self.0.insert(index, label);
    }
}

impl FromIterator<(usize, OptionLabel)> for AnswerSheet {
    fn from_iter<T: IntoIterator<Item = (usize, OptionLabel)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A quiz together with the answers recorded against it.
///
/// The sheet only ever exists paired with the quiz it belongs to, so
/// replacing the quiz necessarily discards the old answers.
#[derive(Debug, Clone)]
pub struct LoadedQuiz {
    pub quiz: Quiz,
    pub answers: AnswerSheet,
}

impl LoadedQuiz {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            answers: AnswerSheet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    /// `selected` is `None` when the question was left unanswered.
    Incorrect {
        selected: Option<OptionLabel>,
        correct: OptionLabel,
        correct_text: String,
    },
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, QuestionOutcome::Correct)
    }
}

/// Result of checking an answer sheet against a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub outcomes: Vec<QuestionOutcome>,
    pub correct_count: usize,
    pub total: usize,
}

impl ScoreReport {
    pub fn tally(&self) -> (usize, usize) {
        (self.correct_count, self.total)
    }
}

/// DTO for sending a question to API clients (excludes the correct answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub question: String,
    pub options: BTreeMap<OptionLabel, String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            question: q.text.clone(),
            options: q.options().map(|(l, t)| (l, t.to_string())).collect(),
        }
    }
}
