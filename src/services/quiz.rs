// src/services/quiz.rs

//! Quiz reconciliation: turning a model response into a [`Quiz`], recording
//! selections and scoring them.

use serde::{Deserialize, de::IgnoredAny};

use crate::models::quiz::{AnswerSheet, OptionLabel, Question, QuestionOutcome, Quiz, ScoreReport};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("the quiz response is not valid JSON: {0}")]
    Malformed(String),
    #[error("the quiz response does not match the expected structure: {0}")]
    SchemaViolation(String),
}

/// Shape of the JSON the model is instructed to emit.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireQuiz {
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireQuestion {
    question: String,
    options: WireOptions,
    correct_answer: String,
}

/// Exactly the keys `A`..`D`. A repeated key is a duplicate-field error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireOptions {
    #[serde(rename = "A")]
    a: String,
    #[serde(rename = "B")]
    b: String,
    #[serde(rename = "C")]
    c: String,
    #[serde(rename = "D")]
    d: String,
}

impl WireQuestion {
    fn validate(self, index: usize) -> Result<Question, ParseError> {
        let correct_answer = self.correct_answer.parse::<OptionLabel>().map_err(|e| {
            ParseError::SchemaViolation(format!("question {} correct_answer: {e}", index + 1))
        })?;

        let WireOptions { a, b, c, d } = self.options;
        Ok(Question::new(self.question, [a, b, c, d], correct_answer))
    }
}

/// Parses a raw model response into a quiz. All or nothing.
///
/// Text that is not JSON at all (including JSON wrapped in a Markdown fence)
/// is `Malformed`; JSON of the wrong shape is a `SchemaViolation`.
pub fn parse(raw_response: &str) -> Result<Quiz, ParseError> {
    serde_json::from_str::<IgnoredAny>(raw_response)
        .map_err(|e| ParseError::Malformed(e.to_string()))?;

    // Parsed from the text so repeated keys reach the derive.
    let wire: WireQuiz = serde_json::from_str(raw_response)
        .map_err(|e| ParseError::SchemaViolation(e.to_string()))?;

    if wire.questions.is_empty() {
        return Err(ParseError::SchemaViolation(
            "the quiz contains no questions".to_string(),
        ));
    }

    let questions = wire
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| q.validate(i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz::new(questions))
}

/// Records `label` for the question at `question_index`, replacing any
/// earlier selection for that index.
pub fn record_answer(sheet: &mut AnswerSheet, question_index: usize, label: OptionLabel) {
    sheet.insert(question_index, label);
}

/// Scores `sheet` against `quiz`. A question without an entry is incorrect.
pub fn score(quiz: &Quiz, sheet: &AnswerSheet) -> ScoreReport {
    let outcomes: Vec<QuestionOutcome> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = sheet.get(index);
            if selected == Some(question.correct_answer) {
                QuestionOutcome::Correct
            } else {
                QuestionOutcome::Incorrect {
                    selected,
                    correct: question.correct_answer,
                    correct_text: question.correct_text().to_string(),
                }
            }
        })
        .collect();

    let correct_count = outcomes.iter().filter(|o| o.is_correct()).count();

    ScoreReport {
        total: outcomes.len(),
        correct_count,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_QUESTION: &str = r#"{"questions":[{"question":"Q1","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"B"}]}"#;

    fn three_questions() -> Quiz {
        parse(
            r#"{
                "questions": [
                    {"question": "2 + 2?", "options": {"A": "3", "B": "4", "C": "5", "D": "22"}, "correct_answer": "B"},
                    {"question": "Largest planet?", "options": {"A": "Jupiter", "B": "Mars", "C": "Venus", "D": "Earth"}, "correct_answer": "A"},
                    {"question": "H2O is?", "options": {"A": "Salt", "B": "Air", "C": "Gold", "D": "Water"}, "correct_answer": "D"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_single_question_quiz() {
        let quiz = parse(ONE_QUESTION).unwrap();
        assert_eq!(quiz.len(), 1);
        let q = &quiz.questions[0];
        assert_eq!(q.text, "Q1");
        assert_eq!(q.correct_answer, OptionLabel::B);
        assert_eq!(q.option(OptionLabel::A), "x");
        assert_eq!(q.option(OptionLabel::D), "w");
    }

    #[test]
    fn scores_single_question_quiz() {
        let quiz = parse(ONE_QUESTION).unwrap();

        let right: AnswerSheet = [(0, OptionLabel::B)].into_iter().collect();
        let wrong: AnswerSheet = [(0, OptionLabel::A)].into_iter().collect();

        assert_eq!(score(&quiz, &right).tally(), (1, 1));
        assert_eq!(score(&quiz, &wrong).tally(), (0, 1));
        assert_eq!(score(&quiz, &AnswerSheet::new()).tally(), (0, 1));
    }

    #[test]
    fn missing_answer_is_incorrect_without_selection() {
        let quiz = parse(ONE_QUESTION).unwrap();
        let report = score(&quiz, &AnswerSheet::new());
        assert_eq!(
            report.outcomes,
            vec![QuestionOutcome::Incorrect {
                selected: None,
                correct: OptionLabel::B,
                correct_text: "y".to_string(),
            }]
        );
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(parse("Sure! Here is your quiz."), Err(ParseError::Malformed(_))));
        assert!(matches!(parse(""), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn rejects_fenced_json() {
        let fenced = format!("```json\n{ONE_QUESTION}\n```");
        assert!(matches!(parse(&fenced), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn rejects_missing_correct_answer() {
        let raw = r#"{"questions":[{"question":"Q1","options":{"A":"x","B":"y","C":"z","D":"w"}}]}"#;
        assert!(matches!(parse(raw), Err(ParseError::SchemaViolation(_))));
    }

    #[test]
    fn rejects_wrong_option_keys() {
        let three = r#"{"questions":[{"question":"Q","options":{"A":"x","B":"y","C":"z"},"correct_answer":"A"}]}"#;
        let extra = r#"{"questions":[{"question":"Q","options":{"A":"x","B":"y","C":"z","D":"w","E":"v"},"correct_answer":"A"}]}"#;
        let lower = r#"{"questions":[{"question":"Q","options":{"a":"x","b":"y","c":"z","d":"w"},"correct_answer":"a"}]}"#;
        for raw in [three, extra, lower] {
            assert!(matches!(parse(raw), Err(ParseError::SchemaViolation(_))), "{raw}");
        }
    }

    #[test]
    fn rejects_repeated_option_key() {
        let raw = r#"{"questions":[{"question":"Q","options":{"A":"x","A":"dup","B":"y","C":"z","D":"w"},"correct_answer":"A"}]}"#;
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref m) if m.contains("duplicate")), "{err}");
    }

    #[test]
    fn option_text_follows_labels_not_key_order() {
        let raw = r#"{"questions":[{"question":"Q","options":{"D":"w","C":"z","B":"y","A":"x"},"correct_answer":"C"}]}"#;
        let question = &parse(raw).unwrap().questions[0];
        assert_eq!(question.option(OptionLabel::A), "x");
        assert_eq!(question.correct_text(), "z");
    }

    #[test]
    fn rejects_correct_answer_outside_label_set() {
        let raw = r#"{"questions":[{"question":"Q","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"Paris"}]}"#;
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref m) if m.contains("question 1")));
    }

    #[test]
    fn rejects_structural_deviation() {
        let not_object = r#"[1, 2, 3]"#;
        let unknown_field = r#"{"questions":[{"question":"Q","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"A","explanation":"because"}]}"#;
        let numeric_option = r#"{"questions":[{"question":"Q","options":{"A":1,"B":"y","C":"z","D":"w"},"correct_answer":"A"}]}"#;
        let empty = r#"{"questions":[]}"#;
        for raw in [not_object, unknown_field, numeric_option, empty] {
            assert!(matches!(parse(raw), Err(ParseError::SchemaViolation(_))), "{raw}");
        }
    }

    #[test]
    fn one_bad_question_rejects_whole_quiz() {
        let raw = r#"{"questions":[
            {"question":"ok","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"A"},
            {"question":"bad","options":{"A":"x","B":"y","C":"z","D":"w"},"correct_answer":"F"}
        ]}"#;
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref m) if m.contains("question 2")));
    }

    #[test]
    fn later_answer_overwrites_earlier_one() {
        let quiz = three_questions();
        let mut sheet = AnswerSheet::new();
        record_answer(&mut sheet, 0, OptionLabel::B);
        record_answer(&mut sheet, 0, OptionLabel::C);

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(0), Some(OptionLabel::C));
        assert_eq!(score(&quiz, &sheet).tally(), (0, 3));
    }

    #[test]
    fn score_bounds_hold_for_any_sheet() {
        let quiz = three_questions();
        let sheets: Vec<AnswerSheet> = vec![
            AnswerSheet::new(),
            [(0, OptionLabel::B)].into_iter().collect(),
            [(0, OptionLabel::B), (1, OptionLabel::A), (2, OptionLabel::D)].into_iter().collect(),
            [(0, OptionLabel::A), (1, OptionLabel::B), (2, OptionLabel::C)].into_iter().collect(),
            // Entries past the end of the quiz are ignored.
            [(7, OptionLabel::A)].into_iter().collect(),
        ];
        for sheet in &sheets {
            let report = score(&quiz, sheet);
            assert_eq!(report.total, quiz.len());
            assert!(report.correct_count <= report.total);
            assert_eq!(report.outcomes.len(), report.total);
        }
        assert_eq!(score(&quiz, &sheets[2]).tally(), (3, 3));
    }

    #[test]
    fn score_is_idempotent() {
        let quiz = three_questions();
        let sheet: AnswerSheet = [(1, OptionLabel::A), (2, OptionLabel::B)].into_iter().collect();
        assert_eq!(score(&quiz, &sheet), score(&quiz, &sheet));
    }
}
