// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{Extension, Form, extract::rejection::FormRejection, response::IntoResponse};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::quiz::OptionLabel,
    services::{session::AnswerSubmission, session_store::SessionHandle},
    views::page::{PageView, render},
};

/// Turns the posted quiz form (`quiz_id`, `q0`..`qN`) into a submission.
///
/// Unanswered questions simply have no `q{i}` field.
fn parse_submission(fields: &HashMap<String, String>) -> Result<AnswerSubmission, AppError> {
    let quiz_id = fields
        .get("quiz_id")
        .ok_or_else(|| AppError::BadRequest("Missing quiz_id".to_string()))
        .and_then(|raw| {
            Uuid::parse_str(raw).map_err(|e| AppError::BadRequest(format!("Invalid quiz_id: {e}")))
        })?;

    let mut selections = Vec::new();
    for (key, value) in fields {
        let Some(index) = key.strip_prefix('q').and_then(|i| i.parse::<usize>().ok()) else {
            continue;
        };
        let label = value
            .parse::<OptionLabel>()
            .map_err(|e| AppError::BadRequest(format!("Invalid answer for {key}: {e}")))?;
        selections.push((index, label));
    }
    selections.sort_unstable_by_key(|(index, _)| *index);

    Ok(AnswerSubmission {
        quiz_id,
        selections,
    })
}

/// Checks the submitted answers against the loaded quiz.
///
/// * Records every selection on the session's answer sheet.
/// * Renders per-question feedback and the aggregate score.
/// * A stale or out-of-range submission is reported as a notice and nothing is recorded.
pub async fn check_answers(
    Extension(session): Extension<SessionHandle>,
    fields: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(fields) = fields?;
    let submission = parse_submission(&fields)?;

    let mut session = session.lock().await;
    session.touch();
    let page = match session.check_answers(submission) {
        Ok(report) => render(&PageView::new(&session).with_report(Some(&report))),
        Err(notice) => {
            let notices = [notice];
            render(&PageView::new(&session).with_notices(&notices))
        }
    };

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_selections_in_question_order() {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let submission = parse_submission(&fields(&[
            ("quiz_id", &id_str),
            ("q2", "D"),
            ("q0", "A"),
            ("submit", "Check Answers"),
        ]))
        .unwrap();

        assert_eq!(submission.quiz_id, id);
        assert_eq!(submission.selections, vec![(0, OptionLabel::A), (2, OptionLabel::D)]);
    }

    #[test]
    fn rejects_missing_quiz_id() {
        assert!(matches!(
            parse_submission(&fields(&[("q0", "A")])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_labels_outside_option_set() {
        let id = Uuid::new_v4().to_string();
        assert!(matches!(
            parse_submission(&fields(&[("quiz_id", &id), ("q0", "E")])),
            Err(AppError::BadRequest(_))
        ));
    }
}
