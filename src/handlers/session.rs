// src/handlers/session.rs

use std::collections::BTreeMap;

use axum::{Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{
        generation::ArtifactKind,
        quiz::{OptionLabel, PublicQuestion},
    },
    services::session_store::SessionHandle,
};

/// DTO for the quiz part of the snapshot. Correct answers are withheld.
#[derive(Debug, Serialize)]
pub struct QuizSnapshot {
    pub id: Uuid,
    pub questions: Vec<PublicQuestion>,
    /// Recorded selections, keyed by question index.
    pub answers: BTreeMap<usize, OptionLabel>,
}

/// DTO describing the caller's session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub document_chars: Option<usize>,
    pub custom_prompt: String,
    pub question_count: u32,
    pub artifact_kind: ArtifactKind,
    pub quiz: Option<QuizSnapshot>,
    pub summary: Option<String>,
}

/// Returns a JSON snapshot of the caller's session.
pub async fn get_session(Extension(session): Extension<SessionHandle>) -> Json<SessionSnapshot> {
    let mut session = session.lock().await;
    session.touch();

    let quiz = session.loaded_quiz().map(|loaded| QuizSnapshot {
        id: loaded.quiz.id,
        questions: loaded.quiz.questions.iter().map(PublicQuestion::from).collect(),
        answers: (0..loaded.quiz.len())
            .filter_map(|i| loaded.answers.get(i).map(|label| (i, label)))
            .collect(),
    });

    Json(SessionSnapshot {
        document_chars: session.document_text().map(|t| t.char_count()),
        custom_prompt: session.custom_prompt().to_string(),
        question_count: session.question_count(),
        artifact_kind: session.artifact_kind(),
        quiz,
        summary: session.summary().map(str::to_string),
    })
}
