// src/handlers/generate.rs

use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::{State, rejection::FormRejection},
    response::IntoResponse,
};

use crate::{
    clients::inference::InferenceClient,
    error::AppError,
    models::generation::GenerateForm,
    services::session_store::SessionHandle,
    views::page::{PageView, render},
};

/// Generates a quiz or summary from the session's context.
///
/// The session stays locked for the whole inference call, so a second
/// action from the same session waits until this one finishes. A body the
/// form could not have produced is a `400` with a JSON error.
pub async fn generate(
    State(client): State<Arc<dyn InferenceClient>>,
    Extension(session): Extension<SessionHandle>,
    form: Result<Form<GenerateForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(form) = form?;

    let mut session = session.lock().await;
    session.touch();
    let notice = session.generate(client.as_ref(), form).await;

    let notices = [notice];
    Ok(render(&PageView::new(&session).with_notices(&notices)))
}
