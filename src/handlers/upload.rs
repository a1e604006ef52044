// src/handlers/upload.rs

use axum::{
    Extension,
    extract::{Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::document::Upload,
    services::{extractor::TextExtractor, session_store::SessionHandle},
    views::page::{PageView, render},
};

/// Processes an uploaded document.
///
/// * Reads the `file` field of the multipart body.
/// * Extracts its text into the session.
/// * Re-renders the page with a success or error notice.
pub async fn upload_document(
    State(extractor): State<TextExtractor>,
    Extension(session): Extension<SessionHandle>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field in upload".to_string()))?;

    tracing::info!(
        file = %upload.describe(),
        size = upload.bytes.len(),
        "Processing upload"
    );

    let mut session = session.lock().await;
    session.touch();
    let notice = session.upload(&extractor, upload).await;

    let notices = [notice];
    Ok(render(&PageView::new(&session).with_notices(&notices)))
}
