// src/handlers/page.rs

use axum::{Extension, response::Html};

use crate::{
    services::session_store::SessionHandle,
    views::page::{PageView, render},
};

/// Renders the page for the caller's session.
pub async fn index(Extension(session): Extension<SessionHandle>) -> Html<String> {
    let mut session = session.lock().await;
    session.touch();
    render(&PageView::new(&session))
}
