// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{generate, page, quiz, session, upload},
    state::AppState,
    utils::session_cookie::session_middleware,
};

/// Assembles the main application router.
///
/// * Page routes render HTML for the form-driven UI.
/// * `/api/session` exposes the caller's session as JSON.
/// * Every route runs behind the session middleware.
pub fn create_router(state: AppState) -> Router {
    // Multipart framing needs a little headroom over the file itself.
    let upload_limit = state.config.max_upload_bytes + 64 * 1024;

    let page_routes = Router::new()
        .route("/", get(page::index))
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/generate", post(generate::generate))
        .route("/quiz/check", post(quiz::check_answers));

    let api_routes = Router::new().route("/session", get(session::get_session));

    Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        // Global Middleware (applied from outside in)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
