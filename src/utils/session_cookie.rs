// src/utils/session_cookie.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::services::session_store::{SessionHandle, SessionStore};

pub const SESSION_COOKIE: &str = "docassist_session";

/// Reads the session id from the `Cookie` header, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Axum Middleware: Session.
///
/// Resolves the caller's session from the cookie, creating one (and setting
/// the cookie) when it is missing or no longer known. The `SessionHandle` is
/// injected into the request extensions for handlers to use.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let existing = session_id_from_headers(req.headers())
        .and_then(|id| store.get(&id).map(|handle| (id, handle)));

    let (handle, new_id): (SessionHandle, Option<Uuid>) = match existing {
        Some((_, handle)) => (handle, None),
        None => {
            let (id, handle) = store.create();
            (handle, Some(id))
        }
    };

    req.extensions_mut().insert(handle);
    let mut response = next.run(req).await;

    if let Some(id) = new_id {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to build session cookie: {}", e),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_cookie_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );

        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn ignores_missing_or_garbled_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("docassist_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
