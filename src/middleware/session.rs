use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::session::SessionId;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "beauty_session";

/// Finds a usable session id among the request's `Cookie` headers
pub fn session_from_cookies(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

fn session_cookie(session: &SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session)
}

/// Attaches a [`SessionId`] to every request, starting a new session (and setting
/// its cookie on the response) when the request does not carry a valid one.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let (session, is_new) = match session_from_cookies(request.headers()) {
        Some(session) => (session, false),
        None => (SessionId::generate(), true),
    };

    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if is_new {
        if let Ok(cookie) = HeaderValue::from_str(&session_cookie(&session)) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}
