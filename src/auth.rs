use axum::extract::{FromRequestParts, Request};
use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::models::{ErrorResponse, User};
use crate::AppState;

pub const SESSION_COOKIE: &str = "sessionid";
pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

// ── Cookies ───────────────────────────────────────────────────────────────────

/// Extracts a cookie value from the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            let pair = pair.trim();
            if let Some(value) = pair.strip_prefix(name) {
                if let Some(value) = value.strip_prefix('=') {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

pub fn session_cookie(value: &str) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// The CSRF cookie is intentionally readable from script: clients echo it
/// back in the `X-CSRFToken` header on every mutating request.
pub fn csrf_cookie(value: &str) -> String {
    format!("{CSRF_COOKIE}={value}; Path=/; SameSite=Lax")
}

pub fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

// ── CSRF double-submit guard ──────────────────────────────────────────────────

fn csrf_matches(cookie: Option<&str>, header: Option<&str>) -> bool {
    match (cookie, header) {
        (Some(c), Some(h)) => !c.is_empty() && c == h,
        _ => false,
    }
}

/// Rejects mutating requests whose `X-CSRFToken` header does not match the
/// `csrftoken` cookie, and issues the cookie to clients that lack one.
pub async fn require_csrf(req: Request, next: Next) -> Response {
    let had_cookie = cookie_value(req.headers(), CSRF_COOKIE).is_some();

    if req.method() == Method::POST {
        let cookie = cookie_value(req.headers(), CSRF_COOKIE);
        let header = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !csrf_matches(cookie.as_deref(), header.as_deref()) {
            warn!("Rejected {} {}: CSRF token missing or mismatched", req.method(), req.uri());
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("CSRF verification failed")),
            )
                .into_response();
        }
    }

    let mut response = next.run(req).await;

    if !had_cookie {
        if let Ok(value) = HeaderValue::from_str(&csrf_cookie(&new_token())) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

// ── Password hashing ──────────────────────────────────────────────────────────

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

// ── Session extractor ─────────────────────────────────────────────────────────

/// The authenticated user for this request, resolved from the `sessionid`
/// cookie. Handlers taking this extractor reject unauthenticated callers.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id =
            cookie_value(&parts.headers, SESSION_COOKIE).ok_or_else(unauthorized_response)?;
        let user = state.auth.session_user(&session_id).await.map_err(|e| {
            if e.is_unauthorized() {
                unauthorized_response()
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(e.to_string())),
                )
                    .into_response()
            }
        })?;
        Ok(CurrentUser(user))
    }
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Authentication required")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("csrftoken=abc123; sessionid=deadbeef"),
        );
        assert_eq!(cookie_value(&headers, "sessionid").as_deref(), Some("deadbeef"));
        assert_eq!(cookie_value(&headers, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn cookie_value_does_not_match_prefixed_names() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sessionid2=x; sessionid=y"));
        assert_eq!(cookie_value(&headers, "sessionid").as_deref(), Some("y"));
    }

    #[test]
    fn csrf_requires_matching_nonempty_tokens() {
        assert!(csrf_matches(Some("tok"), Some("tok")));
        assert!(!csrf_matches(Some("tok"), Some("other")));
        assert!(!csrf_matches(None, Some("tok")));
        assert!(!csrf_matches(Some("tok"), None));
        assert!(!csrf_matches(Some(""), Some("")));
    }

    #[test]
    fn password_hash_round_trip() {
        let salt = new_token();
        let hash = hash_password("hunter2", &salt);
        assert!(verify_password("hunter2", &salt, &hash));
        assert!(!verify_password("hunter3", &salt, &hash));
        assert_ne!(hash, hash_password("hunter2", "other-salt"));
    }
}
