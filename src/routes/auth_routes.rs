use axum::extract::State;
use axum::http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::{self, CurrentUser};
use crate::models::{LoginRequest, OkResponse, UserResponse, UserView};
use crate::routes::ajax_failure;
use crate::AppState;

/// POST `/api/login/` — verify credentials and set the session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match state.auth.login(&request.username, &request.password).await {
        Ok((session, user)) => {
            let mut response = Json(UserResponse {
                success: true,
                user: UserView::from(&user),
            })
            .into_response();
            if let Ok(cookie) = HeaderValue::from_str(&auth::session_cookie(&session.id)) {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            response
        }
        Err(e) => ajax_failure(e),
    }
}

/// POST `/api/logout/` — drop the session and expire its cookie.
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = auth::cookie_value(&headers, auth::SESSION_COOKIE) {
        if let Err(e) = state.auth.logout(&session_id).await {
            return ajax_failure(e);
        }
    }
    let mut response = Json(OkResponse { success: true }).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&auth::clear_session_cookie()) {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

/// GET `/api/me/` — the session user, including the stored theme preference.
pub async fn me_handler(CurrentUser(user): CurrentUser) -> Response {
    Json(UserResponse {
        success: true,
        user: UserView::from(&user),
    })
    .into_response()
}
