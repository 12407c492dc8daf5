pub mod api_routes;
pub mod auth_routes;
pub mod ticket_routes;

use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::ErrorResponse;

/// The AJAX endpoints report failures in-band: HTTP 200 with
/// `{ "success": false, "error": ... }`, the envelope the browser layer
/// switches on. Expected client mistakes log quietly, the rest loudly.
pub fn ajax_failure(err: AppError) -> Response {
    if err.is_validation() || err.is_not_found() || err.is_unauthorized() {
        debug!("Request rejected: {err}");
    } else {
        warn!("Request failed: {err}");
    }
    Json(ErrorResponse::new(err.to_string())).into_response()
}
