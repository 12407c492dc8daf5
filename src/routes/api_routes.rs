use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::CurrentUser;
use crate::models::{
    ChatUsersResponse, DarkModeResponse, MessagesResponse, SendMessageRequest, SendMessageResponse,
};
use crate::routes::ajax_failure;
use crate::AppState;

/// GET `/api/chat-users/` — correspondents available to the session user.
pub async fn chat_users_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    match state.chat.chat_partners(&user).await {
        Ok(users) => Json(ChatUsersResponse {
            success: true,
            users,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}

/// POST `/api/send-message/` — store one message addressed to `receiver_id`.
pub async fn send_message_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    match state.chat.send_message(&user, request).await {
        Ok(message) => Json(SendMessageResponse {
            success: true,
            message,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}

/// GET `/api/get-messages/{user_id}/` — the conversation with `user_id`,
/// oldest first, with `is_sender` computed relative to the session user.
pub async fn get_messages_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<String>,
) -> Response {
    match state.chat.conversation_with(&user, &user_id).await {
        Ok(messages) => Json(MessagesResponse {
            success: true,
            messages,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}

/// POST `/api/toggle-dark-mode/` — flip and persist the theme preference.
pub async fn toggle_dark_mode_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    match state.chat.toggle_dark_mode(&user).await {
        Ok(dark_mode) => Json(DarkModeResponse {
            success: true,
            dark_mode,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}
