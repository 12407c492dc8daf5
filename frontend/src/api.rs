use gloo_net::http::{Request, RequestBuilder};

use crate::models::{
    ChatUsersResponse, CreateTicketRequest, DarkModeResponse, LoginRequest, MessagesResponse,
    SendMessageRequest, SendMessageResponse, TicketResponse, TicketsResponse, UserResponse,
};
use crate::utils;

/// Attaches the CSRF header sourced from the `csrftoken` cookie. Every
/// mutating endpoint requires it.
fn with_csrf(request: RequestBuilder) -> RequestBuilder {
    match utils::csrf_token() {
        Some(token) => request.header("X-CSRFToken", &token),
        None => request,
    }
}

/// Logs in and lets the server set the session cookie.
pub async fn login(username: &str, password: &str) -> Result<UserResponse, String> {
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let resp = with_csrf(Request::post("/api/login/"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<UserResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn logout() -> Result<(), String> {
    with_csrf(Request::post("/api/logout/"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;
    Ok(())
}

/// Fetches the session user; an error means there is no live session.
pub async fn fetch_me() -> Result<UserResponse, String> {
    let resp = Request::get("/api/me/")
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<UserResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetches the correspondents the session user may message.
pub async fn fetch_chat_users() -> Result<ChatUsersResponse, String> {
    let resp = Request::get("/api/chat-users/")
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<ChatUsersResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetches the full conversation with `user_id`, oldest message first.
pub async fn fetch_messages(user_id: &str) -> Result<MessagesResponse, String> {
    let resp = Request::get(&format!("/api/get-messages/{user_id}/"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<MessagesResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Sends one message. The caller inspects the envelope's `success`/`error`.
pub async fn send_message(receiver_id: &str, message: &str) -> Result<SendMessageResponse, String> {
    let body = SendMessageRequest {
        receiver_id: receiver_id.to_string(),
        message: message.to_string(),
    };

    let resp = with_csrf(Request::post("/api/send-message/"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<SendMessageResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn toggle_dark_mode() -> Result<DarkModeResponse, String> {
    let resp = with_csrf(Request::post("/api/toggle-dark-mode/"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<DarkModeResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Fetches tickets with the current search/filter state; empty values are
/// left out of the query string entirely.
pub async fn fetch_tickets(
    search: &str,
    status: &str,
    priority: &str,
    category: &str,
) -> Result<TicketsResponse, String> {
    let mut query: Vec<(&str, &str)> = Vec::new();
    if !search.is_empty() {
        query.push(("search", search));
    }
    if !status.is_empty() {
        query.push(("status", status));
    }
    if !priority.is_empty() {
        query.push(("priority", priority));
    }
    if !category.is_empty() {
        query.push(("category", category));
    }

    let resp = Request::get("/api/tickets/")
        .query(query)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<TicketsResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

pub async fn create_ticket(request: &CreateTicketRequest) -> Result<TicketResponse, String> {
    let resp = with_csrf(Request::post("/api/tickets/"))
        .json(request)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    resp.json::<TicketResponse>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}
