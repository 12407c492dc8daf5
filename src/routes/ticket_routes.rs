use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::CurrentUser;
use crate::models::{CreateTicketRequest, TicketFilter, TicketResponse, TicketsResponse};
use crate::routes::ajax_failure;
use crate::AppState;

/// GET `/api/tickets/` — scoped, filtered listing, newest first.
pub async fn list_tickets_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<TicketFilter>,
) -> Response {
    match state.tickets.list(&user, &filter).await {
        Ok(tickets) => Json(TicketsResponse {
            success: true,
            tickets,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}

/// POST `/api/tickets/` — create a ticket owned by the session user.
pub async fn create_ticket_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateTicketRequest>,
) -> Response {
    match state.tickets.create(&user, request).await {
        Ok(ticket) => Json(TicketResponse {
            success: true,
            ticket,
        })
        .into_response(),
        Err(e) => ajax_failure(e),
    }
}
