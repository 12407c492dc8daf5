mod auth;
mod db;
mod errors;
mod models;
mod routes;
mod service;

use std::path::PathBuf;

use axum::{middleware, routing::get, routing::post, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::message_repository::MessageRepository;
use crate::db::session_repository::SessionRepository;
use crate::db::ticket_repository::TicketRepository;
use crate::db::user_repository::UserRepository;
use crate::routes::api_routes::{
    chat_users_handler, get_messages_handler, send_message_handler, toggle_dark_mode_handler,
};
use crate::routes::auth_routes::{login_handler, logout_handler, me_handler};
use crate::routes::ticket_routes::{create_ticket_handler, list_tickets_handler};
use crate::service::auth_service::AuthService;
use crate::service::chat_service::ChatService;
use crate::service::ticket_service::TicketService;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub chat: ChatService,
    pub tickets: TicketService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk=debug,tower_http=debug".into()),
        )
        .init();

    // ── Database ──────────────────────────────────────────────────────────────
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set (copy .env.example to .env)");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to PostgreSQL");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    info!("Database connection established and migrations applied");

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let message_repo = MessageRepository::new(pool.clone());
    let ticket_repo = TicketRepository::new(pool.clone());

    let state = AppState {
        auth: AuthService::new(user_repo.clone(), session_repo),
        chat: ChatService::new(user_repo, message_repo),
        tickets: TicketService::new(ticket_repo),
    };

    // ── Router ────────────────────────────────────────────────────────────────
    // The built frontend is served from STATIC_DIR; unknown paths fall back to
    // the SPA index. Trailing slashes on the API paths are part of the
    // contract the browser layer was written against.
    let static_dir = PathBuf::from(
        std::env::var("STATIC_DIR").unwrap_or_else(|_| "frontend/dist".to_string()),
    );
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let app = Router::new()
        .route("/api/login/", post(login_handler))
        .route("/api/logout/", post(logout_handler))
        .route("/api/me/", get(me_handler))
        .route("/api/chat-users/", get(chat_users_handler))
        .route("/api/send-message/", post(send_message_handler))
        .route("/api/get-messages/{user_id}/", get(get_messages_handler))
        .route("/api/toggle-dark-mode/", post(toggle_dark_mode_handler))
        .route(
            "/api/tickets/",
            get(list_tickets_handler).post(create_ticket_handler),
        )
        .fallback_service(spa)
        .layer(middleware::from_fn(auth::require_csrf))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // ── Listen ────────────────────────────────────────────────────────────────
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
