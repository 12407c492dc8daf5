use sqlx::PgPool;
use tracing::error;

use crate::errors::AppError;
use crate::models::{Session, User};

#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn save(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query("INSERT INTO sessions (id, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(&session.id)
            .bind(&session.user_id)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to save session for user {}: {e}", session.user_id);
                AppError::db_query("Failed to save session", e)
            })?;
        Ok(())
    }

    /// Resolves a session id to its user in one round trip.
    pub async fn find_user(&self, session_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password_hash, u.password_salt, u.full_name,
                    u.department, u.is_it_staff, u.dark_mode, u.is_active, u.created_at
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {e}");
            AppError::db_query("Failed to resolve session", e)
        })
    }

    pub async fn delete(&self, session_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete session: {e}");
                AppError::db_query("Failed to delete session", e)
            })?;
        Ok(())
    }
}
