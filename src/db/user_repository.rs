use sqlx::PgPool;
use tracing::error;

use crate::errors::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, username, password_hash, password_salt, full_name, department, \
                            is_it_staff, dark_mode, is_active, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to find user {id}: {e}");
                AppError::db_query(format!("Failed to find user {id}"), e)
            })
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to find user '{username}': {e}");
            AppError::db_query(format!("Failed to find user '{username}'"), e)
        })
    }

    /// Users the given user may open a conversation with: IT staff can reach
    /// every active user but themselves, everyone else reaches active IT staff.
    pub async fn chat_partners(&self, user: &User) -> Result<Vec<User>, AppError> {
        let query = if user.is_it_staff {
            format!(
                "SELECT {USER_COLUMNS} FROM users \
                 WHERE is_active AND id <> $1 ORDER BY username"
            )
        } else {
            format!(
                "SELECT {USER_COLUMNS} FROM users \
                 WHERE is_active AND is_it_staff AND id <> $1 ORDER BY username"
            )
        };
        sqlx::query_as::<_, User>(&query)
            .bind(&user.id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch chat partners for {}: {e}", user.id);
                AppError::db_query("Failed to fetch chat partners", e)
            })
    }

    /// Flips the stored dark-mode preference and returns the new value.
    pub async fn toggle_dark_mode(&self, user_id: &str) -> Result<bool, AppError> {
        let (dark_mode,): (bool,) =
            sqlx::query_as("UPDATE users SET dark_mode = NOT dark_mode WHERE id = $1 RETURNING dark_mode")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!("Failed to toggle dark mode for {user_id}: {e}");
                    AppError::db_query("Failed to toggle dark mode", e)
                })?;
        Ok(dark_mode)
    }

    pub async fn save(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, password_salt, full_name, \
                                department, is_it_staff, dark_mode, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(&user.full_name)
        .bind(&user.department)
        .bind(user.is_it_staff)
        .bind(user.dark_mode)
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save user {}: {e}", user.username);
            AppError::db_query("Failed to save user", e)
        })?;
        Ok(())
    }
}
