use tracing::info;

use crate::auth;
use crate::db::session_repository::SessionRepository;
use crate::db::user_repository::UserRepository;
use crate::errors::AppError;
use crate::models::{Session, User};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    session_repo: SessionRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, session_repo: SessionRepository) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// Verifies credentials and opens a fresh session. Unknown usernames,
    /// wrong passwords and deactivated accounts all answer the same way.
    pub async fn login(&self, username: &str, password: &str) -> Result<(Session, User), AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active
            || !auth::verify_password(password, &user.password_salt, &user.password_hash)
        {
            return Err(AppError::InvalidCredentials);
        }

        let session = Session::new(user.id.clone());
        self.session_repo.save(&session).await?;
        info!("User '{}' logged in", user.username);
        Ok((session, user))
    }

    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        self.session_repo.delete(session_id).await
    }

    /// Resolves a session cookie to its (still active) user.
    pub async fn session_user(&self, session_id: &str) -> Result<User, AppError> {
        let user = self
            .session_repo
            .find_user(session_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        if !user.is_active {
            return Err(AppError::Unauthorized);
        }
        Ok(user)
    }
}
