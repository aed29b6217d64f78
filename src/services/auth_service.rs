use std::sync::Arc;

use crate::{
    auth::{verify_password, JwtService},
    errors::{AppError, AppResult},
    models::dto::response::LoginResponse,
    repositories::UserRepository,
};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Validates credentials and issues a bearer token. Unknown username and
    /// wrong password collapse into the same error so the response never
    /// reveals which field was wrong.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt.create_token(&user)?;
        log::info!("User '{}' logged in", user.username);

        Ok(LoginResponse::new(token, &user.role, &user.username, user.id))
    }
}
