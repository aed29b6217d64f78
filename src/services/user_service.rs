use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, JwtService},
    db::IdAllocator,
    errors::{AppError, AppResult},
    integrations::MailSender,
    models::{
        domain::User,
        dto::{request::CreateUserRequest, response::UserDto},
    },
    repositories::{RoleRepository, UserRepository},
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    ids: Arc<dyn IdAllocator>,
    jwt: Arc<JwtService>,
    mail: Arc<dyn MailSender>,
    frontend_base_url: String,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        ids: Arc<dyn IdAllocator>,
        jwt: Arc<JwtService>,
        mail: Arc<dyn MailSender>,
        frontend_base_url: &str,
    ) -> Self {
        Self {
            users,
            roles,
            ids,
            jwt,
            mail,
            frontend_base_url: frontend_base_url.to_string(),
        }
    }

    /// Registers a user under the named role. The email doubles as the login
    /// handle. Returns false (not an error) when the email is already taken,
    /// matching the boolean contract of the registration endpoint.
    pub async fn register(&self, request: CreateUserRequest, role_name: &str) -> AppResult<bool> {
        request.validate()?;

        let role = self
            .roles
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role '{}' not found", role_name)))?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Ok(false);
        }

        let id = self.ids.next_id("users").await?;
        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            id,
            &request.last_name,
            &request.first_name,
            &request.email,
            request.phone,
            &request.class_name,
            &request.level,
            &password_hash,
            &request.email, // username := email at registration
            &role.name,
        );

        self.users.create(user).await?;
        Ok(true)
    }

    /// Sends the password-reset mail. The link carries a short-lived signed
    /// reset token rather than a raw user id.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with email '{}' not found", email)))?;

        let token = self.jwt.create_reset_token(&user.username)?;
        let link = format!("{}/nouveaump?token={}", self.frontend_base_url, token);

        self.mail.send_password_reset(&user.email, &link)
    }

    pub async fn change_password(&self, reset_token: &str, new_password: &str) -> AppResult<()> {
        let claims = self.jwt.validate_reset_token(reset_token)?;

        let mut user = self
            .users
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", claims.sub)))?;

        user.password_hash = hash_password(new_password)?;
        self.users.update(user).await?;
        Ok(())
    }

    pub async fn set_archived(&self, id: i64, archived: bool) -> AppResult<()> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;

        user.archived = archived;
        self.users.update(user).await?;
        Ok(())
    }

    pub async fn set_level(&self, id: i64, level: &str) -> AppResult<()> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;

        user.level = level.to_string();
        self.users.update(user).await?;
        Ok(())
    }

    pub async fn active_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.users.find_active().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn archived_users(&self) -> AppResult<Vec<UserDto>> {
        let users = self.users.find_archived().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn users_by_role(&self, role_name: &str) -> AppResult<Vec<UserDto>> {
        // The role must exist; an unknown role name is a caller mistake,
        // not an empty result.
        self.roles
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role '{}' not found", role_name)))?;

        let users = self.users.find_by_role(role_name).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn user_by_id(&self, id: i64) -> AppResult<UserDto> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;

        Ok(UserDto::from(user))
    }
}
