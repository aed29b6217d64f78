use std::sync::Arc;

use validator::Validate;

use crate::{
    db::IdAllocator,
    errors::{AppError, AppResult},
    models::{domain::Role, dto::request::CreateRoleRequest},
    repositories::RoleRepository,
};

pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    ids: Arc<dyn IdAllocator>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleRepository>, ids: Arc<dyn IdAllocator>) -> Self {
        Self { roles, ids }
    }

    /// Creates a role. Returns false (not an error) when the name is already
    /// taken, matching the boolean contract of the creation endpoint.
    pub async fn create(&self, request: CreateRoleRequest) -> AppResult<bool> {
        request.validate()?;

        if self.roles.find_by_name(&request.name).await?.is_some() {
            return Ok(false);
        }

        let id = self.ids.next_id("roles").await?;
        self.roles.create(Role::new(id, &request.name)).await?;
        Ok(true)
    }

    pub async fn active_roles(&self) -> AppResult<Vec<Role>> {
        self.roles.find_active().await
    }

    pub async fn archived_roles(&self) -> AppResult<Vec<Role>> {
        self.roles.find_archived().await
    }

    pub async fn role_by_id(&self, id: i64) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role with id '{}' not found", id)))
    }

    /// Archiving a role hides it from the active listing; users already
    /// holding the role keep it.
    pub async fn set_archived(&self, id: i64, archived: bool) -> AppResult<()> {
        let mut role = self.role_by_id(id).await?;
        role.archived = archived;
        self.roles.update(role).await?;
        Ok(())
    }
}
