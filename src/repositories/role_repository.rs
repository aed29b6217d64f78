use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Role,
};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn create(&self, role: Role) -> AppResult<Role>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>>;
    async fn find_active(&self) -> AppResult<Vec<Role>>;
    async fn find_archived(&self) -> AppResult<Vec<Role>>;
    async fn update(&self, role: Role) -> AppResult<Role>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct MongoRoleRepository {
    collection: Collection<Role>,
}

impl MongoRoleRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("roles");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("name_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on roles.name");

        Ok(())
    }
}

#[async_trait]
impl RoleRepository for MongoRoleRepository {
    async fn create(&self, role: Role) -> AppResult<Role> {
        self.collection.insert_one(&role).await?;
        Ok(role)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let role = self.collection.find_one(doc! { "name": name }).await?;
        Ok(role)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        let role = self.collection.find_one(doc! { "id": id }).await?;
        Ok(role)
    }

    async fn find_active(&self) -> AppResult<Vec<Role>> {
        let cursor = self.collection.find(doc! { "archived": false }).await?;
        let roles: Vec<Role> = cursor.try_collect().await?;
        Ok(roles)
    }

    async fn find_archived(&self) -> AppResult<Vec<Role>> {
        let cursor = self.collection.find(doc! { "archived": true }).await?;
        let roles: Vec<Role> = cursor.try_collect().await?;
        Ok(roles)
    }

    async fn update(&self, role: Role) -> AppResult<Role> {
        let filter = doc! { "id": role.id };
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(filter, &role)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Role with id '{}' not found",
                role.id
            )));
        }

        Ok(role)
    }

    async fn count(&self) -> AppResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
