use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Presence};

#[async_trait]
pub trait PresenceRepository: Send + Sync {
    async fn create(&self, presence: Presence) -> AppResult<Presence>;
    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Presence>>;
    async fn find_by_student_and_level(
        &self,
        student_id: i64,
        level: &str,
    ) -> AppResult<Vec<Presence>>;
    async fn exists_for_student_and_seance(
        &self,
        student_id: i64,
        seance_id: i64,
    ) -> AppResult<bool>;
}

pub struct MongoPresenceRepository {
    collection: Collection<Presence>,
}

impl MongoPresenceRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("presences");
        Self { collection }
    }
}

#[async_trait]
impl PresenceRepository for MongoPresenceRepository {
    async fn create(&self, presence: Presence) -> AppResult<Presence> {
        self.collection.insert_one(&presence).await?;
        Ok(presence)
    }

    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Presence>> {
        let cursor = self.collection.find(doc! { "seance_id": seance_id }).await?;
        let presences: Vec<Presence> = cursor.try_collect().await?;
        Ok(presences)
    }

    async fn find_by_student_and_level(
        &self,
        student_id: i64,
        level: &str,
    ) -> AppResult<Vec<Presence>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id, "level": level })
            .await?;
        let presences: Vec<Presence> = cursor.try_collect().await?;
        Ok(presences)
    }

    async fn exists_for_student_and_seance(
        &self,
        student_id: i64,
        seance_id: i64,
    ) -> AppResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "student_id": student_id, "seance_id": seance_id })
            .await?;
        Ok(count > 0)
    }
}
