use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Seance};

#[async_trait]
pub trait SeanceRepository: Send + Sync {
    async fn create(&self, seance: Seance) -> AppResult<Seance>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Seance>>;
    async fn find_all(&self) -> AppResult<Vec<Seance>>;
    async fn find_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Seance>>;
    async fn find_by_level(&self, level: &str) -> AppResult<Vec<Seance>>;
}

pub struct MongoSeanceRepository {
    collection: Collection<Seance>,
}

impl MongoSeanceRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("seances");
        Self { collection }
    }
}

#[async_trait]
impl SeanceRepository for MongoSeanceRepository {
    async fn create(&self, seance: Seance) -> AppResult<Seance> {
        self.collection.insert_one(&seance).await?;
        Ok(seance)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Seance>> {
        let seance = self.collection.find_one(doc! { "id": id }).await?;
        Ok(seance)
    }

    async fn find_all(&self) -> AppResult<Vec<Seance>> {
        let cursor = self.collection.find(doc! {}).await?;
        let seances: Vec<Seance> = cursor.try_collect().await?;
        Ok(seances)
    }

    async fn find_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Seance>> {
        let cursor = self
            .collection
            .find(doc! { "teacher_id": teacher_id })
            .await?;
        let seances: Vec<Seance> = cursor.try_collect().await?;
        Ok(seances)
    }

    async fn find_by_level(&self, level: &str) -> AppResult<Vec<Seance>> {
        let cursor = self.collection.find(doc! { "level": level }).await?;
        let seances: Vec<Seance> = cursor.try_collect().await?;
        Ok(seances)
    }
}
