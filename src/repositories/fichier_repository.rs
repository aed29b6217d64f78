use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Fichier};

#[async_trait]
pub trait FichierRepository: Send + Sync {
    async fn create(&self, fichier: Fichier) -> AppResult<Fichier>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Fichier>>;
    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Fichier>>;
}

pub struct MongoFichierRepository {
    collection: Collection<Fichier>,
}

impl MongoFichierRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("fichiers");
        Self { collection }
    }
}

#[async_trait]
impl FichierRepository for MongoFichierRepository {
    async fn create(&self, fichier: Fichier) -> AppResult<Fichier> {
        self.collection.insert_one(&fichier).await?;
        Ok(fichier)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Fichier>> {
        let fichier = self.collection.find_one(doc! { "id": id }).await?;
        Ok(fichier)
    }

    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Fichier>> {
        let cursor = self.collection.find(doc! { "seance_id": seance_id }).await?;
        let fichiers: Vec<Fichier> = cursor.try_collect().await?;
        Ok(fichiers)
    }
}
