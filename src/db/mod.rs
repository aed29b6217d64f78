use std::time::Duration;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Sequence allocation seam, so services do not depend on the concrete
/// store and tests can hand out ids from a counter in memory.
#[async_trait::async_trait]
pub trait IdAllocator: Send + Sync {
    async fn next_id(&self, sequence: &str) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Successfully connected to MongoDB");

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

#[async_trait::async_trait]
impl IdAllocator for Database {
    /// Allocates the next value of a named numeric sequence. Entity ids are
    /// sequential integers, matching the relational schema they mirror.
    async fn next_id(&self, sequence: &str) -> AppResult<i64> {
        let counters: Collection<Document> = self.get_collection("counters");

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let updated = counters
            .find_one_and_update(
                doc! { "_id": sequence },
                doc! { "$inc": { "value": 1i64 } },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(format!("Counter '{}' missing after upsert", sequence))
            })?;

        updated
            .get_i64("value")
            .map_err(|e| AppError::DatabaseError(format!("Corrupt counter '{}': {}", sequence, e)))
    }
}
