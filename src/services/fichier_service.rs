use std::sync::Arc;

use crate::{
    compression::{compress_bytes, decompress_bytes},
    db::IdAllocator,
    errors::{AppError, AppResult},
    integrations::DocumentTextExtractor,
    models::{domain::Fichier, dto::response::FichierDto},
    repositories::{FichierRepository, SeanceRepository},
};

pub struct FichierService {
    fichiers: Arc<dyn FichierRepository>,
    seances: Arc<dyn SeanceRepository>,
    ids: Arc<dyn IdAllocator>,
    extractor: Arc<dyn DocumentTextExtractor>,
}

impl FichierService {
    pub fn new(
        fichiers: Arc<dyn FichierRepository>,
        seances: Arc<dyn SeanceRepository>,
        ids: Arc<dyn IdAllocator>,
        extractor: Arc<dyn DocumentTextExtractor>,
    ) -> Self {
        Self {
            fichiers,
            seances,
            ids,
            extractor,
        }
    }

    /// Attaches a file to a seance. The document payload is stored verbatim;
    /// the thumbnail image is stored compressed. Either the whole upload
    /// succeeds or nothing is persisted.
    pub async fn upload(
        &self,
        seance_id: i64,
        name: &str,
        file_bytes: &[u8],
        image_bytes: &[u8],
    ) -> AppResult<Fichier> {
        let seance = self
            .seances
            .find_by_id(seance_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Seance with id '{}' not found", seance_id))
            })?;

        let id = self.ids.next_id("fichiers").await?;
        let compressed_image = compress_bytes(image_bytes)?;
        let fichier = Fichier::new(id, name, file_bytes.to_vec(), compressed_image, seance.id);

        self.fichiers.create(fichier).await
    }

    pub async fn document_bytes(&self, id: i64) -> AppResult<Vec<u8>> {
        let fichier = self
            .fichiers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File with id '{}' not found", id)))?;

        Ok(fichier.data)
    }

    pub async fn document_text(&self, id: i64) -> AppResult<String> {
        let fichier = self
            .fichiers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File with id '{}' not found", id)))?;

        self.extractor.extract_text(&fichier.data)
    }

    pub async fn by_seance(&self, seance_id: i64) -> AppResult<Vec<FichierDto>> {
        self.require_seance(seance_id).await?;

        let fichiers = self.fichiers.find_by_seance(seance_id).await?;
        Ok(fichiers.iter().map(FichierDto::with_data).collect())
    }

    pub async fn images_by_seance(&self, seance_id: i64) -> AppResult<Vec<FichierDto>> {
        self.require_seance(seance_id).await?;

        let fichiers = self.fichiers.find_by_seance(seance_id).await?;
        fichiers
            .iter()
            .map(|fichier| {
                let raw = decompress_bytes(&fichier.image)?;
                Ok(FichierDto::with_image(fichier, &raw))
            })
            .collect()
    }

    async fn require_seance(&self, seance_id: i64) -> AppResult<()> {
        self.seances
            .find_by_id(seance_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Seance with id '{}' not found", seance_id))
            })?;
        Ok(())
    }
}
