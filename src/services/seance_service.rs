use std::sync::Arc;

use crate::{
    compression::{compress_bytes, decompress_bytes},
    db::IdAllocator,
    errors::{AppError, AppResult},
    models::{domain::Seance, dto::response::SeanceDto},
    repositories::{SeanceRepository, UserRepository},
};

pub struct CreateSeance<'a> {
    pub link: &'a str,
    pub title: &'a str,
    pub level: &'a str,
    pub module: &'a str,
    pub description: &'a str,
    pub image: &'a [u8],
    pub teacher_email: &'a str,
}

pub struct SeanceService {
    seances: Arc<dyn SeanceRepository>,
    users: Arc<dyn UserRepository>,
    ids: Arc<dyn IdAllocator>,
}

impl SeanceService {
    pub fn new(
        seances: Arc<dyn SeanceRepository>,
        users: Arc<dyn UserRepository>,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        Self { seances, users, ids }
    }

    /// Creates a seance owned by the teacher resolved from `teacher_email`.
    /// The banner image is compressed before it is stored; the creation date
    /// is stamped server-side.
    pub async fn create(&self, request: CreateSeance<'_>) -> AppResult<Seance> {
        let teacher = self
            .users
            .find_by_email(request.teacher_email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Teacher with email '{}' not found",
                    request.teacher_email
                ))
            })?;

        let id = self.ids.next_id("seances").await?;
        let compressed = compress_bytes(request.image)?;

        let seance = Seance::new(
            id,
            request.link,
            request.title,
            request.level,
            request.module,
            request.description,
            compressed,
            teacher.id,
            &teacher.email,
        );

        self.seances.create(seance).await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Seance> {
        self.seances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Seance with id '{}' not found", id)))
    }

    pub async fn list_all(&self) -> AppResult<Vec<SeanceDto>> {
        let seances = self.seances.find_all().await?;
        Self::to_transport(seances)
    }

    pub async fn list_by_teacher(&self, teacher_email: &str) -> AppResult<Vec<SeanceDto>> {
        let teacher = self
            .users
            .find_by_email(teacher_email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Teacher with email '{}' not found",
                    teacher_email
                ))
            })?;

        let seances = self.seances.find_by_teacher(teacher.id).await?;
        Self::to_transport(seances)
    }

    pub async fn list_by_level(&self, level: &str) -> AppResult<Vec<SeanceDto>> {
        let seances = self.seances.find_by_level(level).await?;
        Self::to_transport(seances)
    }

    // Stored bytes are always compressed; transport bytes are always raw.
    fn to_transport(seances: Vec<Seance>) -> AppResult<Vec<SeanceDto>> {
        seances
            .into_iter()
            .map(|seance| {
                let raw = decompress_bytes(&seance.image)?;
                Ok(SeanceDto::from_seance(seance, &raw))
            })
            .collect()
    }
}
