use std::sync::Arc;

use crate::{
    db::IdAllocator,
    errors::{AppError, AppResult},
    models::{
        domain::Presence,
        dto::{request::PresenceRequest, response::PresenceDto},
    },
    repositories::{PresenceRepository, SeanceRepository, UserRepository},
};

pub struct PresenceService {
    presences: Arc<dyn PresenceRepository>,
    seances: Arc<dyn SeanceRepository>,
    users: Arc<dyn UserRepository>,
    ids: Arc<dyn IdAllocator>,
    /// Duplicate check-ins for the same (student, seance) are allowed by
    /// default; deduplication is an explicit policy choice, not an assumption.
    allow_duplicate_checkins: bool,
}

impl PresenceService {
    pub fn new(
        presences: Arc<dyn PresenceRepository>,
        seances: Arc<dyn SeanceRepository>,
        users: Arc<dyn UserRepository>,
        ids: Arc<dyn IdAllocator>,
        allow_duplicate_checkins: bool,
    ) -> Self {
        Self {
            presences,
            seances,
            users,
            ids,
            allow_duplicate_checkins,
        }
    }

    /// Records a student check-in. The level is copied from the seance at
    /// creation time, never taken from the caller.
    pub async fn record(
        &self,
        student_email: &str,
        seance_id: i64,
        request: PresenceRequest,
    ) -> AppResult<Presence> {
        let student = self
            .users
            .find_by_email(student_email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Student with email '{}' not found",
                    student_email
                ))
            })?;

        let seance = self
            .seances
            .find_by_id(seance_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Seance with id '{}' not found", seance_id))
            })?;

        if !self.allow_duplicate_checkins
            && self
                .presences
                .exists_for_student_and_seance(student.id, seance.id)
                .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Student '{}' already checked in to seance '{}'",
                student.username, seance.id
            )));
        }

        let id = self.ids.next_id("presences").await?;
        let presence = Presence::new(id, request.date, &seance.level, seance.id, student.id);

        self.presences.create(presence).await
    }

    pub async fn by_seance(&self, seance_id: i64) -> AppResult<Vec<PresenceDto>> {
        self.seances
            .find_by_id(seance_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Seance with id '{}' not found", seance_id))
            })?;

        let presences = self.presences.find_by_seance(seance_id).await?;
        Ok(presences.into_iter().map(PresenceDto::from).collect())
    }

    pub async fn count_for_student_at_level(
        &self,
        student_email: &str,
        level: &str,
    ) -> AppResult<usize> {
        let student = self
            .users
            .find_by_email(student_email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Student with email '{}' not found",
                    student_email
                ))
            })?;

        let presences = self
            .presences
            .find_by_student_and_level(student.id, level)
            .await?;
        Ok(presences.len())
    }
}
