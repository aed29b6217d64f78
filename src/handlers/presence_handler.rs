use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{PresenceCountQuery, PresenceQuery, PresenceRequest, SeanceIdQuery},
};

/// Records a student check-in for a seance. The student and seance are taken
/// from query parameters; the body only carries the check-in date.
#[post("/presence/Ajout")]
pub async fn record(
    state: web::Data<AppState>,
    query: web::Query<PresenceQuery>,
    request: web::Json<PresenceRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .presence_service
        .record(&query.email, query.idseance, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().body("true"))
}

#[get("/presence/preseancebyseance")]
pub async fn list_by_seance(
    state: web::Data<AppState>,
    query: web::Query<SeanceIdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let presences = state.presence_service.by_seance(query.idseance).await?;
    Ok(HttpResponse::Ok().json(presences))
}

/// Returns the number of check-ins a student has at a given level, as a bare
/// integer body.
#[get("/presence/presencebyetudiant")]
pub async fn count_for_student(
    state: web::Data<AppState>,
    query: web::Query<PresenceCountQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let count = state
        .presence_service
        .count_for_student_at_level(&query.email, &query.niveau)
        .await?;

    Ok(HttpResponse::Ok().json(count))
}
