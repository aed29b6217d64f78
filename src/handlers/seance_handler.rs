use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{EmailQuery, NiveauQuery, SeanceUploadForm},
    services::CreateSeance,
};

/// Creates a course session from a multipart form. The banner image arrives
/// as a file part; the owning teacher is resolved from the `email` field.
#[post("/seance/ajout")]
pub async fn create(
    state: web::Data<AppState>,
    form: MultipartForm<SeanceUploadForm>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    state
        .seance_service
        .create(CreateSeance {
            link: &form.lien,
            title: &form.titre,
            level: &form.niveau,
            module: &form.module,
            description: &form.description,
            image: &form.image.data,
            teacher_email: &form.email,
        })
        .await?;

    Ok(HttpResponse::Ok().body("true"))
}

#[get("/seance/allseance")]
pub async fn list_all(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let seances = state.seance_service.list_all().await?;
    Ok(HttpResponse::Ok().json(seances))
}

#[get("/seance/seancebyuser")]
pub async fn list_by_teacher(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let seances = state.seance_service.list_by_teacher(&query.email).await?;
    Ok(HttpResponse::Ok().json(seances))
}

#[get("/seance/seancebyniveau")]
pub async fn list_by_level(
    state: web::Data<AppState>,
    query: web::Query<NiveauQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let seances = state.seance_service.list_by_level(&query.niveau).await?;
    Ok(HttpResponse::Ok().json(seances))
}
