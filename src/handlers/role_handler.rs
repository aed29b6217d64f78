use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateRoleRequest, IdQuery},
};

/// Creates a role ("profil"). "true" on success, "false" when the name is
/// already taken.
#[post("/profil/ajouter")]
pub async fn create(
    state: web::Data<AppState>,
    request: web::Json<CreateRoleRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let created = state.role_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Ok().body(if created { "true" } else { "false" }))
}

#[get("/profil/affichagelistnonarchiver")]
pub async fn list_active(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let roles = state.role_service.active_roles().await?;
    Ok(HttpResponse::Ok().json(roles))
}

#[get("/profil/affichagelistarchiver")]
pub async fn list_archived(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let roles = state.role_service.archived_roles().await?;
    Ok(HttpResponse::Ok().json(roles))
}

#[get("/profil/affichagebyid")]
pub async fn get_by_id(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let role = state.role_service.role_by_id(query.id).await?;
    Ok(HttpResponse::Ok().json(role))
}

#[put("/profil/archiver")]
pub async fn archive(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.role_service.set_archived(query.id, true).await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[put("/profil/desarchiver")]
pub async fn unarchive(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.role_service.set_archived(query.id, false).await?;
    Ok(HttpResponse::Ok().body("true"))
}
