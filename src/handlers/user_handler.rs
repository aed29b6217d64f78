use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{
        ChangePasswordRequest, CreateUserRequest, EmailQuery, IdQuery, RoleQuery, SetLevelQuery,
    },
};

/// Registers a user under the role named in the `profil` query parameter.
/// Answers the endpoint's boolean contract: "true" on success, "false" when
/// the email is already registered.
#[post("/user/ajout")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
    query: web::Query<RoleQuery>,
) -> Result<HttpResponse, AppError> {
    let created = state
        .user_service
        .register(request.into_inner(), &query.profil)
        .await?;

    Ok(HttpResponse::Ok().body(if created { "true" } else { "false" }))
}

#[post("/user/renitialisermp")]
pub async fn request_password_reset(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    state.user_service.request_password_reset(&query.email).await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[post("/user/modifiermp")]
pub async fn change_password(
    state: web::Data<AppState>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .user_service
        .change_password(&request.token, &request.password)
        .await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[get("/user/affichagearchiverisfalse")]
pub async fn list_active(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.user_service.active_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/user/affichagearchiveristrue")]
pub async fn list_archived(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.user_service.archived_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[put("/user/archiver")]
pub async fn archive(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.set_archived(query.id, true).await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[put("/user/desarchiver")]
pub async fn unarchive(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.set_archived(query.id, false).await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[get("/user/afficherbyprofil")]
pub async fn list_by_role(
    state: web::Data<AppState>,
    query: web::Query<RoleQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.user_service.users_by_role(&query.profil).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/user/afficherbyid")]
pub async fn get_by_id(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.user_by_id(query.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/user/niveau")]
pub async fn set_level(
    state: web::Data<AppState>,
    query: web::Query<SetLevelQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.set_level(query.id, &query.niveau).await?;
    Ok(HttpResponse::Ok().body("true"))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() { "ready" } else { "not_ready" };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
