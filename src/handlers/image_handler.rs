use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::GenerateImageRequest,
};

/// Proxies an image-generation request to the configured upstream and relays
/// its JSON response unchanged.
#[post("/image/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    request: web::Json<GenerateImageRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.image_generator.generate(&request.prompt).await?;
    Ok(HttpResponse::Ok().json(response))
}
