use actix_multipart::form::MultipartForm;
use actix_web::{get, http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{FichierUploadForm, IdQuery},
};

/// Attaches a document and its thumbnail to a seance.
#[post("/fichier/ajout")]
pub async fn upload(
    state: web::Data<AppState>,
    form: MultipartForm<FichierUploadForm>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    state
        .fichier_service
        .upload(*form.id, &form.name, &form.fichier.data, &form.image.data)
        .await?;

    Ok(HttpResponse::Ok().body("true"))
}

/// Streams the stored document back as a PDF download.
#[get("/fichier/pdf")]
pub async fn download_document(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let bytes = state.fichier_service.document_bytes(query.id).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"fichier-{}.pdf\"", query.id),
        ))
        .body(bytes))
}

#[get("/fichier/pdftext")]
pub async fn document_text(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let text = state.fichier_service.document_text(query.id).await?;
    Ok(HttpResponse::Ok().body(text))
}

#[get("/fichier/afficherbycours")]
pub async fn list_by_seance(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let fichiers = state.fichier_service.by_seance(query.id).await?;
    Ok(HttpResponse::Ok().json(fichiers))
}

#[get("/fichier/afficherimagebycours")]
pub async fn list_images_by_seance(
    state: web::Data<AppState>,
    query: web::Query<IdQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let fichiers = state.fichier_service.images_by_seance(query.id).await?;
    Ok(HttpResponse::Ok().json(fichiers))
}
