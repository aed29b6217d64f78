use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{
        CreateQuestionRequest, GenerateQuestionsForm, QuizSubmission, TriviaQuery,
    },
};

/// Fetches a prepared trivia question set from the external provider. The
/// `level` parameter maps to the provider's difficulty, `category` to its
/// numeric category id.
#[get("/api/chat/getQuestions")]
pub async fn external_questions(
    state: web::Data<AppState>,
    query: web::Query<TriviaQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .quiz_service
        .fetch_external_questions(query.level.as_deref(), query.category.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(questions))
}

/// Synthesizes quiz questions from an uploaded course document.
#[post("/api/quiz/generateQuestions")]
pub async fn generate_questions(
    state: web::Data<AppState>,
    form: MultipartForm<GenerateQuestionsForm>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .quiz_service
        .generate_questions_from_document(&form.file.data)?;

    Ok(HttpResponse::Ok().json(questions))
}

#[get("/api/questions")]
pub async fn list_questions(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let questions = state.quiz_service.all_questions().await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/questions")]
pub async fn add_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.quiz_service.add_question(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(question))
}

/// Scores submitted answers against the stored question bank and returns the
/// score as a bare integer body.
#[post("/api/questions/submit")]
pub async fn submit(
    state: web::Data<AppState>,
    submission: web::Json<QuizSubmission>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let score = state.quiz_service.score_submission(&submission).await?;
    Ok(HttpResponse::Ok().json(score))
}
