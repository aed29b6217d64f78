use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use campus_server::{
    app_state::AppState,
    auth::{AuthMiddleware, RoutePolicy},
    config::Config,
    handlers::{
        auth_handler, fichier_handler, image_handler, presence_handler, quiz_handler,
        role_handler, seance_handler, user_handler,
    },
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        std::io::Error::other(format!("Failed to initialize application state: {}", e))
    })?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let jwt_service = state.jwt_service.as_ref().clone();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jwt_service))
            .app_data(web::Data::new(RoutePolicy::permissive()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
            // Open routes: login, registration and the password-reset flow.
            .service(auth_handler::login)
            .service(user_handler::register)
            .service(user_handler::request_password_reset)
            .service(user_handler::change_password)
            .service(user_handler::health_check)
            .service(user_handler::health_check_live)
            .service(user_handler::health_check_ready)
            // Everything else requires a valid bearer token.
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(user_handler::list_active)
                    .service(user_handler::list_archived)
                    .service(user_handler::archive)
                    .service(user_handler::unarchive)
                    .service(user_handler::list_by_role)
                    .service(user_handler::get_by_id)
                    .service(user_handler::set_level)
                    .service(role_handler::create)
                    .service(role_handler::list_active)
                    .service(role_handler::list_archived)
                    .service(role_handler::get_by_id)
                    .service(role_handler::archive)
                    .service(role_handler::unarchive)
                    .service(seance_handler::create)
                    .service(seance_handler::list_all)
                    .service(seance_handler::list_by_teacher)
                    .service(seance_handler::list_by_level)
                    .service(presence_handler::record)
                    .service(presence_handler::list_by_seance)
                    .service(presence_handler::count_for_student)
                    .service(fichier_handler::upload)
                    .service(fichier_handler::download_document)
                    .service(fichier_handler::document_text)
                    .service(fichier_handler::list_by_seance)
                    .service(fichier_handler::list_images_by_seance)
                    .service(quiz_handler::external_questions)
                    .service(quiz_handler::generate_questions)
                    .service(quiz_handler::list_questions)
                    .service(quiz_handler::add_question)
                    .service(quiz_handler::submit)
                    .service(image_handler::generate),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
