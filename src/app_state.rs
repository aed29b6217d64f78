use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::{Database, IdAllocator},
    errors::AppResult,
    integrations::{
        ImageGenerator, OpenAiImageClient, OpenTdbClient, PdfTextExtractor, SmtpMailSender,
    },
    repositories::{
        MongoFichierRepository, MongoPresenceRepository, MongoQuestionRepository,
        MongoRoleRepository, MongoSeanceRepository, MongoUserRepository,
    },
    seed,
    services::{
        AuthService, FichierService, PresenceService, QuizService, RoleService, SeanceService,
        UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub seance_service: Arc<SeanceService>,
    pub presence_service: Arc<PresenceService>,
    pub fichier_service: Arc<FichierService>,
    pub quiz_service: Arc<QuizService>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub jwt_service: Arc<JwtService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let ids: Arc<dyn IdAllocator> = Arc::new(db.clone());

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let role_repository = Arc::new(MongoRoleRepository::new(&db));
        role_repository.ensure_indexes().await?;

        let seance_repository = Arc::new(MongoSeanceRepository::new(&db));
        let presence_repository = Arc::new(MongoPresenceRepository::new(&db));
        let fichier_repository = Arc::new(MongoFichierRepository::new(&db));
        let question_repository = Arc::new(MongoQuestionRepository::new(&db));

        seed::initialize(
            user_repository.clone(),
            role_repository.clone(),
            ids.clone(),
            &config.seed_file,
        )
        .await?;

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.reset_token_expiration_hours,
        ));

        let mail_sender = Arc::new(SmtpMailSender::new(
            &config.smtp_host,
            &config.smtp_username,
            &config.smtp_password,
            &config.mail_from,
        )?);
        let trivia_client = Arc::new(OpenTdbClient::new(&config.trivia_base_url));
        let pdf_extractor = Arc::new(PdfTextExtractor);
        let image_generator: Arc<dyn ImageGenerator> =
            Arc::new(OpenAiImageClient::new(config.openai_api_key.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            jwt_service.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            role_repository.clone(),
            ids.clone(),
            jwt_service.clone(),
            mail_sender,
            &config.frontend_base_url,
        ));
        let role_service = Arc::new(RoleService::new(role_repository.clone(), ids.clone()));
        let seance_service = Arc::new(SeanceService::new(
            seance_repository.clone(),
            user_repository.clone(),
            ids.clone(),
        ));
        let presence_service = Arc::new(PresenceService::new(
            presence_repository,
            seance_repository.clone(),
            user_repository,
            ids.clone(),
            config.allow_duplicate_checkins,
        ));
        let fichier_service = Arc::new(FichierService::new(
            fichier_repository,
            seance_repository,
            ids.clone(),
            pdf_extractor.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            question_repository,
            ids,
            trivia_client,
            pdf_extractor,
        ));

        Ok(Self {
            auth_service,
            user_service,
            role_service,
            seance_service,
            presence_service,
            fichier_service,
            quiz_service,
            image_generator,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}
