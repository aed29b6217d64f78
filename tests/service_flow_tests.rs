use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tokio::sync::RwLock;

use campus_server::{
    auth::JwtService,
    db::IdAllocator,
    errors::{AppError, AppResult},
    integrations::{DocumentTextExtractor, MailSender, RawTriviaQuestion, TriviaProvider},
    models::{
        domain::{Fichier, Presence, Question, Role, Seance, User},
        dto::request::{
            CreateQuestionRequest, CreateRoleRequest, CreateUserRequest, PresenceRequest,
            QuizSubmission,
        },
    },
    repositories::{
        FichierRepository, PresenceRepository, QuestionRepository, RoleRepository,
        SeanceRepository, UserRepository,
    },
    services::{
        AuthService, CreateSeance, FichierService, PresenceService, QuizService, RoleService,
        SeanceService, UserService,
    },
};
use secrecy::SecretString;

// ---------------------------------------------------------------------------
// In-memory collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct InMemoryIdAllocator {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl IdAllocator for InMemoryIdAllocator {
    async fn next_id(&self, sequence: &str) -> AppResult<i64> {
        let mut counters = self.counters.lock().unwrap();
        let next = counters.entry(sequence.to_string()).or_insert(0);
        *next += 1;
        Ok(*next)
    }
}

#[derive(Default)]
struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_active(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| !u.archived).cloned().collect())
    }

    async fn find_archived(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.archived).cloned().collect())
    }

    async fn find_by_role(&self, role: &str) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.role == role).cloned().collect())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user.id
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn count(&self) -> AppResult<u64> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }
}

#[derive(Default)]
struct InMemoryRoleRepository {
    roles: RwLock<HashMap<i64, Role>>,
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, role: Role) -> AppResult<Role> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.name == role.name) {
            return Err(AppError::AlreadyExists(format!(
                "Role '{}' already exists",
                role.name
            )));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.name == name).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(&id).cloned())
    }

    async fn find_active(&self) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().filter(|r| !r.archived).cloned().collect())
    }

    async fn find_archived(&self) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().filter(|r| r.archived).cloned().collect())
    }

    async fn update(&self, role: Role) -> AppResult<Role> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role.id) {
            return Err(AppError::NotFound(format!(
                "Role with id '{}' not found",
                role.id
            )));
        }
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn count(&self) -> AppResult<u64> {
        let roles = self.roles.read().await;
        Ok(roles.len() as u64)
    }
}

#[derive(Default)]
struct InMemorySeanceRepository {
    seances: RwLock<HashMap<i64, Seance>>,
}

#[async_trait]
impl SeanceRepository for InMemorySeanceRepository {
    async fn create(&self, seance: Seance) -> AppResult<Seance> {
        let mut seances = self.seances.write().await;
        seances.insert(seance.id, seance.clone());
        Ok(seance)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Seance>> {
        let seances = self.seances.read().await;
        Ok(seances.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Seance>> {
        let seances = self.seances.read().await;
        Ok(seances.values().cloned().collect())
    }

    async fn find_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Seance>> {
        let seances = self.seances.read().await;
        Ok(seances
            .values()
            .filter(|s| s.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn find_by_level(&self, level: &str) -> AppResult<Vec<Seance>> {
        let seances = self.seances.read().await;
        Ok(seances
            .values()
            .filter(|s| s.level == level)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryPresenceRepository {
    presences: RwLock<HashMap<i64, Presence>>,
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn create(&self, presence: Presence) -> AppResult<Presence> {
        let mut presences = self.presences.write().await;
        presences.insert(presence.id, presence.clone());
        Ok(presence)
    }

    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Presence>> {
        let presences = self.presences.read().await;
        Ok(presences
            .values()
            .filter(|p| p.seance_id == seance_id)
            .cloned()
            .collect())
    }

    async fn find_by_student_and_level(
        &self,
        student_id: i64,
        level: &str,
    ) -> AppResult<Vec<Presence>> {
        let presences = self.presences.read().await;
        Ok(presences
            .values()
            .filter(|p| p.student_id == student_id && p.level == level)
            .cloned()
            .collect())
    }

    async fn exists_for_student_and_seance(
        &self,
        student_id: i64,
        seance_id: i64,
    ) -> AppResult<bool> {
        let presences = self.presences.read().await;
        Ok(presences
            .values()
            .any(|p| p.student_id == student_id && p.seance_id == seance_id))
    }
}

#[derive(Default)]
struct InMemoryFichierRepository {
    fichiers: RwLock<HashMap<i64, Fichier>>,
}

#[async_trait]
impl FichierRepository for InMemoryFichierRepository {
    async fn create(&self, fichier: Fichier) -> AppResult<Fichier> {
        let mut fichiers = self.fichiers.write().await;
        fichiers.insert(fichier.id, fichier.clone());
        Ok(fichier)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Fichier>> {
        let fichiers = self.fichiers.read().await;
        Ok(fichiers.get(&id).cloned())
    }

    async fn find_by_seance(&self, seance_id: i64) -> AppResult<Vec<Fichier>> {
        let fichiers = self.fichiers.read().await;
        Ok(fichiers
            .values()
            .filter(|f| f.seance_id == seance_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<i64, Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.values().cloned().collect())
    }
}

/// Captures outgoing mail instead of talking to an SMTP relay.
#[derive(Default)]
struct RecordingMailSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl MailSender for RecordingMailSender {
    fn send_password_reset(&self, to: &str, reset_link: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), reset_link.to_string()));
        Ok(())
    }
}

/// Serves a fixed question list and records the category it was asked for.
struct StubTriviaProvider {
    questions: Vec<RawTriviaQuestion>,
    requested_category: Mutex<Option<Option<u32>>>,
}

impl StubTriviaProvider {
    fn new(questions: Vec<RawTriviaQuestion>) -> Self {
        Self {
            questions,
            requested_category: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TriviaProvider for StubTriviaProvider {
    async fn fetch_questions(
        &self,
        _difficulty: &str,
        category_id: Option<u32>,
    ) -> AppResult<Vec<RawTriviaQuestion>> {
        *self.requested_category.lock().unwrap() = Some(category_id);
        Ok(self.questions.clone())
    }
}

/// Returns the document bytes as UTF-8 text, skipping real PDF parsing.
struct PassthroughExtractor;

impl DocumentTextExtractor for PassthroughExtractor {
    fn extract_text(&self, document: &[u8]) -> AppResult<String> {
        String::from_utf8(document.to_vec())
            .map_err(|e| AppError::ExtractionError(format!("Not UTF-8: {}", e)))
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    jwt: Arc<JwtService>,
    ids: Arc<InMemoryIdAllocator>,
    mail: Arc<RecordingMailSender>,
    auth_service: AuthService,
    user_service: UserService,
    role_service: RoleService,
}

impl Fixture {
    async fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let roles = Arc::new(InMemoryRoleRepository::default());
        let ids = Arc::new(InMemoryIdAllocator::default());
        let mail = Arc::new(RecordingMailSender::default());
        let jwt = Arc::new(JwtService::new(
            &SecretString::from("integration_test_secret".to_string()),
            1,
            1,
        ));

        let auth_service = AuthService::new(users.clone(), jwt.clone());
        let role_service = RoleService::new(roles.clone(), ids.clone());
        let user_service = UserService::new(
            users.clone(),
            roles,
            ids.clone(),
            jwt.clone(),
            mail.clone(),
            "http://localhost:4200",
        );

        for name in ["Etudiant", "Enseignant"] {
            role_service
                .create(CreateRoleRequest {
                    name: name.to_string(),
                })
                .await
                .expect("seed role");
        }

        Fixture {
            users,
            jwt,
            ids,
            mail,
            auth_service,
            user_service,
            role_service,
        }
    }

    fn registration(email: &str) -> CreateUserRequest {
        serde_json::from_value(serde_json::json!({
            "last_name": "Benali",
            "first_name": "Ahmed",
            "email": email,
            "phone": 422001,
            "class_name": "3eme annee",
            "level": "L3",
            "password": "123456"
        }))
        .expect("valid registration payload")
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn registration_then_login_round_trips() {
    let fx = Fixture::new().await;

    let created = fx
        .user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");
    assert!(created);

    // The email doubles as the login handle.
    let response = fx
        .auth_service
        .authenticate("422001@student.com", "123456")
        .await
        .expect("login");

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.profil, "Etudiant");

    let claims = fx.jwt.validate_token(&response.token).expect("valid token");
    assert_eq!(claims.sub, "422001@student.com");
    assert_eq!(claims.role, "Etudiant");
}

#[actix_rt::test]
async fn duplicate_registration_reports_false_without_error() {
    let fx = Fixture::new().await;

    let first = fx
        .user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");
    let second = fx
        .user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register again");

    assert!(first);
    assert!(!second);
    assert_eq!(fx.users.count().await.unwrap(), 1);
}

#[actix_rt::test]
async fn registration_under_unknown_role_is_rejected() {
    let fx = Fixture::new().await;

    let result = fx
        .user_service
        .register(Fixture::registration("422001@student.com"), "Directeur")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn wrong_password_and_unknown_user_fail_identically() {
    let fx = Fixture::new().await;
    fx.user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");

    let wrong_password = fx
        .auth_service
        .authenticate("422001@student.com", "654321")
        .await;
    let unknown_user = fx.auth_service.authenticate("ghost@student.com", "123456").await;

    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));
}

#[actix_rt::test]
async fn password_reset_link_carries_a_working_token() {
    let fx = Fixture::new().await;
    fx.user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");

    fx.user_service
        .request_password_reset("422001@student.com")
        .await
        .expect("request reset");

    let sent = fx.mail.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "422001@student.com");

    let token = sent[0]
        .1
        .split("token=")
        .nth(1)
        .expect("link carries a token")
        .to_string();

    fx.user_service
        .change_password(&token, "new-password")
        .await
        .expect("change password");

    // The old password no longer works, the new one does.
    assert!(fx
        .auth_service
        .authenticate("422001@student.com", "123456")
        .await
        .is_err());
    assert!(fx
        .auth_service
        .authenticate("422001@student.com", "new-password")
        .await
        .is_ok());
}

#[actix_rt::test]
async fn access_token_is_not_accepted_as_reset_token() {
    let fx = Fixture::new().await;
    fx.user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");

    let login = fx
        .auth_service
        .authenticate("422001@student.com", "123456")
        .await
        .expect("login");

    let result = fx
        .user_service
        .change_password(&login.token, "hijacked")
        .await;
    assert!(matches!(result, Err(AppError::TokenInvalid)));
}

#[actix_rt::test]
async fn archiving_removes_user_from_active_listing() {
    let fx = Fixture::new().await;
    fx.user_service
        .register(Fixture::registration("422001@student.com"), "Etudiant")
        .await
        .expect("register");

    fx.user_service.set_archived(1, true).await.expect("archive");

    assert!(fx.user_service.active_users().await.unwrap().is_empty());
    let archived = fx.user_service.archived_users().await.unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].email, "422001@student.com");
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn duplicate_role_name_reports_false_without_error() {
    let fx = Fixture::new().await;

    let created = fx
        .role_service
        .create(CreateRoleRequest {
            name: "Admin".to_string(),
        })
        .await
        .expect("create role");
    let duplicate = fx
        .role_service
        .create(CreateRoleRequest {
            name: "Admin".to_string(),
        })
        .await
        .expect("create role again");

    assert!(created);
    assert!(!duplicate);
}

#[actix_rt::test]
async fn archiving_a_role_moves_it_between_listings() {
    let fx = Fixture::new().await;

    let etudiant = fx
        .role_service
        .active_roles()
        .await
        .expect("list")
        .into_iter()
        .find(|r| r.name == "Etudiant")
        .expect("seeded role");

    fx.role_service
        .set_archived(etudiant.id, true)
        .await
        .expect("archive");

    let active = fx.role_service.active_roles().await.expect("list");
    assert!(active.iter().all(|r| r.name != "Etudiant"));
    let archived = fx.role_service.archived_roles().await.expect("list");
    assert!(archived.iter().any(|r| r.name == "Etudiant"));

    fx.role_service
        .set_archived(etudiant.id, false)
        .await
        .expect("unarchive");
    let restored = fx.role_service.role_by_id(etudiant.id).await.expect("role");
    assert!(!restored.archived);
}

#[actix_rt::test]
async fn unknown_role_id_is_not_found() {
    let fx = Fixture::new().await;

    let result = fx.role_service.role_by_id(99).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let toggle = fx.role_service.set_archived(99, true).await;
    assert!(matches!(toggle, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Seances, attendance and files
// ---------------------------------------------------------------------------

struct CourseFixture {
    base: Fixture,
    seance_service: SeanceService,
    presence_service: PresenceService,
    fichier_service: FichierService,
}

impl CourseFixture {
    async fn new(allow_duplicate_checkins: bool) -> Self {
        let base = Fixture::new().await;
        let seances = Arc::new(InMemorySeanceRepository::default());
        let presences = Arc::new(InMemoryPresenceRepository::default());
        let fichiers = Arc::new(InMemoryFichierRepository::default());

        let seance_service =
            SeanceService::new(seances.clone(), base.users.clone(), base.ids.clone());
        let presence_service = PresenceService::new(
            presences,
            seances.clone(),
            base.users.clone(),
            base.ids.clone(),
            allow_duplicate_checkins,
        );
        let fichier_service = FichierService::new(
            fichiers,
            seances,
            base.ids.clone(),
            Arc::new(PassthroughExtractor),
        );

        base.user_service
            .register(Fixture::registration("422001@student.com"), "Etudiant")
            .await
            .expect("register student");
        base.user_service
            .register(
                serde_json::from_value(serde_json::json!({
                    "last_name": "Khalil",
                    "first_name": "Fatma",
                    "email": "enseignant@test.com",
                    "class_name": "3eme annee",
                    "level": "L3",
                    "password": "123456"
                }))
                .expect("teacher payload"),
                "Enseignant",
            )
            .await
            .expect("register teacher");

        CourseFixture {
            base,
            seance_service,
            presence_service,
            fichier_service,
        }
    }

    async fn create_seance(&self, image: &[u8]) -> i64 {
        self.seance_service
            .create(CreateSeance {
                link: "https://meet.example.com/algo",
                title: "Algorithmique",
                level: "L3",
                module: "Module 1: Recursion",
                description: "Cours du lundi",
                image,
                teacher_email: "enseignant@test.com",
            })
            .await
            .expect("create seance")
            .id
    }
}

#[actix_rt::test]
async fn seance_image_survives_storage_round_trip() {
    let fx = CourseFixture::new(true).await;
    let image = b"PNG-ish banner bytes, repeated repeated repeated".to_vec();

    let id = fx.create_seance(&image).await;

    // Stored bytes are compressed; transport restores the original.
    let stored = fx.seance_service.find_by_id(id).await.expect("stored");
    assert_ne!(stored.image, image);

    let listed = fx.seance_service.list_all().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].image, BASE64.encode(&image));
    assert_eq!(listed[0].teacher_email, "enseignant@test.com");
}

#[actix_rt::test]
async fn seance_for_unknown_teacher_is_rejected() {
    let fx = CourseFixture::new(true).await;

    let result = fx
        .seance_service
        .create(CreateSeance {
            link: "l",
            title: "t",
            level: "L3",
            module: "m",
            description: "d",
            image: b"img",
            teacher_email: "nobody@test.com",
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn checkin_feeds_per_level_attendance_count() {
    let fx = CourseFixture::new(true).await;
    let seance_id = fx.create_seance(b"img").await;

    fx.presence_service
        .record(
            "422001@student.com",
            seance_id,
            PresenceRequest { date: chrono::Utc::now() },
        )
        .await
        .expect("check in");

    let listed = fx.presence_service.by_seance(seance_id).await.expect("list");
    assert_eq!(listed.len(), 1);
    // The level comes from the seance, not from the caller.
    assert_eq!(listed[0].level, "L3");

    let count = fx
        .presence_service
        .count_for_student_at_level("422001@student.com", "L3")
        .await
        .expect("count");
    assert_eq!(count, 1);

    let other_level = fx
        .presence_service
        .count_for_student_at_level("422001@student.com", "M1")
        .await
        .expect("count");
    assert_eq!(other_level, 0);
}

#[actix_rt::test]
async fn duplicate_checkin_policy_is_configurable() {
    let permissive = CourseFixture::new(true).await;
    let seance_id = permissive.create_seance(b"img").await;
    for _ in 0..2 {
        permissive
            .presence_service
            .record(
                "422001@student.com",
                seance_id,
                PresenceRequest { date: chrono::Utc::now() },
            )
            .await
            .expect("duplicate check-ins allowed");
    }

    let strict = CourseFixture::new(false).await;
    let seance_id = strict.create_seance(b"img").await;
    strict
        .presence_service
        .record(
            "422001@student.com",
            seance_id,
            PresenceRequest { date: chrono::Utc::now() },
        )
        .await
        .expect("first check-in");
    let second = strict
        .presence_service
        .record(
            "422001@student.com",
            seance_id,
            PresenceRequest { date: chrono::Utc::now() },
        )
        .await;
    assert!(matches!(second, Err(AppError::AlreadyExists(_))));
}

#[actix_rt::test]
async fn uploaded_document_is_stored_verbatim_and_extractable() {
    let fx = CourseFixture::new(true).await;
    let seance_id = fx.create_seance(b"img").await;

    let document = b"Module 1: Recursion basics".to_vec();
    fx.fichier_service
        .upload(seance_id, "cours.pdf", &document, b"thumbnail bytes")
        .await
        .expect("upload");

    let bytes = fx.fichier_service.document_bytes(1).await.expect("bytes");
    assert_eq!(bytes, document);

    let text = fx.fichier_service.document_text(1).await.expect("text");
    assert_eq!(text, "Module 1: Recursion basics");

    let images = fx
        .fichier_service
        .images_by_seance(seance_id)
        .await
        .expect("images");
    assert_eq!(images.len(), 1);
    assert_eq!(
        images[0].image.as_deref(),
        Some(BASE64.encode(b"thumbnail bytes").as_str())
    );
}

#[actix_rt::test]
async fn upload_against_unknown_seance_is_rejected() {
    let fx = CourseFixture::new(true).await;

    let result = fx
        .fichier_service
        .upload(99, "cours.pdf", b"doc", b"img")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

fn quiz_service_with(
    provider: Arc<StubTriviaProvider>,
) -> (QuizService, Arc<InMemoryQuestionRepository>) {
    let questions = Arc::new(InMemoryQuestionRepository::default());
    let service = QuizService::new(
        questions.clone(),
        Arc::new(InMemoryIdAllocator::default()),
        provider,
        Arc::new(PassthroughExtractor),
    );
    (service, questions)
}

fn sample_trivia() -> Vec<RawTriviaQuestion> {
    vec![RawTriviaQuestion {
        category: "Science".to_string(),
        difficulty: "easy".to_string(),
        question: "What planet is known as the red planet?".to_string(),
        correct_answer: "Mars".to_string(),
        incorrect_answers: vec![
            "Venus".to_string(),
            "Jupiter".to_string(),
            "Saturn".to_string(),
        ],
    }]
}

#[actix_rt::test]
async fn named_category_is_translated_for_the_provider() {
    let provider = Arc::new(StubTriviaProvider::new(sample_trivia()));
    let (service, _) = quiz_service_with(provider.clone());

    let set = service
        .fetch_external_questions(Some("easy"), Some("science"))
        .await
        .expect("fetch");

    assert_eq!(set.results.len(), 1);
    assert_eq!(set.results[0].answers.len(), 4);
    assert_eq!(
        set.results[0].answers[set.results[0].correct_answer_index],
        "Mars"
    );
    assert_eq!(*provider.requested_category.lock().unwrap(), Some(Some(17)));
}

#[actix_rt::test]
async fn empty_category_means_no_category_filter() {
    let provider = Arc::new(StubTriviaProvider::new(sample_trivia()));
    let (service, _) = quiz_service_with(provider.clone());

    service
        .fetch_external_questions(None, Some(""))
        .await
        .expect("fetch");

    assert_eq!(*provider.requested_category.lock().unwrap(), Some(None));
}

#[actix_rt::test]
async fn unknown_category_is_rejected_before_the_provider_is_called() {
    let provider = Arc::new(StubTriviaProvider::new(sample_trivia()));
    let (service, _) = quiz_service_with(provider.clone());

    let result = service
        .fetch_external_questions(Some("easy"), Some("astrology"))
        .await;

    assert!(matches!(result, Err(AppError::InvalidCategory(_))));
    assert!(provider.requested_category.lock().unwrap().is_none());
}

#[actix_rt::test]
async fn scoring_is_exact_and_skips_unknown_questions() {
    let provider = Arc::new(StubTriviaProvider::new(vec![]));
    let (service, _) = quiz_service_with(provider);

    for (text, answer) in [("2+2?", "4"), ("Capital of France?", "Paris")] {
        service
            .add_question(CreateQuestionRequest {
                question_text: text.to_string(),
                option_a: "a".to_string(),
                option_b: "b".to_string(),
                option_c: "c".to_string(),
                correct_answer: answer.to_string(),
            })
            .await
            .expect("add question");
    }

    let submission: QuizSubmission = HashMap::from([
        (1, "4".to_string()),
        (2, "paris".to_string()), // case-sensitive, no point
        (99, "anything".to_string()), // unknown id, skipped
    ]);

    let score = service.score_submission(&submission).await.expect("score");
    assert_eq!(score, 1);
}

#[actix_rt::test]
async fn module_lines_become_generated_questions() {
    let provider = Arc::new(StubTriviaProvider::new(vec![]));
    let (service, _) = quiz_service_with(provider);

    let document = b"Course outline\n\
        Module 1: Recursion\n\
        An unrelated line\n\
        module 2: Graphs, trees\n\
        Module short\n";

    let generated = service
        .generate_questions_from_document(document)
        .expect("generate");

    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].correct_answer, "Recursion");
    assert_eq!(generated[1].correct_answer, "Graphs");
    assert!(generated[0]
        .incorrect_answers
        .contains(&"Fundamentals of Recursion".to_string()));
    assert!(generated[0].question.contains("Module 1: Recursion"));
}
