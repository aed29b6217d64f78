pub mod auth_service;
pub mod fichier_service;
pub mod presence_service;
pub mod quiz_service;
pub mod role_service;
pub mod seance_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use fichier_service::FichierService;
pub use presence_service::PresenceService;
pub use quiz_service::QuizService;
pub use role_service::RoleService;
pub use seance_service::{CreateSeance, SeanceService};
pub use user_service::UserService;
