pub mod fichier_repository;
pub mod presence_repository;
pub mod question_repository;
pub mod role_repository;
pub mod seance_repository;
pub mod user_repository;

pub use fichier_repository::{FichierRepository, MongoFichierRepository};
pub use presence_repository::{MongoPresenceRepository, PresenceRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use role_repository::{MongoRoleRepository, RoleRepository};
pub use seance_repository::{MongoSeanceRepository, SeanceRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
