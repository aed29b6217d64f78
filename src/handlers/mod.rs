pub mod auth_handler;
pub mod fichier_handler;
pub mod image_handler;
pub mod presence_handler;
pub mod quiz_handler;
pub mod role_handler;
pub mod seance_handler;
pub mod user_handler;
