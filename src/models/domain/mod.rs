pub mod fichier;
pub mod presence;
pub mod question;
pub mod role;
pub mod seance;
pub mod user;

pub use fichier::Fichier;
pub use presence::Presence;
pub use question::Question;
pub use role::Role;
pub use seance::Seance;
pub use user::User;
