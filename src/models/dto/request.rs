use std::collections::HashMap;

use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: Option<i64>,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub class_name: String,

    #[validate(length(max = 50))]
    #[serde(default)]
    pub level: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleQuery {
    pub profil: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NiveauQuery {
    pub niveau: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetLevelQuery {
    pub id: i64,
    pub niveau: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub token: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceQuery {
    pub email: String,
    pub idseance: i64,
}

/// Body of a check-in. The level is never taken from the client; it is
/// copied from the seance server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceRequest {
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeanceIdQuery {
    pub idseance: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceCountQuery {
    pub email: String,
    pub niveau: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQuery {
    pub level: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    #[validate(length(min = 1))]
    pub correct_answer: String,
}

/// Submitted quiz answers: stored question id -> answer text.
pub type QuizSubmission = HashMap<i64, String>;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, MultipartForm)]
pub struct SeanceUploadForm {
    pub image: Bytes,
    pub lien: Text<String>,
    pub titre: Text<String>,
    pub niveau: Text<String>,
    pub module: Text<String>,
    pub description: Text<String>,
    pub email: Text<String>,
}

#[derive(Debug, MultipartForm)]
pub struct FichierUploadForm {
    pub fichier: Bytes,
    pub image: Bytes,
    pub id: Text<i64>,
    pub name: Text<String>,
}

#[derive(Debug, MultipartForm)]
pub struct GenerateQuestionsForm {
    pub file: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            last_name: "Benali".to_string(),
            first_name: "Ahmed".to_string(),
            email: "422001@student.com".to_string(),
            phone: Some(422001),
            class_name: "3eme annee".to_string(),
            level: "L3".to_string(),
            password: "123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest {
            password: "12".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_quiz_submission_deserializes_numeric_keys() {
        let submission: QuizSubmission =
            serde_json::from_str(r#"{"1": "4", "2": "Paris"}"#).unwrap();
        assert_eq!(submission.get(&1).map(String::as_str), Some("4"));
        assert_eq!(submission.get(&2).map(String::as_str), Some("Paris"));
    }

    #[test]
    fn test_presence_request_defaults_date() {
        let req: PresenceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.date <= Utc::now());
    }
}
