use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Fichier, Presence, Seance, User};

/// Payload returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub message: String,
    pub profil: String,
    pub username: String,
    pub id: i64,
}

impl LoginResponse {
    pub fn new(token: String, role: &str, username: &str, id: i64) -> Self {
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            message: "Login successful".to_string(),
            profil: role.to_string(),
            username: username.to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    pub class_name: String,
    pub level: String,
    pub archived: bool,
    pub username: String,
    pub role: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            last_name: user.last_name,
            first_name: user.first_name,
            email: user.email,
            phone: user.phone,
            class_name: user.class_name,
            level: user.level,
            archived: user.archived,
            username: user.username,
            role: user.role,
        }
    }
}

/// Seance for transport: the image is the raw (decompressed) bytes, encoded
/// as base64 for JSON.
#[derive(Debug, Clone, Serialize)]
pub struct SeanceDto {
    pub id: i64,
    pub link: String,
    pub title: String,
    pub level: String,
    pub module: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub image: String,
    pub teacher_id: i64,
    pub teacher_email: String,
}

impl SeanceDto {
    pub fn from_seance(seance: Seance, raw_image: &[u8]) -> Self {
        SeanceDto {
            id: seance.id,
            link: seance.link,
            title: seance.title,
            level: seance.level,
            module: seance.module,
            date: seance.date,
            description: seance.description,
            image: BASE64.encode(raw_image),
            teacher_id: seance.teacher_id,
            teacher_email: seance.teacher_email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresenceDto {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub level: String,
    pub seance_id: i64,
    pub student_id: i64,
}

impl From<Presence> for PresenceDto {
    fn from(p: Presence) -> Self {
        PresenceDto {
            id: p.id,
            date: p.date,
            level: p.level,
            seance_id: p.seance_id,
            student_id: p.student_id,
        }
    }
}

/// File metadata plus either the verbatim payload or the decompressed image,
/// depending on the endpoint variant.
#[derive(Debug, Clone, Serialize)]
pub struct FichierDto {
    pub id: i64,
    pub name: String,
    pub seance_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FichierDto {
    pub fn with_data(fichier: &Fichier) -> Self {
        FichierDto {
            id: fichier.id,
            name: fichier.name.clone(),
            seance_id: fichier.seance_id,
            data: Some(BASE64.encode(&fichier.data)),
            image: None,
        }
    }

    pub fn with_image(fichier: &Fichier, raw_image: &[u8]) -> Self {
        FichierDto {
            id: fichier.id,
            name: fichier.name.clone(),
            seance_id: fichier.seance_id,
            data: None,
            image: Some(BASE64.encode(raw_image)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shape() {
        let resp = LoginResponse::new("tok".into(), "Etudiant", "422001", 9);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "Bearer");
        assert_eq!(json["profil"], "Etudiant");
        assert_eq!(json["id"], 9);
    }

    #[test]
    fn test_user_dto_omits_password_hash() {
        let user = User::test_user("422001", "Etudiant");
        let dto: UserDto = user.into();
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_seance_dto_encodes_raw_image() {
        let seance = Seance::new(3, "l", "t", "L3", "Algo", "d", vec![1, 2, 3], 7, "t@test.com");
        let dto = SeanceDto::from_seance(seance, &[9, 9, 9]);
        assert_eq!(dto.image, BASE64.encode([9, 9, 9]));
    }
}
