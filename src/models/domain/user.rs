use serde::{Deserialize, Serialize};

/// A user account. `username` is the login handle (set to the email at
/// registration, or to the student id for seeded accounts) and is unique.
/// Archived users are excluded from active listings but kept for history.
///
/// The password hash is part of the persisted document; transport uses
/// `UserDto`, which never carries it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    pub class_name: String,
    pub level: String,
    pub archived: bool,
    pub password_hash: String,
    pub username: String,
    pub role: String,
}

impl User {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        last_name: &str,
        first_name: &str,
        email: &str,
        phone: Option<i64>,
        class_name: &str,
        level: &str,
        password_hash: &str,
        username: &str,
        role: &str,
    ) -> Self {
        User {
            id,
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            email: email.to_string(),
            phone,
            class_name: class_name.to_string(),
            level: level.to_string(),
            archived: false,
            password_hash: password_hash.to_string(),
            username: username.to_string(),
            role: role.to_string(),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, role: &str) -> Self {
        User::new(
            1,
            "Test",
            "User",
            &format!("{}@student.com", username),
            None,
            "3eme annee",
            "L3",
            "hash",
            username,
            role,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation_defaults_to_active() {
        let user = User::test_user("422001", "Etudiant");
        assert!(!user.archived);
        assert_eq!(user.username, "422001");
        assert_eq!(user.role, "Etudiant");
    }

    #[test]
    fn test_user_round_trip_keeps_hash() {
        // Persistence serializes the full document, hash included.
        let user = User::test_user("422001", "Etudiant");
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.password_hash, "hash");
    }
}
