use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::User;

/// Access-token claims. A user has exactly one role, so the token carries a
/// single authority claim rather than a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username, the login handle)
    pub email: String,
    pub role: String,
    pub user_id: i64,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            user_id: user.id,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

/// Claims for the single-purpose password-reset token sent by mail. The link
/// no longer embeds a raw user id; the token is signed and short-lived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,        // username
    pub token_type: String, // "reset"
    pub exp: usize,
    pub iat: usize,
}

impl ResetClaims {
    pub fn new(username: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: username.to_string(),
            token_type: "reset".to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("422001", "Etudiant");
        let claims = Claims::new(&user, 24);

        assert_eq!(claims.sub, "422001");
        assert_eq!(claims.role, "Etudiant");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_reset_claims_creation() {
        let claims = ResetClaims::new("422001", 1);

        assert_eq!(claims.sub, "422001");
        assert_eq!(claims.token_type, "reset");
        assert!(claims.exp > claims.iat);
    }
}
