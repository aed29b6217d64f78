use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{Claims, ResetClaims},
    errors::{AppError, AppResult},
    models::domain::user::User,
};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
    reset_expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64, reset_expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
            reset_expiration_hours,
        }
    }

    pub fn create_token(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::TokenInvalid,
            })
    }

    pub fn create_reset_token(&self, username: &str) -> AppResult<String> {
        let claims = ResetClaims::new(username, self.reset_expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create reset token: {}", e)))
    }

    pub fn validate_reset_token(&self, token: &str) -> AppResult<ResetClaims> {
        let token_data = decode::<ResetClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::TokenInvalid,
            })?;

        // An access token must not be usable as a reset token.
        if token_data.claims.token_type != "reset" {
            return Err(AppError::TokenInvalid);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn jwt_service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 1)
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let service = jwt_service();
        let user = User::test_user("422001", "Etudiant");

        let token = service.create_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "422001");
        assert_eq!(claims.role, "Etudiant");
        assert_eq!(claims.user_id, user.id);
    }

    #[test]
    fn test_jwt_invalid_token() {
        let service = jwt_service();

        let result = service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_jwt_expired_token() {
        let config = Config::test_config();
        let service = JwtService::new(&config.jwt_secret, -1, 1);
        let user = User::test_user("422001", "Etudiant");

        let token = service.create_token(&user).unwrap();
        let result = service.validate_token(&token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let service = jwt_service();
        let other = JwtService::new(&SecretString::from("another_secret_key".to_string()), 1, 1);
        let user = User::test_user("422001", "Etudiant");

        let token = service.create_token(&user).unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::TokenInvalid)
        ));
    }

    #[test]
    fn test_reset_token_create_and_validate() {
        let service = jwt_service();

        let token = service.create_reset_token("422001").unwrap();
        let claims = service.validate_reset_token(&token).unwrap();

        assert_eq!(claims.sub, "422001");
        assert_eq!(claims.token_type, "reset");
    }

    #[test]
    fn test_access_token_is_not_a_reset_token() {
        let service = jwt_service();
        let user = User::test_user("422001", "Etudiant");

        let access_token = service.create_token(&user).unwrap();
        assert!(service.validate_reset_token(&access_token).is_err());
    }
}
