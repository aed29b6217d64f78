use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub reset_token_expiration_hours: i64,
    /// Whether a student may check in to the same seance more than once.
    pub allow_duplicate_checkins: bool,
    pub seed_file: String,
    pub trivia_base_url: String,
    pub openai_api_key: SecretString,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub mail_from: String,
    pub frontend_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "campus-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            reset_token_expiration_hours: env::var("RESET_TOKEN_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(1),
            allow_duplicate_checkins: env::var("DUPLICATE_CHECKINS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            seed_file: env::var("SEED_FILE")
                .unwrap_or_else(|_| "students_profiles.json".to_string()),
            trivia_base_url: env::var("TRIVIA_BASE_URL")
                .unwrap_or_else(|_| "https://opentdb.com/api.php".to_string()),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: SecretString::from(env::var("SMTP_PASSWORD").unwrap_or_default()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@campus.local".to_string()),
            frontend_base_url: env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.openai_api_key.expose_secret().is_empty() {
            panic!("FATAL: OPENAI_API_KEY is not set! Image generation requires it.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "campus-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            reset_token_expiration_hours: 1,
            allow_duplicate_checkins: true,
            seed_file: "students_profiles.json".to_string(),
            trivia_base_url: "https://opentdb.com/api.php".to_string(),
            openai_api_key: SecretString::from("test_api_key".to_string()),
            smtp_host: "localhost".to_string(),
            smtp_username: String::new(),
            smtp_password: SecretString::from(String::new()),
            mail_from: "noreply@campus.local".to_string(),
            frontend_base_url: "http://localhost:4200".to_string(),
        }
    }
}
