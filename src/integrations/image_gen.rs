use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

/// Image-generation collaborator. The response is passed through to the
/// caller untouched.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<serde_json::Value>;
}

pub struct OpenAiImageClient {
    http: reqwest::Client,
    api_key: SecretString,
}

impl OpenAiImageClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> AppResult<serde_json::Value> {
        let payload = serde_json::json!({
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
        });

        let response = self
            .http
            .post(OPENAI_IMAGES_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Image request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "Image provider returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Image response unreadable: {}", e)))
    }
}
