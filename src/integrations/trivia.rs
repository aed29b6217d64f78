use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// One question as the trivia provider returns it, correct answer still
/// separate from the distractors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawTriviaQuestion {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// External trivia source. Calls are blocking for the request, with no retry
/// or timeout policy; a failure surfaces immediately as `UpstreamError`.
#[async_trait]
pub trait TriviaProvider: Send + Sync {
    async fn fetch_questions(
        &self,
        difficulty: &str,
        category_id: Option<u32>,
    ) -> AppResult<Vec<RawTriviaQuestion>>;
}

pub struct OpenTdbClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl TriviaProvider for OpenTdbClient {
    async fn fetch_questions(
        &self,
        difficulty: &str,
        category_id: Option<u32>,
    ) -> AppResult<Vec<RawTriviaQuestion>> {
        let mut url = format!(
            "{}?amount=10&type=multiple&difficulty={}&lang=en",
            self.base_url, difficulty
        );
        if let Some(id) = category_id {
            url.push_str(&format!("&category={}", id));
        }

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Trivia request failed: {}", e)))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Trivia response unreadable: {}", e)))?;

        let results = body
            .get("results")
            .cloned()
            .ok_or_else(|| {
                AppError::UpstreamError("Trivia response is missing 'results'".to_string())
            })?;

        serde_json::from_value(results)
            .map_err(|e| AppError::UpstreamError(format!("Malformed trivia results: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_question_deserializes_provider_shape() {
        let json = r#"{
            "category": "Science & Nature",
            "type": "multiple",
            "difficulty": "easy",
            "question": "What is H2O?",
            "correct_answer": "Water",
            "incorrect_answers": ["Helium", "Salt", "Gold"]
        }"#;

        let q: RawTriviaQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, "Water");
        assert_eq!(q.incorrect_answers.len(), 3);
    }
}
