use serde::{Deserialize, Serialize};

/// A trivia question prepared for the client: the correct answer is merged
/// into `answers` and only its index is reported, so the payload cannot be
/// introspected before answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestionDto {
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaQuestionSet {
    pub results: Vec<TriviaQuestionDto>,
}

/// A question synthesized from an uploaded course document. Ephemeral: never
/// persisted to the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}
