use serde::{Deserialize, Serialize};

/// A stored quiz-bank question with three options. Scoring compares the
/// submitted answer to `correct_answer` exactly, case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub correct_answer: String,
}

impl Question {
    pub fn new(
        id: i64,
        question_text: &str,
        option_a: &str,
        option_b: &str,
        option_c: &str,
        correct_answer: &str,
    ) -> Self {
        Question {
            id,
            question_text: question_text.to_string(),
            option_a: option_a.to_string(),
            option_b: option_b.to_string(),
            option_c: option_c.to_string(),
            correct_answer: correct_answer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_round_trip() {
        let q = Question::new(1, "2+2?", "3", "4", "5", "4");
        let json = serde_json::to_string(&q).unwrap();
        let parsed: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, q);
    }
}
