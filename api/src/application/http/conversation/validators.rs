use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AskQuestionRequest {
    /// Continue this conversation; a new one is started when absent.
    pub conversation_id: Option<Uuid>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "question must be between 1 and 2000 characters"
    ))]
    pub question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_length_is_bounded() {
        let empty = AskQuestionRequest {
            conversation_id: None,
            question: String::new(),
        };
        assert!(empty.validate().is_err());

        let long = AskQuestionRequest {
            conversation_id: None,
            question: "a".repeat(2001),
        };
        assert!(long.validate().is_err());

        let ok = AskQuestionRequest {
            conversation_id: Some(Uuid::new_v4()),
            question: "Is this vegan?".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
