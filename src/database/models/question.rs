use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Language-independent question row. Localized text lives in
/// `question_translations`; `image_urls` is a JSON-encoded list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question_type: String,
    pub description: Option<String>,
    pub required: bool,
    pub image_urls: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionTranslation {
    pub id: i64,
    pub question_id: i64,
    pub language: String,
    pub question_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub position: i32,
}
