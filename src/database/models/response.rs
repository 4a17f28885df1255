use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Response {
    pub id: i64,
    pub form_id: i64,
    pub submitted_at: DateTime<Utc>,
}

/// One answer per (response, question). `selected_options` is a
/// comma-joined list of option labels.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub response_id: i64,
    pub question_id: i64,
    pub answer_text: Option<String>,
    pub selected_options: Option<String>,
    pub file_url: Option<String>,
}
