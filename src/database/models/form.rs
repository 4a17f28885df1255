use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Form {
    pub id: i64,
    pub user_id: i64,
    /// "custom" | "flash" | "touchup"
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// One row per (form, language); uniqueness enforced by the schema
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormTranslation {
    pub id: i64,
    pub form_id: i64,
    pub language: String,
    pub title: Option<String>,
}
