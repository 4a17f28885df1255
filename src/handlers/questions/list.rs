use axum::extract::Query;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::aggregate::{fold_rows, Grouped};
use crate::database::models::{Form, FormTranslation, User};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::types::{FormCategory, Language};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub username: Option<String>,
    #[serde(rename = "formLanguage")]
    pub form_language: Option<String>,
    #[serde(rename = "formType")]
    pub form_type: Option<String>,
}

/// One row per question×option combination from the left-joined query
#[derive(Debug, FromRow)]
struct QuestionOptionRow {
    question_id: i64,
    question_translation_id: i64,
    question_text: String,
    question_type: String,
    description: Option<String>,
    required: bool,
    image_urls: Option<String>,
    position: i32,
    option_id: Option<i64>,
    option_position: Option<i32>,
    option_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct OptionItem {
    option_id: i64,
    option_text: Option<String>,
    position: i32,
}

#[derive(Debug, Serialize)]
struct QuestionItem {
    question_id: i64,
    question_translation_id: i64,
    question_text: String,
    question_type: String,
    description: Option<String>,
    required: bool,
    image_urls: Option<Value>,
    position: i32,
    options: Vec<OptionItem>,
}

impl Grouped for QuestionItem {
    type Child = OptionItem;

    fn position(&self) -> i32 {
        self.position
    }

    fn children_mut(&mut self) -> &mut Vec<OptionItem> {
        &mut self.options
    }
}

/// GET /api/questions - All questions of a user's form, with ordered options
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Value> {
    let username = query
        .username
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("username is required"))?;
    let language = query
        .form_language
        .as_deref()
        .and_then(Language::parse)
        .ok_or_else(|| ApiError::bad_request("formLanguage must be one of: en, es"))?;
    let category = query
        .form_type
        .as_deref()
        .and_then(FormCategory::parse)
        .ok_or_else(|| {
            ApiError::bad_request("formType must be one of: custom, flash, touchup")
        })?;

    let pool = DatabaseManager::pool().await?;

    let user: User =
        sqlx::query_as("SELECT id, email, name, created_at FROM users WHERE email = $1")
            .bind(&username)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| ApiError::not_found("user not found"))?;

    let form: Form = sqlx::query_as(
        "SELECT id, user_id, category, created_at FROM forms WHERE user_id = $1 AND category = $2",
    )
    .bind(user.id)
    .bind(category.as_str())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("no questions found"))?;

    let form_translation: FormTranslation = sqlx::query_as(
        "SELECT id, form_id, language, title FROM form_translations WHERE form_id = $1 AND language = $2",
    )
    .bind(form.id)
    .bind(language.as_str())
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| ApiError::not_found("no questions found"))?;

    let rows: Vec<QuestionOptionRow> = sqlx::query_as(
        r#"
        SELECT qt.question_id,
               qt.id AS question_translation_id,
               qt.question_text,
               q.question_type,
               q.description,
               q.required,
               q.image_urls,
               fqt.position,
               qo.id AS option_id,
               qo.position AS option_position,
               qot.option_text
        FROM form_question_translations fqt
        JOIN question_translations qt ON qt.id = fqt.question_translation_id
        JOIN questions q ON q.id = qt.question_id
        LEFT JOIN question_options qo ON qo.question_id = q.id
        LEFT JOIN question_option_translations qot
               ON qot.option_id = qo.id AND qot.language = $2
        WHERE fqt.form_translation_id = $1
        ORDER BY fqt.position, qo.position
        "#,
    )
    .bind(form_translation.id)
    .bind(language.as_str())
    .fetch_all(&pool)
    .await?;

    // Zero joined rows means the form has no questions yet, which this
    // endpoint reports as not-found rather than an empty list
    if rows.is_empty() {
        return Err(ApiError::not_found("no questions found"));
    }

    let questions = fold_rows(
        &rows,
        |row| row.question_id,
        |row| QuestionItem {
            question_id: row.question_id,
            question_translation_id: row.question_translation_id,
            question_text: row.question_text.clone(),
            question_type: row.question_type.clone(),
            description: row.description.clone(),
            required: row.required,
            image_urls: row
                .image_urls
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            position: row.position,
            options: Vec::new(),
        },
        |row| {
            row.option_id.map(|option_id| {
                let position = row.option_position.unwrap_or(0);
                (
                    position,
                    OptionItem {
                        option_id,
                        option_text: row.option_text.clone(),
                        position,
                    },
                )
            })
        },
    );

    Ok(ApiResponse::success(json!({
        "form_id": form.id,
        "questions": questions,
    })))
}
