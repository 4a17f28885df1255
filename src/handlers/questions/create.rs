use axum::response::Json;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Form, FormTranslation, User};
use crate::database::transaction::{lock_position_scope, next_position, with_transaction};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::types::{FormCategory, Language, QuestionType};

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub username: Option<String>,
    pub form_type: Option<String>,
    pub form_language: Option<String>,
    pub question: Option<QuestionInput>,
    /// Localized option labels, in display order
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionInput {
    pub question_type: Option<String>,
    pub question_text: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub image_urls: Option<Vec<String>>,
}

/// POST /api/questions - Create a question with its translation, options,
/// and form linking row in one transaction
pub async fn create(Json(payload): Json<CreateQuestionRequest>) -> ApiResult<Value> {
    let username = payload
        .username
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("username is required"))?;
    let category = payload
        .form_type
        .as_deref()
        .and_then(FormCategory::parse)
        .ok_or_else(|| {
            ApiError::bad_request("form_type must be one of: custom, flash, touchup")
        })?;
    let language = payload
        .form_language
        .as_deref()
        .and_then(Language::parse)
        .ok_or_else(|| ApiError::bad_request("form_language must be one of: en, es"))?;
    let question = payload
        .question
        .ok_or_else(|| ApiError::bad_request("question is required"))?;
    let question_type = question
        .question_type
        .as_deref()
        .and_then(QuestionType::parse)
        .ok_or_else(|| ApiError::bad_request("question.question_type is invalid"))?;
    let question_text = question
        .question_text
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("question.question_text is required"))?;
    let description = question.description;
    let required = question.required;
    let image_urls = match question.image_urls {
        Some(urls) => Some(
            serde_json::to_string(&urls)
                .map_err(|_| ApiError::bad_request("question.image_urls is invalid"))?,
        ),
        None => None,
    };
    let options = payload.options;

    let pool = DatabaseManager::pool().await?;

    let question_id = with_transaction(&pool, |tx| {
        async move {
            let user: User = sqlx::query_as(
                "SELECT id, email, name, created_at FROM users WHERE email = $1",
            )
            .bind(&username)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::not_found("user not found"))?;

            let form: Form = sqlx::query_as(
                "SELECT id, user_id, category, created_at FROM forms \
                 WHERE user_id = $1 AND category = $2",
            )
            .bind(user.id)
            .bind(category.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::not_found("form not found"))?;

            let form_translation: FormTranslation = sqlx::query_as(
                "SELECT id, form_id, language, title FROM form_translations \
                 WHERE form_id = $1 AND language = $2",
            )
            .bind(form.id)
            .bind(language.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::not_found("form translation not found"))?;

            // Serialize position assignment against concurrent inserts into
            // the same form translation
            lock_position_scope(tx, form_translation.id).await?;
            let position = next_position(
                tx,
                "SELECT COALESCE(MAX(position), 0) + 1 FROM form_question_translations \
                 WHERE form_translation_id = $1",
                form_translation.id,
            )
            .await?;

            let question_id: i64 = sqlx::query_scalar(
                "INSERT INTO questions (question_type, description, required, image_urls, position) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(question_type.as_str())
            .bind(&description)
            .bind(required)
            .bind(&image_urls)
            .bind(position)
            .fetch_one(&mut **tx)
            .await?;

            let question_translation_id: i64 = sqlx::query_scalar(
                "INSERT INTO question_translations (question_id, language, question_text) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(question_id)
            .bind(language.as_str())
            .bind(&question_text)
            .fetch_one(&mut **tx)
            .await?;

            for (index, option_text) in options.iter().enumerate() {
                let option_id: i64 = sqlx::query_scalar(
                    "INSERT INTO question_options (question_id, position) \
                     VALUES ($1, $2) RETURNING id",
                )
                .bind(question_id)
                .bind(index as i32 + 1)
                .fetch_one(&mut **tx)
                .await?;

                sqlx::query(
                    "INSERT INTO question_option_translations (option_id, language, option_text) \
                     VALUES ($1, $2, $3)",
                )
                .bind(option_id)
                .bind(language.as_str())
                .bind(option_text)
                .execute(&mut **tx)
                .await?;
            }

            sqlx::query(
                "INSERT INTO form_question_translations \
                 (form_translation_id, question_translation_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(form_translation.id)
            .bind(question_translation_id)
            .bind(position)
            .execute(&mut **tx)
            .await?;

            Ok(question_id)
        }
        .boxed()
    })
    .await?;

    tracing::info!("created question {}", question_id);

    Ok(ApiResponse::created(json!({ "question_id": question_id })))
}
