use axum::response::Json;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{FormTranslation, Question, QuestionOption, QuestionTranslation};
use crate::database::transaction::{lock_position_scope, next_position, with_transaction};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::types::{FormCategory, Language};

#[derive(Debug, Deserialize)]
pub struct AddTranslationRequest {
    pub question_id: Option<i64>,
    pub language: Option<String>,
    pub question_text: Option<String>,
    pub form_type: Option<String>,
    /// Localized labels for the question's existing options, paired by
    /// option position order
    #[serde(default)]
    pub options: Vec<String>,
}

/// POST /api/questions/translations - Add a translation for an existing
/// question, link it into the form's translation, and translate its options
pub async fn add_translation(Json(payload): Json<AddTranslationRequest>) -> ApiResult<Value> {
    let question_id = payload
        .question_id
        .ok_or_else(|| ApiError::bad_request("question_id is required"))?;
    let language = payload
        .language
        .as_deref()
        .and_then(Language::parse)
        .ok_or_else(|| ApiError::bad_request("language must be one of: en, es"))?;
    let question_text = payload
        .question_text
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("question_text is required"))?;
    let category = payload
        .form_type
        .as_deref()
        .and_then(FormCategory::parse)
        .ok_or_else(|| {
            ApiError::bad_request("form_type must be one of: custom, flash, touchup")
        })?;
    let options = payload.options;

    let pool = DatabaseManager::pool().await?;

    let question_translation_id = with_transaction(&pool, |tx| {
        async move {
            let question: Question = sqlx::query_as(
                "SELECT id, question_type, description, required, image_urls, position \
                 FROM questions WHERE id = $1",
            )
            .bind(question_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::not_found("question not found"))?;

            // Duplicate (question, language) pairs are a conflict, never an
            // overwrite
            let existing: Option<QuestionTranslation> = sqlx::query_as(
                "SELECT id, question_id, language, question_text FROM question_translations \
                 WHERE question_id = $1 AND language = $2",
            )
            .bind(question.id)
            .bind(language.as_str())
            .fetch_optional(&mut **tx)
            .await?;
            if existing.is_some() {
                return Err(ApiError::conflict("question translation already exists"));
            }

            let question_translation_id: i64 = sqlx::query_scalar(
                "INSERT INTO question_translations (question_id, language, question_text) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(question.id)
            .bind(language.as_str())
            .bind(&question_text)
            .fetch_one(&mut **tx)
            .await?;

            // The target form is reached through the question's existing
            // linking rows; its translation in the requested language must
            // already exist
            let form_translation: FormTranslation = sqlx::query_as(
                "SELECT target.id, target.form_id, target.language, target.title \
                 FROM form_question_translations fqt \
                 JOIN question_translations qt ON qt.id = fqt.question_translation_id \
                 JOIN form_translations ft ON ft.id = fqt.form_translation_id \
                 JOIN forms f ON f.id = ft.form_id \
                 JOIN form_translations target \
                   ON target.form_id = f.id AND target.language = $2 \
                 WHERE qt.question_id = $1 AND f.category = $3 \
                 LIMIT 1",
            )
            .bind(question.id)
            .bind(language.as_str())
            .bind(category.as_str())
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| ApiError::not_found("form translation not found"))?;

            lock_position_scope(tx, form_translation.id).await?;
            let position = next_position(
                tx,
                "SELECT COALESCE(MAX(position), 0) + 1 FROM form_question_translations \
                 WHERE form_translation_id = $1",
                form_translation.id,
            )
            .await?;

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

            if !options.is_empty() {
                let existing_options: Vec<QuestionOption> = sqlx::query_as(
                    "SELECT id, question_id, position FROM question_options \
                     WHERE question_id = $1 ORDER BY position",
                )
                .bind(question.id)
                .fetch_all(&mut **tx)
                .await?;

                if existing_options.len() != options.len() {
                    return Err(ApiError::bad_request(format!(
                        "expected {} option translations, got {}",
                        existing_options.len(),
                        options.len()
                    )));
                }

                for (option, option_text) in existing_options.iter().zip(options.iter()) {
                    let duplicate: Option<i64> = sqlx::query_scalar(
                        "SELECT id FROM question_option_translations \
                         WHERE option_id = $1 AND language = $2",
                    )
                    .bind(option.id)
                    .bind(language.as_str())
                    .fetch_optional(&mut **tx)
                    .await?;
                    if duplicate.is_some() {
                        return Err(ApiError::conflict("option translation already exists"));
                    }

                    sqlx::query(
                        "INSERT INTO question_option_translations (option_id, language, option_text) \
                         VALUES ($1, $2, $3)",
                    )
                    .bind(option.id)
                    .bind(language.as_str())
                    .bind(option_text)
                    .execute(&mut **tx)
                    .await?;
                }
            }

            Ok(question_translation_id)
        }
        .boxed()
    })
    .await?;

    Ok(ApiResponse::created(json!({
        "message": "question translation created",
        "question_translation_id": question_translation_id,
    })))
}
