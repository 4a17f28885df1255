use axum::response::Json;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::transaction::with_transaction;
use crate::database::{DatabaseManager, UpdateBuilder};
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::types::{Language, QuestionType};

#[derive(Debug, Deserialize)]
pub struct EditQuestionRequest {
    pub question_id: Option<i64>,
    pub question_type: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub image_urls: Option<Vec<String>>,
    pub position: Option<i32>,
    /// Localized text updates for existing translations
    #[serde(default)]
    pub translations: Vec<TranslationEdit>,
}

#[derive(Debug, Deserialize)]
pub struct TranslationEdit {
    pub language: Option<String>,
    pub question_text: Option<String>,
}

/// PUT /api/questions - Update whichever question fields are present
pub async fn edit(Json(payload): Json<EditQuestionRequest>) -> ApiResult<Value> {
    let question_id = payload
        .question_id
        .ok_or_else(|| ApiError::bad_request("question_id is required"))?;

    let question_type = match payload.question_type.as_deref() {
        Some(raw) => Some(
            QuestionType::parse(raw)
                .ok_or_else(|| ApiError::bad_request("question_type is invalid"))?,
        ),
        None => None,
    };

    // Validate every translation edit before any write
    let mut translations: Vec<(Language, String)> = Vec::new();
    for edit in &payload.translations {
        let language = edit
            .language
            .as_deref()
            .and_then(Language::parse)
            .ok_or_else(|| {
                ApiError::bad_request("translations[].language must be one of: en, es")
            })?;
        let text = edit
            .question_text
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("translations[].question_text is required"))?;
        translations.push((language, text));
    }

    let image_urls = match payload.image_urls {
        Some(urls) => Some(
            serde_json::to_string(&urls)
                .map_err(|_| ApiError::bad_request("image_urls is invalid"))?,
        ),
        None => None,
    };

    let builder = UpdateBuilder::new("questions")
        .set_opt(
            "question_type",
            question_type.map(|qt| json!(qt.as_str())),
        )
        .set_opt("description", payload.description.map(Value::String))
        .set_opt("required", payload.required.map(Value::Bool))
        .set_opt("image_urls", image_urls.map(Value::String))
        .set_opt("position", payload.position.map(|p| json!(p)));

    let pool = DatabaseManager::pool().await?;

    with_transaction(&pool, |tx| {
        async move {
            if !builder.is_empty() {
                builder.execute(tx, "id", question_id).await?;
            }

            for (language, text) in &translations {
                sqlx::query(
                    "UPDATE question_translations SET question_text = $1 \
                     WHERE question_id = $2 AND language = $3",
                )
                .bind(text)
                .bind(question_id)
                .bind(language.as_str())
                .execute(&mut **tx)
                .await?;
            }

            Ok(())
        }
        .boxed()
    })
    .await?;

    Ok(ApiResponse::success(json!({
        "message": format!("question {} updated", question_id)
    })))
}
