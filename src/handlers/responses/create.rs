use axum::response::Json;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{Answer, Response};
use crate::database::transaction::with_transaction;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateResponseRequest {
    pub form_id: Option<i64>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerInput {
    pub question_id: Option<i64>,
    pub answer_text: Option<String>,
    /// Selected option labels; stored comma-joined
    pub selected_options: Option<Vec<String>>,
    pub file_url: Option<String>,
}

/// POST /api/responses - Record a submission and its answers in one
/// transaction; any bad answer rolls back the whole response
pub async fn create(Json(payload): Json<CreateResponseRequest>) -> ApiResult<Value> {
    let form_id = payload
        .form_id
        .ok_or_else(|| ApiError::bad_request("form_id is required"))?;
    let answers = payload.answers;

    let pool = DatabaseManager::pool().await?;

    let response_id = with_transaction(&pool, |tx| {
        async move {
            let form: Option<i64> = sqlx::query_scalar("SELECT id FROM forms WHERE id = $1")
                .bind(form_id)
                .fetch_optional(&mut **tx)
                .await?;
            if form.is_none() {
                return Err(ApiError::not_found("form not found"));
            }

            let response: Response = sqlx::query_as(
                "INSERT INTO responses (form_id, submitted_at) VALUES ($1, NOW()) \
                 RETURNING id, form_id, submitted_at",
            )
            .bind(form_id)
            .fetch_one(&mut **tx)
            .await?;

            for answer in &answers {
                let question_id = answer
                    .question_id
                    .ok_or_else(|| ApiError::bad_request("answers[].question_id is required"))?;

                let exists: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM questions WHERE id = $1")
                        .bind(question_id)
                        .fetch_optional(&mut **tx)
                        .await?;
                if exists.is_none() {
                    return Err(ApiError::not_found("question not found"));
                }

                // The question must be linked into the same form the
                // response is for
                let belongs: bool = sqlx::query_scalar(
                    "SELECT EXISTS( \
                       SELECT 1 FROM form_question_translations fqt \
                       JOIN form_translations ft ON ft.id = fqt.form_translation_id \
                       JOIN question_translations qt ON qt.id = fqt.question_translation_id \
                       WHERE ft.form_id = $1 AND qt.question_id = $2)",
                )
                .bind(form_id)
                .bind(question_id)
                .fetch_one(&mut **tx)
                .await?;
                if !belongs {
                    return Err(ApiError::bad_request(
                        "question does not belong to the response's form",
                    ));
                }

                let selected = answer.selected_options.as_ref().map(|opts| opts.join(","));

                let stored: Answer = sqlx::query_as(
                    "INSERT INTO answers \
                     (response_id, question_id, answer_text, selected_options, file_url) \
                     VALUES ($1, $2, $3, $4, $5) \
                     RETURNING id, response_id, question_id, answer_text, selected_options, file_url",
                )
                .bind(response.id)
                .bind(question_id)
                .bind(&answer.answer_text)
                .bind(&selected)
                .bind(&answer.file_url)
                .fetch_one(&mut **tx)
                .await?;

                tracing::debug!("stored answer {} for response {}", stored.id, response.id);
            }

            Ok(response.id)
        }
        .boxed()
    })
    .await?;

    tracing::info!("created response {}", response_id);

    Ok(ApiResponse::created(json!({ "response_id": response_id })))
}
