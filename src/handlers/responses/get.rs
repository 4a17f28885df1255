use axum::extract::Query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::aggregate::{fold_rows, Grouped};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::types::Language;

#[derive(Debug, Deserialize)]
pub struct GetQuery {
    pub response_id: Option<i64>,
    /// Language for the localized question text; defaults to "en"
    pub language: Option<String>,
}

/// One row per response×answer combination from the left-joined query
#[derive(Debug, FromRow)]
struct ResponseAnswerRow {
    response_id: i64,
    form_id: i64,
    submitted_at: DateTime<Utc>,
    answer_id: Option<i64>,
    question_id: Option<i64>,
    answer_text: Option<String>,
    selected_options: Option<String>,
    file_url: Option<String>,
    question_text: Option<String>,
    question_position: Option<i32>,
}

#[derive(Debug, Serialize)]
struct AnswerItem {
    answer_id: i64,
    question_id: Option<i64>,
    question_text: Option<String>,
    answer_text: Option<String>,
    selected_options: Option<String>,
    file_url: Option<String>,
    position: i32,
}

#[derive(Debug, Serialize)]
struct ResponseItem {
    response_id: i64,
    form_id: i64,
    submitted_at: DateTime<Utc>,
    answers: Vec<AnswerItem>,
}

impl Grouped for ResponseItem {
    type Child = AnswerItem;

    fn position(&self) -> i32 {
        0
    }

    fn children_mut(&mut self) -> &mut Vec<AnswerItem> {
        &mut self.answers
    }
}

/// GET /api/responses - A submitted response with its ordered answers.
///
/// A response whose form has no questions returns 200 with an empty answer
/// list; only an unknown response id is a 404.
pub async fn get(Query(query): Query<GetQuery>) -> ApiResult<Value> {
    let response_id = query
        .response_id
        .ok_or_else(|| ApiError::bad_request("response_id is required"))?;
    let language = match query.language.as_deref() {
        Some(raw) => Language::parse(raw)
            .ok_or_else(|| ApiError::bad_request("language must be one of: en, es"))?,
        None => Language::En,
    };

    let pool = DatabaseManager::pool().await?;

    let rows: Vec<ResponseAnswerRow> = sqlx::query_as(
        r#"
        SELECT r.id AS response_id,
               r.form_id,
               r.submitted_at,
               a.id AS answer_id,
               a.question_id,
               a.answer_text,
               a.selected_options,
               a.file_url,
               qt.question_text,
               q.position AS question_position
        FROM responses r
        LEFT JOIN answers a ON a.response_id = r.id
        LEFT JOIN questions q ON q.id = a.question_id
        LEFT JOIN question_translations qt
               ON qt.question_id = q.id AND qt.language = $2
        WHERE r.id = $1
        ORDER BY q.position
        "#,
    )
    .bind(response_id)
    .bind(language.as_str())
    .fetch_all(&pool)
    .await?;

    if rows.is_empty() {
        return Err(ApiError::not_found("response not found"));
    }

    let mut responses = fold_rows(
        &rows,
        |row| row.response_id,
        |row| ResponseItem {
            response_id: row.response_id,
            form_id: row.form_id,
            submitted_at: row.submitted_at,
            answers: Vec::new(),
        },
        |row| {
            row.answer_id.map(|answer_id| {
                let position = row.question_position.unwrap_or(0);
                (
                    position,
                    AnswerItem {
                        answer_id,
                        question_id: row.question_id,
                        question_text: row.question_text.clone(),
                        answer_text: row.answer_text.clone(),
                        selected_options: row.selected_options.clone(),
                        file_url: row.file_url.clone(),
                        position,
                    },
                )
            })
        },
    );

    // Exactly one parent: the WHERE clause pins a single response id
    let response = responses.remove(0);

    Ok(ApiResponse::success(json!(response)))
}
