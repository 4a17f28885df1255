use axum::extract::Multipart;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::storage::{public_url, random_filename, storage};

/// POST /api/images - Upload one or more images from the multipart field
/// `files`; each is stored under a short random name keeping its extension
pub async fn upload(mut multipart: Multipart) -> ApiResult<Value> {
    let mut urls: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("files") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {}", e)))?;

        let filename = random_filename(&original_name);
        storage().put_object(data.to_vec(), &filename).await?;

        tracing::info!("stored upload {} as {}", original_name, filename);
        urls.push(public_url(&filename));
    }

    if urls.is_empty() {
        return Err(ApiError::bad_request("no files uploaded"));
    }

    Ok(ApiResponse::success(json!({ "urls": urls })))
}
