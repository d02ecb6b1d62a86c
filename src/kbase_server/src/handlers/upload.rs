use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/upload
///
/// Stores the `file` field under the uploads directory as
/// `<unix millis>-<random><ext>` and returns the URL it is served from.
pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let uploads_dir = &state.config.uploads_dir;
        tokio::fs::create_dir_all(uploads_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;

        let stored = stored_file_name(&original);
        tokio::fs::write(uploads_dir.join(&stored), &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let url = format!("{}/uploads/{}", base_url(&state, &headers), stored);
        tracing::info!(file = %stored, bytes = data.len(), "File uploaded");
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}

/// `<unix millis>-<random><ext>`, keeping only a short alphanumeric extension
/// from the client's file name.
pub fn stored_file_name(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = Uuid::new_v4().as_u128() % 1_000_000_000;
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{millis}-{random}{ext}")
}

fn base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(public) = &state.config.public_url {
        return public.clone();
    }
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}:{}", state.config.host, state.config.port));
    format!("http://{host}")
}
