use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kbase::error::KbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`KbError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Kb(#[from] KbError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Kb(kb) => match kb {
                KbError::FolderNotFound(_) | KbError::ArticleNotFound(_) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", kb.to_string())
                }
                KbError::InvalidCategory(_) | KbError::Api(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", kb.to_string())
                }
                other => {
                    tracing::error!(error = %other, "Internal domain error");
                    internal()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error".to_string(),
    )
}

/// Map a sqlx error to status, code and a message safe to show clients.
///
/// `RowNotFound` maps to 404; every other database fault is a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
