pub mod articles;
pub mod folders;
pub mod health;
pub mod upload;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parse a path id, answering with a JSON 400 instead of axum's plain-text rejection.
pub(crate) fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
}
