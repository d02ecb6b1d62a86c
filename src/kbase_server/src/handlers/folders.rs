use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kbase::error::KbError;
use kbase::model::{Folder, NewFolder};

use crate::error::AppResult;
use crate::handlers::parse_id;
use crate::models::{parse_category_filter, CreateFolder, FolderQuery};
use crate::repo::FolderRepo;
use crate::state::AppState;

/// GET /api/folders?category=
pub async fn list_folders(
    State(state): State<AppState>,
    Query(params): Query<FolderQuery>,
) -> AppResult<Json<Vec<Folder>>> {
    let category = parse_category_filter(params.category.as_deref())?;
    let rows = FolderRepo::list(&state.pool, category).await?;
    let folders = rows
        .into_iter()
        .map(Folder::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(folders))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(input): Json<CreateFolder>,
) -> AppResult<(StatusCode, Json<Folder>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(KbError::Api("Folder name cannot be empty".into()).into());
    }
    let draft = NewFolder::new(name, input.category.parse()?);

    let folder = Folder::try_from(FolderRepo::create(&state.pool, &draft).await?)?;
    tracing::info!(folder_id = %folder.id, category = %folder.category, "Folder created");
    Ok((StatusCode::CREATED, Json(folder)))
}

/// DELETE /api/folders/{id}
///
/// Deleting an unknown id still answers 204.
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let removed = FolderRepo::delete(&state.pool, id).await?;
    tracing::info!(folder_id = %id, removed, "Folder deleted");
    Ok(StatusCode::NO_CONTENT)
}
