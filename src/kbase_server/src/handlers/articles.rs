use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kbase::error::KbError;
use kbase::media::normalize_media;
use kbase::model::{Article, NewArticle};

use crate::error::AppResult;
use crate::handlers::parse_id;
use crate::models::{parse_category_filter, ArticleQuery, CreateArticle, UpdateArticle};
use crate::repo::{ArticleRepo, FolderRepo};
use crate::state::AppState;

/// GET /api/articles?folderId=&category=
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticleQuery>,
) -> AppResult<Json<Vec<Article>>> {
    let folder_id = params
        .folder_id
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_id)
        .transpose()?;
    let category = parse_category_filter(params.category.as_deref())?;
    let rows = ArticleRepo::list(&state.pool, folder_id, category).await?;
    let articles = rows
        .into_iter()
        .map(Article::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(articles))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<Article>)> {
    if input.title.trim().is_empty() {
        return Err(KbError::Api("Title cannot be empty".into()).into());
    }
    let category = input.category.parse()?;
    let folder_id = parse_id(&input.folder_id)?;
    if !FolderRepo::exists(&state.pool, folder_id).await? {
        return Err(KbError::FolderNotFound(folder_id.to_string()).into());
    }

    let draft = NewArticle::new(folder_id, input.title, input.content, category)
        .with_images(normalize_media(input.images))
        .with_videos(normalize_media(input.videos));
    let article = Article::try_from(ArticleRepo::create(&state.pool, &draft).await?)?;

    tracing::info!(
        article_id = %article.id,
        folder_id = %article.folder_id,
        images = article.images.len(),
        videos = article.videos.len(),
        "Article created"
    );
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/articles/{id}
///
/// Updates title and content only.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<Json<Article>> {
    let id = parse_id(&id)?;
    if input.title.trim().is_empty() {
        return Err(KbError::Api("Title cannot be empty".into()).into());
    }

    let row = ArticleRepo::update(&state.pool, id, &input.title, &input.content)
        .await?
        .ok_or_else(|| KbError::ArticleNotFound(id.to_string()))?;
    tracing::info!(article_id = %id, "Article updated");
    Ok(Json(Article::try_from(row)?))
}

/// DELETE /api/articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    let removed = ArticleRepo::delete(&state.pool, id).await?;
    tracing::info!(article_id = %id, removed, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}
