//! Row and request types for the REST layer.
//!
//! Responses reuse [`kbase::model::Folder`] and [`kbase::model::Article`], so
//! the server and the local snapshots share one JSON shape. Categories are
//! stored as text and parsed on the way in and out.

use chrono::{DateTime, Utc};
use kbase::error::KbError;
use kbase::model::{Article, Category, Folder};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FolderRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FolderRow> for Folder {
    type Error = KbError;

    fn try_from(row: FolderRow) -> Result<Self, Self::Error> {
        Ok(Folder {
            id: row.id,
            name: row.name,
            category: row.category.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// An article row with its media lists aggregated in `position` order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: Uuid,
    pub folder_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = KbError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: row.id,
            folder_id: row.folder_id,
            title: row.title,
            content: row.content,
            category: row.category.parse()?,
            images: row.images,
            videos: row.videos,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `GET /api/folders` query string.
#[derive(Debug, Default, Deserialize)]
pub struct FolderQuery {
    pub category: Option<String>,
}

/// `GET /api/articles` query string. `folderId` is parsed by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleQuery {
    pub folder_id: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    pub category: String,
}

/// `folderId` is parsed by the handler; a missing title is caught there too.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub folder_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

/// Only title and content are updatable over REST; media lists and
/// category stay as they were created.
#[derive(Debug, Deserialize)]
pub struct UpdateArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Parse an optional category filter, treating blank as absent.
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<Category>, KbError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
