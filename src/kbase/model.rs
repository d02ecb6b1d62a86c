//! # Data Model
//!
//! Two record types live in a knowledge base:
//!
//! - [`Folder`]: a named grouping scoped to one [`Category`].
//! - [`Article`]: a document with title, content and ordered media lists,
//!   filed under a folder through `folder_id`.
//!
//! `folder_id` is a weak reference. Nothing here checks that the folder
//! exists, and an article's category is allowed to differ from its folder's.
//!
//! Records are created from drafts ([`NewFolder`], [`NewArticle`]) and
//! mutated through patches ([`FolderPatch`], [`ArticlePatch`]). A patch only
//! touches the fields it carries and always refreshes `updated_at`.
//!
//! Field names serialize in camelCase so the local snapshots and the REST
//! backend share the same JSON shape.

use crate::error::{KbError, Result};
use crate::media::{MediaItem, MediaKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The two fixed product lines every folder and article belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pabx,
    Omni,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pabx, Category::Omni];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pabx => "pabx",
            Category::Omni => "omni",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pabx" => Ok(Category::Pabx),
            "omni" => Ok(Category::Omni),
            _ => Err(KbError::InvalidCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(draft: NewFolder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` onto this folder. Category is fixed at creation.
    pub fn apply(&mut self, patch: FolderPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub folder_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    /// Display order is insertion order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(draft: NewArticle) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            folder_id: draft.folder_id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            images: draft.images,
            videos: draft.videos,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` onto this article. Fields the patch leaves as `None`
    /// keep their current value.
    pub fn apply(&mut self, patch: ArticlePatch) {
        if let Some(folder_id) = patch.folder_id {
            self.folder_id = folder_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(videos) = patch.videos {
            self.videos = videos;
        }
        self.updated_at = Utc::now();
    }

    /// All attachments, images first, each list in display order.
    pub fn media(&self) -> Vec<MediaItem> {
        self.images
            .iter()
            .map(|url| MediaItem::new(MediaKind::Image, url))
            .chain(
                self.videos
                    .iter()
                    .map(|url| MediaItem::new(MediaKind::Video, url)),
            )
            .collect()
    }
}

/// Everything needed to create a folder; id and timestamps are stamped by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    pub name: String,
    pub category: Category,
}

impl NewFolder {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub folder_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl NewArticle {
    pub fn new(
        folder_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            folder_id,
            title: title.into(),
            content: content.into(),
            category,
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_videos(mut self, videos: Vec<String>) -> Self {
        self.videos = videos;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub name: Option<String>,
}

impl FolderPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub folder_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
