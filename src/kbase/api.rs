//! # API Facade
//!
//! [`KnowledgeBase`] is the single entry point for UI clients. It owns one
//! [`FolderStore`] and one [`ArticleStore`] over a shared backend and adds
//! the things neither store does on its own:
//!
//! - **Selector resolution**: callers pass ids or unique id prefixes
//!   (`"3f2a"`), which are resolved to full UUIDs or reported as missing or
//!   ambiguous.
//! - **Cascading folder deletion**: [`KnowledgeBase::delete_folder`] removes
//!   the folder's articles first, then the folder. The stores themselves
//!   never cascade.
//! - **Listings**: filtered, sorted views built from [`crate::query`].
//!
//! Unlike the stores, the facade reports unknown selectors as errors,
//! because a user who typed an id wants to hear that it matched nothing.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `KnowledgeBase<FsBackend>`
//! - Testing: `KnowledgeBase<MemBackend>`

use crate::error::{KbError, Result};
use crate::media::MediaKind;
use crate::model::{Article, ArticlePatch, Category, Folder, FolderPatch, NewArticle, NewFolder};
use crate::query::{self, ArticleFilter, CategoryCounts};
use crate::store::article_store::ArticleStore;
use crate::store::backend::StorageBackend;
use crate::store::folder_store::FolderStore;
use std::rc::Rc;
use uuid::Uuid;

/// A folder with the number of articles currently filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderSummary {
    pub folder: Folder,
    pub article_count: usize,
}

/// What a cascading folder deletion removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRemoval {
    pub folder: Folder,
    pub articles: Vec<Article>,
}

/// Input for [`KnowledgeBase::create_article`].
///
/// `folder` is a selector. When `category` is `None` the article takes its
/// folder's category.
#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    pub folder: String,
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

/// Input for [`KnowledgeBase::apply_edit`].
///
/// `folder` is a selector. Removals happen before additions, positions are
/// zero-based.
#[derive(Debug, Clone, Default)]
pub struct ArticleEdit {
    pub patch: ArticlePatch,
    pub folder: Option<String>,
    pub remove_image: Option<usize>,
    pub remove_video: Option<usize>,
    pub add_images: Vec<String>,
    pub add_videos: Vec<String>,
}

impl ArticleEdit {
    pub fn is_empty(&self) -> bool {
        self.patch.is_empty()
            && self.folder.is_none()
            && self.remove_image.is_none()
            && self.remove_video.is_none()
            && self.add_images.is_empty()
            && self.add_videos.is_empty()
    }
}

pub struct KnowledgeBase<B: StorageBackend> {
    backend: Rc<B>,
    folders: FolderStore<Rc<B>>,
    articles: ArticleStore<Rc<B>>,
}

impl<B: StorageBackend> KnowledgeBase<B> {
    pub fn open(backend: B) -> Result<Self> {
        let backend = Rc::new(backend);
        let folders = FolderStore::open(Rc::clone(&backend))?;
        let articles = ArticleStore::open(Rc::clone(&backend))?;
        Ok(Self {
            backend,
            folders,
            articles,
        })
    }

    /// Both stores start empty; the backend's contents are not read.
    pub fn with_backend(backend: B) -> Self {
        let backend = Rc::new(backend);
        Self {
            folders: FolderStore::with_backend(Rc::clone(&backend)),
            articles: ArticleStore::with_backend(Rc::clone(&backend)),
            backend,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn folder_store(&self) -> &FolderStore<Rc<B>> {
        &self.folders
    }

    pub fn folder_store_mut(&mut self) -> &mut FolderStore<Rc<B>> {
        &mut self.folders
    }

    pub fn article_store(&self) -> &ArticleStore<Rc<B>> {
        &self.articles
    }

    // --- Selectors ---

    pub fn resolve_folder(&self, selector: &str) -> Result<Uuid> {
        resolve_id(self.folders.all().iter().map(|f| f.id), selector)
            .map_err(|matches| lookup_error(selector, matches, KbError::FolderNotFound))
    }

    pub fn resolve_article(&self, selector: &str) -> Result<Uuid> {
        resolve_id(self.articles.all().iter().map(|a| a.id), selector)
            .map_err(|matches| lookup_error(selector, matches, KbError::ArticleNotFound))
    }

    // --- Folders ---

    pub fn create_folder(&mut self, name: impl Into<String>, category: Category) -> Result<Folder> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KbError::Api("Folder name cannot be empty".into()));
        }
        self.folders.add(NewFolder::new(name.trim(), category))
    }

    pub fn folder(&self, selector: &str) -> Result<&Folder> {
        let id = self.resolve_folder(selector)?;
        self.folders
            .get_by_id(&id)
            .ok_or_else(|| KbError::FolderNotFound(selector.to_string()))
    }

    /// Folders sorted by name, optionally restricted to a category and a
    /// name search, each with its article count.
    pub fn folders(
        &self,
        category: Option<Category>,
        search: Option<&str>,
    ) -> Vec<FolderSummary> {
        let mut folders: Vec<&Folder> = match category {
            Some(category) => self.folders.get_by_category(category),
            None => self.folders.all().iter().collect(),
        };
        if let Some(term) = search {
            folders.retain(|f| query::matches_folder(f, term));
        }
        query::sort_by_name(&mut folders);

        folders
            .into_iter()
            .map(|folder| FolderSummary {
                folder: folder.clone(),
                article_count: query::article_count(self.articles.all(), &folder.id),
            })
            .collect()
    }

    pub fn rename_folder(&mut self, selector: &str, name: impl Into<String>) -> Result<Folder> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KbError::Api("Folder name cannot be empty".into()));
        }
        let id = self.resolve_folder(selector)?;
        self.folders
            .update(&id, FolderPatch::name(name.trim()))?
            .ok_or_else(|| KbError::FolderNotFound(selector.to_string()))
    }

    /// Delete a folder together with every article filed under it.
    ///
    /// Articles go first: if removing the folder then fails, the folder is
    /// still there and the call can simply be retried.
    pub fn delete_folder(&mut self, selector: &str) -> Result<FolderRemoval> {
        let id = self.resolve_folder(selector)?;
        let articles = self.articles.delete_by_folder_id(&id)?;
        let folder = self
            .folders
            .delete(&id)?
            .ok_or_else(|| KbError::FolderNotFound(selector.to_string()))?;

        tracing::info!(folder_id = %id, articles = articles.len(), "folder removed with its articles");
        Ok(FolderRemoval { folder, articles })
    }

    // --- Articles ---

    pub fn create_article(&mut self, draft: ArticleDraft) -> Result<Article> {
        if draft.title.trim().is_empty() {
            return Err(KbError::Api("Title cannot be empty".into()));
        }
        let folder = self.folder(&draft.folder)?;
        let category = draft.category.unwrap_or(folder.category);
        let new_article = NewArticle::new(folder.id, draft.title, draft.content, category)
            .with_images(draft.images)
            .with_videos(draft.videos);
        self.articles.add(new_article)
    }

    pub fn article(&self, selector: &str) -> Result<&Article> {
        let id = self.resolve_article(selector)?;
        self.articles
            .get_by_id(&id)
            .ok_or_else(|| KbError::ArticleNotFound(selector.to_string()))
    }

    pub fn articles(&self, filter: &ArticleFilter) -> Vec<&Article> {
        filter.apply(self.articles.all())
    }

    pub fn edit_article(&mut self, selector: &str, patch: ArticlePatch) -> Result<Article> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(KbError::Api("Title cannot be empty".into()));
            }
        }
        let id = self.resolve_article(selector)?;
        self.articles
            .update(&id, patch)?
            .ok_or_else(|| KbError::ArticleNotFound(selector.to_string()))
    }

    /// Apply a combined edit in one write.
    ///
    /// Every selector and media position is checked before anything is
    /// saved, so a rejected edit leaves the article untouched.
    pub fn apply_edit(&mut self, selector: &str, edit: ArticleEdit) -> Result<Article> {
        let ArticleEdit {
            mut patch,
            folder,
            remove_image,
            remove_video,
            add_images,
            add_videos,
        } = edit;

        let article = self.article(selector)?;
        let id = article.id;
        if let Some(folder) = folder {
            patch.folder_id = Some(self.resolve_folder(&folder)?);
        }
        if remove_image.is_some() || !add_images.is_empty() {
            let mut images = patch.images.take().unwrap_or_else(|| article.images.clone());
            edit_media_list(&mut images, MediaKind::Image, remove_image, add_images)?;
            patch.images = Some(images);
        }
        if remove_video.is_some() || !add_videos.is_empty() {
            let mut videos = patch.videos.take().unwrap_or_else(|| article.videos.clone());
            edit_media_list(&mut videos, MediaKind::Video, remove_video, add_videos)?;
            patch.videos = Some(videos);
        }

        self.edit_article(&id.to_string(), patch)
    }

    /// Move an article to another folder. The category is left as it is.
    pub fn move_article(&mut self, selector: &str, folder_selector: &str) -> Result<Article> {
        self.apply_edit(
            selector,
            ArticleEdit {
                folder: Some(folder_selector.to_string()),
                ..Default::default()
            },
        )
    }

    /// Append one attachment to the end of the image or video list.
    pub fn attach_media(
        &mut self,
        selector: &str,
        kind: MediaKind,
        url: impl Into<String>,
    ) -> Result<Article> {
        let mut edit = ArticleEdit::default();
        match kind {
            MediaKind::Image => edit.add_images.push(url.into()),
            MediaKind::Video => edit.add_videos.push(url.into()),
        }
        self.apply_edit(selector, edit)
    }

    /// Remove the attachment at `position` (zero-based) from the image or video list.
    pub fn detach_media(
        &mut self,
        selector: &str,
        kind: MediaKind,
        position: usize,
    ) -> Result<Article> {
        let mut edit = ArticleEdit::default();
        match kind {
            MediaKind::Image => edit.remove_image = Some(position),
            MediaKind::Video => edit.remove_video = Some(position),
        }
        self.apply_edit(selector, edit)
    }

    pub fn delete_article(&mut self, selector: &str) -> Result<Article> {
        let id = self.resolve_article(selector)?;
        self.articles
            .delete(&id)?
            .ok_or_else(|| KbError::ArticleNotFound(selector.to_string()))
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts::from_articles(self.articles.all())
    }
}

/// Remove the entry at `remove` (zero-based), then append `add`.
fn edit_media_list(
    list: &mut Vec<String>,
    kind: MediaKind,
    remove: Option<usize>,
    add: Vec<String>,
) -> Result<()> {
    if let Some(position) = remove {
        if position >= list.len() {
            return Err(KbError::Api(format!(
                "No {} at position {} ({} attached)",
                kind,
                position + 1,
                list.len()
            )));
        }
        list.remove(position);
    }
    for url in add {
        if url.trim().is_empty() {
            return Err(KbError::Api("Media URL cannot be empty".into()));
        }
        list.push(url);
    }
    Ok(())
}

/// Match `selector` as a case-insensitive prefix of the hyphenated id.
/// `Err` carries every match when there is not exactly one.
fn resolve_id(
    ids: impl IntoIterator<Item = Uuid>,
    selector: &str,
) -> std::result::Result<Uuid, Vec<Uuid>> {
    let needle = selector.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(Vec::new());
    }
    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [only] => Ok(*only),
        _ => Err(matches),
    }
}

fn lookup_error(selector: &str, matches: Vec<Uuid>, not_found: fn(String) -> KbError) -> KbError {
    if matches.is_empty() {
        not_found(selector.to_string())
    } else {
        KbError::AmbiguousId {
            prefix: selector.to_string(),
            matches,
        }
    }
}
