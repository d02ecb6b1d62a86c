use super::Collection;
use crate::error::Result;
use crate::model::{Article, Folder};
use std::path::PathBuf;
use std::rc::Rc;

/// Abstract interface for raw collection I/O.
/// The backend decides *where* collections live (files, memory), while the
/// stores decide *what* goes in them.
pub trait StorageBackend {
    /// Load the folder collection. A collection that was never saved is empty.
    fn load_folders(&self) -> Result<Vec<Folder>>;

    /// Replace the stored folder collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_folders(&self, folders: &[Folder]) -> Result<()>;

    fn load_articles(&self) -> Result<Vec<Article>>;

    fn save_articles(&self, articles: &[Article]) -> Result<()>;

    /// Where a collection is kept. For MemBackend, a virtual path.
    fn location(&self, collection: Collection) -> PathBuf;
}

/// Lets the folder and article stores share one backend.
impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn load_folders(&self) -> Result<Vec<Folder>> {
        (**self).load_folders()
    }

    fn save_folders(&self, folders: &[Folder]) -> Result<()> {
        (**self).save_folders(folders)
    }

    fn load_articles(&self) -> Result<Vec<Article>> {
        (**self).load_articles()
    }

    fn save_articles(&self, articles: &[Article]) -> Result<()> {
        (**self).save_articles(articles)
    }

    fn location(&self, collection: Collection) -> PathBuf {
        (**self).location(collection)
    }
}
