use super::backend::StorageBackend;
use super::{snapshot, Collection};
use crate::error::Result;
use crate::model::{Article, Folder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Keeps each collection as a snapshot file under one data directory.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.location(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        snapshot::decode(&raw)
    }

    fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        self.ensure_dir()?;
        let content = snapshot::encode(items)?;

        // Atomic write
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", collection.name(), Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, self.location(collection))?;
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_folders(&self) -> Result<Vec<Folder>> {
        self.load(Collection::Folders)
    }

    fn save_folders(&self, folders: &[Folder]) -> Result<()> {
        self.save(Collection::Folders, folders)
    }

    fn load_articles(&self) -> Result<Vec<Article>> {
        self.load(Collection::Articles)
    }

    fn save_articles(&self, articles: &[Article]) -> Result<()> {
        self.save(Collection::Articles, articles)
    }

    fn location(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }
}
