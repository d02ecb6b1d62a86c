use super::backend::StorageBackend;
use super::Collection;
use crate::error::{KbError, Result};
use crate::model::{Article, Folder};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the stores are
/// single-threaded, which lets `StorageBackend` take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    folders: RefCell<Vec<Folder>>,
    articles: RefCell<Vec<Article>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-persisted collections, as if reloaded at client start.
    pub fn with_data(folders: Vec<Folder>, articles: Vec<Article>) -> Self {
        Self {
            folders: RefCell::new(folders),
            articles: RefCell::new(articles),
            ..Self::default()
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves, across both collections.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(KbError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_folders(&self) -> Result<Vec<Folder>> {
        Ok(self.folders.borrow().clone())
    }

    fn save_folders(&self, folders: &[Folder]) -> Result<()> {
        self.check_writable()?;
        *self.folders.borrow_mut() = folders.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.borrow().clone())
    }

    fn save_articles(&self, articles: &[Article]) -> Result<()> {
        self.check_writable()?;
        *self.articles.borrow_mut() = articles.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self, collection: Collection) -> PathBuf {
        PathBuf::from(format!("memory://{}", collection.name()))
    }
}
