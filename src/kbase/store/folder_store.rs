use super::backend::StorageBackend;
use crate::error::Result;
use crate::model::{Category, Folder, FolderPatch, NewFolder};
use uuid::Uuid;

/// Owns every folder held by the running client.
pub struct FolderStore<B: StorageBackend> {
    pub(crate) backend: B,
    folders: Vec<Folder>,
}

impl<B: StorageBackend> FolderStore<B> {
    /// Load the persisted collection and take ownership of the backend.
    pub fn open(backend: B) -> Result<Self> {
        let folders = backend.load_folders()?;
        tracing::debug!(count = folders.len(), "folders loaded");
        Ok(Self { backend, folders })
    }

    /// Start from an empty collection without reading the backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            folders: Vec::new(),
        }
    }

    /// Re-read the collection from the backend, dropping in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        self.folders = self.backend.load_folders()?;
        Ok(())
    }

    /// Every folder, in storage order.
    pub fn all(&self) -> &[Folder] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn add(&mut self, draft: NewFolder) -> Result<Folder> {
        let folder = Folder::new(draft);
        let mut next = self.folders.clone();
        next.push(folder.clone());
        self.commit(next)?;

        tracing::debug!(folder_id = %folder.id, category = %folder.category, "folder added");
        Ok(folder)
    }

    /// Merge `patch` onto the folder with `id`. Returns `None` (and writes
    /// nothing) when no such folder exists.
    pub fn update(&mut self, id: &Uuid, patch: FolderPatch) -> Result<Option<Folder>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.folders.clone();
        next[pos].apply(patch);
        let updated = next[pos].clone();
        self.commit(next)?;

        tracing::debug!(folder_id = %id, "folder updated");
        Ok(Some(updated))
    }

    /// Remove the folder with `id`. Its articles are left alone.
    pub fn delete(&mut self, id: &Uuid) -> Result<Option<Folder>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.folders.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        tracing::debug!(folder_id = %id, "folder deleted");
        Ok(Some(removed))
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.folders.iter().position(|f| &f.id == id)
    }

    fn commit(&mut self, next: Vec<Folder>) -> Result<()> {
        if let Err(e) = self.backend.save_folders(&next) {
            tracing::warn!(error = %e, "failed to persist folders");
            return Err(e);
        }
        self.folders = next;
        Ok(())
    }
}
