//! # Storage Layer
//!
//! Two stores hold the client's copy of the knowledge base:
//!
//! - [`folder_store::FolderStore`]: every [`Folder`](crate::model::Folder).
//! - [`article_store::ArticleStore`]: every [`Article`](crate::model::Article).
//!
//! Each store is an owned in-memory collection that loads once when opened
//! and writes the whole collection back through a [`backend::StorageBackend`]
//! after every mutation that changed something.
//!
//! ## Write Semantics
//!
//! Mutations are replace-on-write. The store builds the next collection,
//! hands it to the backend, and swaps it in only after the save succeeded.
//! A failed save leaves memory exactly as it was before the call.
//!
//! Unknown ids are not errors: `update` and `delete` return `None` and do
//! not touch the backend.
//!
//! ## Referential Integrity
//!
//! The stores do not know about each other. Deleting a folder through
//! [`folder_store::FolderStore::delete`] leaves its articles in place; use
//! [`article_store::ArticleStore::delete_by_folder_id`] (or the cascading
//! [`crate::api::KnowledgeBase::delete_folder`]) to remove them.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: JSON snapshot files in a data directory.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── knowledge-base-folders.json    # {"version": 1, "items": [Folder...]}
//! ├── knowledge-base-articles.json   # {"version": 1, "items": [Article...]}
//! └── config.json                    # CLI configuration
//! ```

use std::fmt;

pub mod article_store;
pub mod backend;
pub mod folder_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod snapshot;

/// The two independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Folders,
    Articles,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Folders => "knowledge-base-folders",
            Collection::Articles => "knowledge-base-articles",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
