use super::article_store::ArticleStore;
use super::folder_store::FolderStore;
use super::mem_backend::MemBackend;
use crate::api::KnowledgeBase;

pub type InMemoryFolderStore = FolderStore<MemBackend>;
pub type InMemoryArticleStore = ArticleStore<MemBackend>;
pub type InMemoryKnowledgeBase = KnowledgeBase<MemBackend>;

impl Default for InMemoryFolderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFolderStore {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKnowledgeBase {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::api::ArticleDraft;
    use crate::model::{Category, Folder};

    pub struct KbFixture {
        pub kb: InMemoryKnowledgeBase,
    }

    impl Default for KbFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KbFixture {
        pub fn new() -> Self {
            Self {
                kb: InMemoryKnowledgeBase::new(),
            }
        }

        pub fn with_folder(mut self, name: &str, category: Category) -> Self {
            self.kb.create_folder(name, category).unwrap();
            self
        }

        /// Add `count` articles to the folder called `folder_name`, creating
        /// the folder in `category` if it does not exist yet.
        pub fn with_articles(mut self, folder_name: &str, category: Category, count: usize) -> Self {
            let folder = self.folder_named(folder_name, category);
            for i in 0..count {
                self.kb
                    .create_article(ArticleDraft {
                        folder: folder.id.to_string(),
                        title: format!("Test Article {}", i + 1),
                        content: format!("Content for article {}", i + 1),
                        ..Default::default()
                    })
                    .unwrap();
            }
            self
        }

        pub fn folder(&self, name: &str) -> Folder {
            self.kb
                .folder_store()
                .all()
                .iter()
                .find(|f| f.name == name)
                .cloned()
                .unwrap_or_else(|| panic!("no fixture folder named {}", name))
        }

        fn folder_named(&mut self, name: &str, category: Category) -> Folder {
            match self.kb.folder_store().all().iter().find(|f| f.name == name) {
                Some(folder) => folder.clone(),
                None => self.kb.create_folder(name, category).unwrap(),
            }
        }
    }
}
