use super::backend::StorageBackend;
use crate::error::Result;
use crate::media::normalize_media;
use crate::model::{Article, ArticlePatch, Category, NewArticle};
use uuid::Uuid;

/// Owns every article held by the running client.
///
/// `folder_id` is never checked against the folder store; an article may
/// outlive its folder until someone calls [`ArticleStore::delete_by_folder_id`].
pub struct ArticleStore<B: StorageBackend> {
    pub(crate) backend: B,
    articles: Vec<Article>,
}

impl<B: StorageBackend> ArticleStore<B> {
    pub fn open(backend: B) -> Result<Self> {
        let articles = backend.load_articles()?;
        tracing::debug!(count = articles.len(), "articles loaded");
        Ok(Self { backend, articles })
    }

    /// Start from an empty collection without reading the backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            articles: Vec::new(),
        }
    }

    /// Re-read the collection from the backend, dropping in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        self.articles = self.backend.load_articles()?;
        Ok(())
    }

    /// Every article, in storage order.
    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn add(&mut self, mut draft: NewArticle) -> Result<Article> {
        draft.images = normalize_media(draft.images);
        draft.videos = normalize_media(draft.videos);

        let article = Article::new(draft);
        let mut next = self.articles.clone();
        next.push(article.clone());
        self.commit(next)?;

        tracing::debug!(
            article_id = %article.id,
            folder_id = %article.folder_id,
            "article added"
        );
        Ok(article)
    }

    /// Merge `patch` onto the article with `id`; unknown ids are a no-op.
    pub fn update(&mut self, id: &Uuid, mut patch: ArticlePatch) -> Result<Option<Article>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        patch.images = patch.images.map(normalize_media);
        patch.videos = patch.videos.map(normalize_media);

        let mut next = self.articles.clone();
        next[pos].apply(patch);
        let updated = next[pos].clone();
        self.commit(next)?;

        tracing::debug!(article_id = %id, "article updated");
        Ok(Some(updated))
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<Option<Article>> {
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.articles.clone();
        let removed = next.remove(pos);
        self.commit(next)?;

        tracing::debug!(article_id = %id, "article deleted");
        Ok(Some(removed))
    }

    /// Remove every article filed under `folder_id`, returning them.
    pub fn delete_by_folder_id(&mut self, folder_id: &Uuid) -> Result<Vec<Article>> {
        let (removed, kept): (Vec<Article>, Vec<Article>) = self
            .articles
            .iter()
            .cloned()
            .partition(|a| &a.folder_id == folder_id);

        if removed.is_empty() {
            return Ok(removed);
        }
        self.commit(kept)?;

        tracing::debug!(folder_id = %folder_id, count = removed.len(), "folder articles deleted");
        Ok(removed)
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    pub fn get_by_folder_id(&self, folder_id: &Uuid) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| &a.folder_id == folder_id)
            .collect()
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<&Article> {
        self.articles.iter().find(|a| &a.id == id)
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.articles.iter().position(|a| &a.id == id)
    }

    fn commit(&mut self, next: Vec<Article>) -> Result<()> {
        if let Err(e) = self.backend.save_articles(&next) {
            tracing::warn!(error = %e, "failed to persist articles");
            return Err(e);
        }
        self.articles = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn make_store() -> ArticleStore<MemBackend> {
        ArticleStore::open(MemBackend::new()).unwrap()
    }

    fn draft(folder_id: Uuid, title: &str, category: Category) -> NewArticle {
        NewArticle::new(folder_id, title, "...", category)
    }

    #[test]
    fn add_stamps_id_and_timestamps() {
        let mut store = make_store();
        let folder_id = Uuid::new_v4();
        let created = store
            .add(draft(folder_id, "Install", Category::Pabx))
            .unwrap();

        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.get_by_id(&created.id), Some(&created));
        assert_eq!(created.folder_id, folder_id);
    }

    #[test]
    fn add_does_not_validate_folder_reference() {
        let mut store = make_store();
        let dangling = Uuid::new_v4();
        let created = store.add(draft(dangling, "Orphan", Category::Omni)).unwrap();
        assert_eq!(store.get_by_folder_id(&dangling), vec![&created]);
    }

    #[test]
    fn add_normalizes_media_but_keeps_order() {
        let mut store = make_store();
        let created = store
            .add(
                draft(Uuid::new_v4(), "Media", Category::Pabx)
                    .with_images(vec!["b.png".into(), " ".into(), "a.png ".into()])
                    .with_videos(vec!["".into()]),
            )
            .unwrap();
        assert_eq!(created.images, vec!["b.png", "a.png"]);
        assert!(created.videos.is_empty());
    }

    #[test]
    fn update_merges_partial_fields() {
        let mut store = make_store();
        let created = store
            .add(
                draft(Uuid::new_v4(), "Install", Category::Pabx)
                    .with_images(vec!["one.png".into()]),
            )
            .unwrap();

        let updated = store
            .update(
                &created.id,
                ArticlePatch {
                    title: Some("Install v2".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Install v2");
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.images, created.images);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_on_missing_id_leaves_collection_unchanged() {
        let backend = Rc::new(MemBackend::new());
        let mut store = ArticleStore::open(backend.clone()).unwrap();
        store
            .add(draft(Uuid::new_v4(), "Install", Category::Pabx))
            .unwrap();
        let before = store.all().to_vec();
        let writes = backend.writes();

        let result = store
            .update(
                &Uuid::new_v4(),
                ArticlePatch {
                    title: Some("Nope".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.all(), before.as_slice());
        assert_eq!(backend.writes(), writes);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = make_store();
        store
            .add(draft(Uuid::new_v4(), "Install", Category::Pabx))
            .unwrap();
        assert!(store.delete(&Uuid::new_v4()).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_by_folder_id_removes_exactly_that_folder() {
        let mut store = make_store();
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.add(draft(target, "A", Category::Pabx)).unwrap();
        let survivor = store.add(draft(other, "B", Category::Pabx)).unwrap();
        store.add(draft(target, "C", Category::Omni)).unwrap();

        let removed = store.delete_by_folder_id(&target).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|a| a.folder_id == target));
        assert!(store.get_by_folder_id(&target).is_empty());
        assert_eq!(store.all(), &[survivor]);
    }

    #[test]
    fn delete_by_folder_id_without_matches_does_not_write() {
        let backend = Rc::new(MemBackend::new());
        let mut store = ArticleStore::open(backend.clone()).unwrap();
        store.add(draft(Uuid::new_v4(), "A", Category::Pabx)).unwrap();
        let writes = backend.writes();

        assert!(store.delete_by_folder_id(&Uuid::new_v4()).unwrap().is_empty());
        assert_eq!(backend.writes(), writes);
    }

    #[test]
    fn queries_preserve_storage_order() {
        let mut store = make_store();
        let folder = Uuid::new_v4();
        let first = store.add(draft(folder, "First", Category::Pabx)).unwrap();
        store
            .add(draft(Uuid::new_v4(), "Elsewhere", Category::Omni))
            .unwrap();
        let third = store.add(draft(folder, "Third", Category::Pabx)).unwrap();

        assert_eq!(store.get_by_folder_id(&folder), vec![&first, &third]);
        assert_eq!(store.get_by_category(Category::Pabx), vec![&first, &third]);
        assert_eq!(store.get_by_category(Category::Omni).len(), 1);
    }

    #[test]
    fn persisted_collection_round_trips() {
        let backend = Rc::new(MemBackend::new());
        let mut store = ArticleStore::open(backend.clone()).unwrap();
        for i in 0..4 {
            store
                .add(draft(Uuid::new_v4(), &format!("A{}", i), Category::Omni))
                .unwrap();
        }

        let reloaded = ArticleStore::open(backend).unwrap();
        let original: HashSet<Uuid> = store.all().iter().map(|a| a.id).collect();
        let restored: HashSet<Uuid> = reloaded.all().iter().map(|a| a.id).collect();
        assert_eq!(original, restored);
        for article in store.all() {
            assert_eq!(reloaded.get_by_id(&article.id), Some(article));
        }
    }

    #[test]
    fn reload_sees_deletions_from_another_store() {
        let backend = Rc::new(MemBackend::new());
        let folder = Uuid::new_v4();
        let mut first = ArticleStore::open(backend.clone()).unwrap();
        first.add(draft(folder, "One", Category::Pabx)).unwrap();
        first.add(draft(folder, "Two", Category::Pabx)).unwrap();

        let mut second = ArticleStore::open(backend).unwrap();
        assert_eq!(second.delete_by_folder_id(&folder).unwrap().len(), 2);

        assert_eq!(first.len(), 2);
        first.reload().unwrap();
        assert!(first.is_empty());
    }
}
