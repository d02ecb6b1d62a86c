//! # Read-side Queries
//!
//! Search, filtering, sorting and counting for whoever presents the
//! knowledge base. Everything here is computed on demand from the full
//! collection. Nothing is indexed or cached, which is fine at the scale of
//! a single user's client-held data.
//!
//! - Search is a case-insensitive substring match on article title or
//!   content, or on folder name. A blank term matches everything.
//! - Article listings are sorted by recency (most recently updated first).
//!   The sort is stable, so ties keep storage order.
//! - Folder listings are sorted by name, ignoring case.

use crate::model::{Article, Category, Folder};
use std::borrow::Borrow;
use uuid::Uuid;

pub fn matches_article(article: &Article, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    article.title.to_lowercase().contains(&term) || article.content.to_lowercase().contains(&term)
}

pub fn matches_folder(folder: &Folder, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || folder.name.to_lowercase().contains(&term)
}

/// Most recently updated first.
pub fn sort_by_recency<T: Borrow<Article>>(articles: &mut [T]) {
    articles.sort_by(|a, b| b.borrow().updated_at.cmp(&a.borrow().updated_at));
}

pub fn sort_by_name<T: Borrow<Folder>>(folders: &mut [T]) {
    folders.sort_by_cached_key(|f| f.borrow().name.to_lowercase());
}

pub fn article_count(articles: &[Article], folder_id: &Uuid) -> usize {
    articles.iter().filter(|a| &a.folder_id == folder_id).count()
}

/// Combined category / folder / text filter for article listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub category: Option<Category>,
    pub folder_id: Option<Uuid>,
    pub search: Option<String>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn folder(mut self, folder_id: Uuid) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        if let Some(category) = self.category {
            if article.category != category {
                return false;
            }
        }
        if let Some(folder_id) = &self.folder_id {
            if &article.folder_id != folder_id {
                return false;
            }
        }
        match &self.search {
            Some(term) => matches_article(article, term),
            None => true,
        }
    }

    /// Matching articles, most recently updated first.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let mut matched: Vec<&Article> = articles.iter().filter(|a| self.matches(a)).collect();
        sort_by_recency(&mut matched);
        matched
    }
}

/// Number of articles per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub pabx: usize,
    pub omni: usize,
}

impl CategoryCounts {
    pub fn from_articles(articles: &[Article]) -> Self {
        articles
            .iter()
            .fold(Self::default(), |mut counts, article| {
                match article.category {
                    Category::Pabx => counts.pabx += 1,
                    Category::Omni => counts.omni += 1,
                }
                counts
            })
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Pabx => self.pabx,
            Category::Omni => self.omni,
        }
    }

    pub fn total(&self) -> usize {
        self.pabx + self.omni
    }
}
