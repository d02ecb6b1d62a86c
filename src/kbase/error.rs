use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum KbError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Id prefix '{prefix}' is ambiguous ({} matches)", .matches.len())]
    AmbiguousId { prefix: String, matches: Vec<Uuid> },

    #[error("Invalid category '{0}' (expected 'pabx' or 'omni')")]
    InvalidCategory(String),

    #[error("Unsupported snapshot version {found} (this build reads up to {supported})")]
    UnsupportedSnapshot { found: u32, supported: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, KbError>;
