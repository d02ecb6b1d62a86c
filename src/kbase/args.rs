use clap::{Args, Parser, Subcommand};
use kbase::model::Category;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "kbase", bin_name = "kbase", version = get_version())]
#[command(about = "Support knowledge base: folders and articles per product line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage folders
    #[command(subcommand, alias = "f")]
    Folder(FolderCommands),

    /// Manage articles
    #[command(subcommand, alias = "a")]
    Article(ArticleCommands),

    /// Article counts per category
    Stats,

    /// Get or set configuration
    Config {
        /// Configuration key (default-category, preview-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder
    #[command(alias = "new")]
    Add {
        /// Folder name words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Category (pabx or omni); defaults to the configured one
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// List folders with their article counts
    #[command(alias = "ls")]
    List {
        /// Only folders of this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Search term (matches folder names)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Rename a folder
    Rename {
        /// Folder id or unique id prefix
        id: String,

        /// New name words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a folder and every article in it
    #[command(alias = "delete")]
    Rm {
        /// Folder ids or unique id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// Create an article in a folder
    #[command(alias = "new")]
    Add {
        /// Folder id or unique id prefix
        folder: String,

        /// Title words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        #[command(flatten)]
        body: ArticleBody,

        /// Category (pabx or omni); defaults to the folder's
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// List articles, most recently updated first
    #[command(alias = "ls")]
    List {
        /// Only articles of this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Only articles in this folder (id or unique prefix)
        #[arg(short, long)]
        folder: Option<String>,

        /// Search term (matches title and content)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one or more articles in full
    #[command(alias = "v")]
    View {
        /// Article ids or unique id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Change fields or attachments of an article
    #[command(alias = "e")]
    Edit {
        /// Article id or unique id prefix
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<Category>,

        /// Move to another folder (id or unique prefix)
        #[arg(short, long)]
        folder: Option<String>,

        /// Append an image URL
        #[arg(long = "add-image", value_name = "URL")]
        add_images: Vec<String>,

        /// Append a video URL
        #[arg(long = "add-video", value_name = "URL")]
        add_videos: Vec<String>,

        /// Remove the image at this position (1-based)
        #[arg(long = "remove-image", value_name = "N")]
        remove_image: Option<usize>,

        /// Remove the video at this position (1-based)
        #[arg(long = "remove-video", value_name = "N")]
        remove_video: Option<usize>,
    },

    /// Delete one or more articles
    #[command(alias = "delete")]
    Rm {
        /// Article ids or unique id prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ArticleBody {
    /// Article body (read from stdin when omitted and stdin is piped)
    #[arg(long)]
    pub content: Option<String>,

    /// Image URL to attach (repeatable)
    #[arg(long = "image", value_name = "URL")]
    pub images: Vec<String>,

    /// Video URL to attach (repeatable)
    #[arg(long = "video", value_name = "URL")]
    pub videos: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_folder_add_with_category() {
        let cli = Cli::try_parse_from(["kbase", "folder", "add", "Initial", "setup", "-c", "OMNI"])
            .unwrap();
        match cli.command {
            Some(Commands::Folder(FolderCommands::Add { name, category })) => {
                assert_eq!(name.join(" "), "Initial setup");
                assert_eq!(category, Some(Category::Omni));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["kbase", "folder", "list", "-c", "sales"]).is_err());
    }

    #[test]
    fn parses_repeated_media_flags() {
        let cli = Cli::try_parse_from([
            "kbase", "article", "add", "3f2a", "Install", "--image", "a.png", "--image", "b.png",
            "--video", "https://youtu.be/dQw4w9WgXcQ",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Article(ArticleCommands::Add { folder, body, .. })) => {
                assert_eq!(folder, "3f2a");
                assert_eq!(body.images, vec!["a.png", "b.png"]);
                assert_eq!(body.videos.len(), 1);
                assert!(body.content.is_none());
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["kbase", "stats", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
