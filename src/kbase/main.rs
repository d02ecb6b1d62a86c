use clap::Parser;
use directories::ProjectDirs;
use kbase::api::{ArticleDraft, ArticleEdit, KnowledgeBase};
use kbase::config::{KbConfig, CONFIG_KEYS};
use kbase::error::{KbError, Result};
use kbase::model::{ArticlePatch, Category, Folder};
use kbase::query::ArticleFilter;
use kbase::store::fs_backend::FsBackend;
use std::collections::HashMap;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod args;
mod render;
use args::{ArticleBody, ArticleCommands, Cli, Commands, FolderCommands};

const HOME_ENV: &str = "KBASE_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    kb: KnowledgeBase<FsBackend>,
    config: KbConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Folder(cmd)) => match cmd {
            FolderCommands::Add { name, category } => {
                handle_folder_add(&mut ctx, name.join(" "), category)
            }
            FolderCommands::List { category, search } => {
                handle_folder_list(&ctx, category, search)
            }
            FolderCommands::Rename { id, name } => handle_folder_rename(&mut ctx, id, name.join(" ")),
            FolderCommands::Rm { ids } => handle_folder_rm(&mut ctx, ids),
        },
        Some(Commands::Article(cmd)) => match cmd {
            ArticleCommands::Add {
                folder,
                title,
                body,
                category,
            } => handle_article_add(&mut ctx, folder, title.join(" "), body, category),
            ArticleCommands::List {
                category,
                folder,
                search,
            } => handle_article_list(&ctx, category, folder, search),
            ArticleCommands::View { ids } => handle_article_view(&ctx, ids),
            ArticleCommands::Edit {
                id,
                title,
                content,
                category,
                folder,
                add_images,
                add_videos,
                remove_image,
                remove_video,
            } => {
                let edit = ArticleEdit {
                    patch: ArticlePatch {
                        title,
                        content,
                        category,
                        ..Default::default()
                    },
                    folder,
                    remove_image: remove_image.map(position).transpose()?,
                    remove_video: remove_video.map(position).transpose()?,
                    add_images,
                    add_videos,
                };
                handle_article_edit(&mut ctx, id, edit)
            }
            ArticleCommands::Rm { ids } => handle_article_rm(&mut ctx, ids),
        },
        Some(Commands::Stats) | None => handle_stats(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("kbase=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "kbase", "kbase")
        .ok_or_else(|| KbError::Api("Could not determine data dir".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = KbConfig::load(&data_dir)?;
    let kb = KnowledgeBase::open(FsBackend::new(&data_dir))?;
    tracing::debug!(data_dir = %kb.backend().root().display(), "knowledge base opened");

    Ok(AppContext {
        kb,
        config,
        data_dir,
    })
}

// --- Folders ---

fn handle_folder_add(
    ctx: &mut AppContext,
    name: String,
    category: Option<Category>,
) -> Result<()> {
    let category = category.unwrap_or(ctx.config.default_category);
    let folder = ctx.kb.create_folder(name, category)?;
    render::success(&format!(
        "Created folder {} {} ({})",
        render::short_id(&folder.id),
        folder.name,
        folder.category
    ));
    Ok(())
}

fn handle_folder_list(
    ctx: &AppContext,
    category: Option<Category>,
    search: Option<String>,
) -> Result<()> {
    let folders = ctx.kb.folders(category, search.as_deref());
    render::print_folders(&folders, ctx.config.preview_width);
    Ok(())
}

fn handle_folder_rename(ctx: &mut AppContext, id: String, name: String) -> Result<()> {
    let folder = ctx.kb.rename_folder(&id, name)?;
    render::success(&format!(
        "Renamed folder {} to {}",
        render::short_id(&folder.id),
        folder.name
    ));
    Ok(())
}

fn handle_folder_rm(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    // Resolve everything first so a typo does not leave a half-applied batch.
    let resolved = ids
        .iter()
        .map(|id| ctx.kb.resolve_folder(id))
        .collect::<Result<Vec<Uuid>>>()?;

    for id in resolved {
        let removal = ctx.kb.delete_folder(&id.to_string())?;
        render::success(&format!(
            "Deleted folder {} ({} articles removed)",
            removal.folder.name,
            removal.articles.len()
        ));
    }
    Ok(())
}

// --- Articles ---

fn handle_article_add(
    ctx: &mut AppContext,
    folder: String,
    title: String,
    body: ArticleBody,
    category: Option<Category>,
) -> Result<()> {
    let content = match body.content {
        Some(content) => content,
        None => read_piped_stdin()?,
    };

    let article = ctx.kb.create_article(ArticleDraft {
        folder,
        title,
        content,
        category,
        images: body.images,
        videos: body.videos,
    })?;
    render::success(&format!(
        "Created article {} {}",
        render::short_id(&article.id),
        article.title
    ));
    Ok(())
}

fn handle_article_list(
    ctx: &AppContext,
    category: Option<Category>,
    folder: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let filter = ArticleFilter {
        category,
        folder_id: folder.map(|sel| ctx.kb.resolve_folder(&sel)).transpose()?,
        search,
    };
    let articles = ctx.kb.articles(&filter);
    render::print_articles(&articles, &folder_index(&ctx.kb), ctx.config.preview_width);
    Ok(())
}

fn handle_article_view(ctx: &AppContext, ids: Vec<String>) -> Result<()> {
    let articles = ids
        .iter()
        .map(|id| ctx.kb.article(id))
        .collect::<Result<Vec<_>>>()?;
    render::print_full_articles(&articles, &folder_index(&ctx.kb));
    Ok(())
}

fn handle_article_edit(ctx: &mut AppContext, id: String, edit: ArticleEdit) -> Result<()> {
    if edit.is_empty() {
        ctx.kb.resolve_article(&id)?;
        render::info("Nothing to change.");
        return Ok(());
    }

    let article = ctx.kb.apply_edit(&id, edit)?;
    render::success(&format!(
        "Updated article {} {}",
        render::short_id(&article.id),
        article.title
    ));
    Ok(())
}

fn handle_article_rm(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let resolved = ids
        .iter()
        .map(|id| ctx.kb.resolve_article(id))
        .collect::<Result<Vec<Uuid>>>()?;

    for id in resolved {
        let article = ctx.kb.delete_article(&id.to_string())?;
        render::success(&format!("Deleted article {}", article.title));
    }
    Ok(())
}

// --- Misc ---

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let folders = ctx.kb.folders(None, None);
    render::print_counts(&ctx.kb.counts(), &folders);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            render::success(&format!("{} = {}", key, ctx.config.get(&key)?));
        }
    }
    Ok(())
}

fn folder_index(kb: &KnowledgeBase<FsBackend>) -> HashMap<Uuid, &Folder> {
    kb.folder_store().all().iter().map(|f| (f.id, f)).collect()
}

/// Convert a 1-based position from the command line.
fn position(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| KbError::Api("Positions start at 1".into()))
}

fn read_piped_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer.trim_end().to_string())
}
