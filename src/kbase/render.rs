//! Terminal output for the CLI. Everything that prints lives here.

use chrono::{DateTime, Utc};
use colored::*;
use kbase::api::FolderSummary;
use kbase::media::{embed_url, is_direct_video};
use kbase::model::{Article, Category, Folder};
use kbase::query::CategoryCounts;
use std::collections::HashMap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

const TIME_WIDTH: usize = 14;
const SHORT_ID_LEN: usize = 8;
const CATEGORY_WIDTH: usize = 6;

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn info(message: &str) {
    println!("{}", message.dimmed());
}

pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..SHORT_ID_LEN].to_string()
}

pub fn print_folders(folders: &[FolderSummary], width: usize) {
    if folders.is_empty() {
        println!("No folders found.");
        return;
    }

    for summary in folders {
        let folder = &summary.folder;
        let id = format!("{} ", short_id(&folder.id));
        let category = format!("{:<w$} ", folder.category, w = CATEGORY_WIDTH);
        let count = format!("{:>4} ", summary.article_count);

        let fixed = id.width() + category.width() + count.width() + TIME_WIDTH;
        let available = width.saturating_sub(fixed);
        let name = truncate_to_width(&folder.name, available);
        let padding = available.saturating_sub(name.width());

        println!(
            "{}{}{}{}{}{}",
            id.yellow(),
            category_colored(&category, folder.category),
            name.bold(),
            " ".repeat(padding),
            count,
            format_time_ago(folder.updated_at).dimmed()
        );
    }
}

/// One line per article: id, category, folder name, title with content preview.
pub fn print_articles(articles: &[&Article], folders: &HashMap<Uuid, &Folder>, width: usize) {
    if articles.is_empty() {
        println!("No articles found.");
        return;
    }

    for article in articles {
        let id = format!("{} ", short_id(&article.id));
        let category = format!("{:<w$} ", article.category, w = CATEGORY_WIDTH);
        let folder = format!("[{}] ", folder_name(folders, &article.folder_id));

        let preview: String = article
            .content
            .chars()
            .take(60)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            article.title.clone()
        } else {
            format!("{} {}", article.title, preview)
        };

        let fixed = id.width() + category.width() + folder.width() + TIME_WIDTH;
        let available = width.saturating_sub(fixed);
        let text = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(text.width());

        println!(
            "{}{}{}{}{}{}",
            id.yellow(),
            category_colored(&category, article.category),
            folder.cyan(),
            text,
            " ".repeat(padding),
            format_time_ago(article.updated_at).dimmed()
        );
    }
}

pub fn print_full_articles(articles: &[&Article], folders: &HashMap<Uuid, &Folder>) {
    for (i, article) in articles.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", short_id(&article.id).yellow(), article.title.bold());
        println!(
            "{}",
            format!(
                "{} · {} · updated {}",
                article.category,
                folder_name(folders, &article.folder_id),
                format_time_ago(article.updated_at).trim()
            )
            .dimmed()
        );
        println!("--------------------------------");
        println!("{}", article.content);

        if !article.images.is_empty() {
            println!("\n{}", "Images:".bold());
            for (n, url) in article.images.iter().enumerate() {
                println!("  {}. {}", n + 1, url);
            }
        }
        if !article.videos.is_empty() {
            println!("\n{}", "Videos:".bold());
            for (n, url) in article.videos.iter().enumerate() {
                let player = embed_url(url);
                if player != *url {
                    println!("  {}. {} {}", n + 1, url, format!("-> {}", player).dimmed());
                } else if is_direct_video(url) {
                    println!("  {}. {} {}", n + 1, url, "(file)".dimmed());
                } else {
                    println!("  {}. {}", n + 1, url);
                }
            }
        }
    }
}

pub fn print_counts(counts: &CategoryCounts, folders: &[FolderSummary]) {
    for category in Category::ALL {
        let folder_count = folders
            .iter()
            .filter(|s| s.folder.category == category)
            .count();
        println!(
            "{} {:>5} articles {:>5} folders",
            category_colored(&format!("{:<w$}", category, w = CATEGORY_WIDTH), category),
            counts.get(category),
            folder_count
        );
    }
    println!(
        "{}",
        format!(
            "{:<w$} {:>5} articles {:>5} folders",
            "total",
            counts.total(),
            folders.len(),
            w = CATEGORY_WIDTH
        )
        .dimmed()
    );
}

fn category_colored(text: &str, category: Category) -> ColoredString {
    match category {
        Category::Pabx => text.blue(),
        Category::Omni => text.magenta(),
    }
}

fn folder_name<'a>(folders: &HashMap<Uuid, &'a Folder>, id: &Uuid) -> &'a str {
    folders.get(id).map(|f| f.name.as_str()).unwrap_or("(no folder)")
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("Install", 20), "Install");
    }

    #[test]
    fn truncate_counts_wide_characters() {
        let cut = truncate_to_width("配置配置配置", 6);
        assert!(cut.width() <= 6);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn truncate_to_zero_width_is_empty() {
        assert_eq!(truncate_to_width("Install", 0), "");
        assert_eq!(truncate_to_width("Install", 1), "…");
    }

    #[test]
    fn short_id_is_eight_hex_chars() {
        let id = Uuid::new_v4();
        let short = short_id(&id);
        assert_eq!(short.len(), 8);
        assert!(id.to_string().starts_with(&short));
    }
}
