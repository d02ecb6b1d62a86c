//! Article attachments.
//!
//! Images and videos are plain strings: remote URLs, paths served by the
//! backend's upload endpoint, or embedded `data:` URIs. This module cleans
//! up lists entered by users and turns well-known video page links into
//! their embeddable player URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static YOUTUBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/|v/)|youtu\.be/)([a-zA-Z0-9_-]{11})")
        .expect("valid youtube pattern")
});

static VIMEO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("valid vimeo pattern"));

static GOOGLE_DRIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9_-]+)").expect("valid drive pattern")
});

static DIRECT_VIDEO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg)(\?|$)").expect("valid video pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

impl MediaItem {
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

/// Trim every entry and drop the blank ones. Order and duplicates are kept.
pub fn normalize_media(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .filter_map(|url| {
            let trimmed = url.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Resolve a YouTube, Vimeo or Google Drive page link to its player URL.
/// Anything else is returned as given.
pub fn embed_url(url: &str) -> String {
    if let Some(caps) = YOUTUBE.captures(url) {
        return format!("https://www.youtube.com/embed/{}", &caps[1]);
    }
    if let Some(caps) = VIMEO.captures(url) {
        return format!("https://player.vimeo.com/video/{}", &caps[1]);
    }
    if let Some(caps) = GOOGLE_DRIVE.captures(url) {
        return format!("https://drive.google.com/file/d/{}/preview", &caps[1]);
    }
    url.to_string()
}

/// True when the URL points straight at a playable video file.
pub fn is_direct_video(url: &str) -> bool {
    DIRECT_VIDEO.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_entries_and_trims() {
        let input = vec![
            " a.png ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "b.png".to_string(),
            "a.png".to_string(),
        ];
        assert_eq!(normalize_media(input), vec!["a.png", "b.png", "a.png"]);
    }

    #[test]
    fn youtube_links_resolve_to_embed() {
        let expected = "https://www.youtube.com/embed/dQw4w9WgXcQ";
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            expected
        );
        assert_eq!(embed_url("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(
            embed_url("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            expected
        );
    }

    #[test]
    fn vimeo_and_drive_links_resolve() {
        assert_eq!(
            embed_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
        assert_eq!(
            embed_url("https://drive.google.com/file/d/1AbC-d_E/view?usp=sharing"),
            "https://drive.google.com/file/d/1AbC-d_E/preview"
        );
    }

    #[test]
    fn unknown_links_pass_through() {
        let url = "https://cdn.example.com/clip.mp4";
        assert_eq!(embed_url(url), url);
    }

    #[test]
    fn direct_video_detection() {
        assert!(is_direct_video("https://cdn.example.com/clip.mp4"));
        assert!(is_direct_video("/uploads/1700000000-42.WEBM"));
        assert!(is_direct_video("https://cdn.example.com/a.ogg?token=1"));
        assert!(!is_direct_video("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!is_direct_video("https://cdn.example.com/mp4/page"));
    }
}
