//! YouTube URL recognition

use crate::classifier::models::ProviderKind;
use crate::classifier::traits::ProviderMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

/// Watch, embed, `/v/`, `/e/`, channel-path and short-link forms, capturing the 11-char id
static YOUTUBE_VIDEO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("youtube pattern is valid")
});

/// Same shapes without requiring an id, used for link validation
static YOUTUBE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)",
    )
    .expect("youtube shape pattern is valid")
});

pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

pub struct YouTubeMatcher;

impl Default for YouTubeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderMatcher for YouTubeMatcher {
    fn id(&self) -> &'static str {
        "youtube"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::YouTube
    }

    fn extract_id(&self, url: &str) -> Option<String> {
        YOUTUBE_VIDEO
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn looks_like(&self, url: &str) -> bool {
        YOUTUBE_SHAPE.is_match(url)
    }

    fn embed_url(&self, url: &str) -> Option<String> {
        self.extract_id(url)
            .map(|id| format!("{}{}", YOUTUBE_EMBED_BASE, id))
    }
}
