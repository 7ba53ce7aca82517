//! TikTok URL recognition

use crate::classifier::models::ProviderKind;
use crate::classifier::traits::ProviderMatcher;
use once_cell::sync::Lazy;
use regex::Regex;

static TIKTOK_VIDEO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:(?:www|vm)\.)?tiktok\.com/@[^/]+/video/(\d+)")
        .expect("tiktok pattern is valid")
});

pub const TIKTOK_EMBED_BASE: &str = "https://www.tiktok.com/embed/v2/";

pub struct TikTokMatcher;

impl Default for TikTokMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TikTokMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderMatcher for TikTokMatcher {
    fn id(&self) -> &'static str {
        "tiktok"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::TikTok
    }

    fn extract_id(&self, url: &str) -> Option<String> {
        TIKTOK_VIDEO
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn embed_url(&self, url: &str) -> Option<String> {
        self.extract_id(url)
            .map(|id| format!("{}{}", TIKTOK_EMBED_BASE, id))
    }
}
