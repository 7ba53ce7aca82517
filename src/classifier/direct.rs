//! Direct media files and local object URLs

use crate::classifier::models::ProviderKind;
use crate::classifier::traits::ProviderMatcher;

/// Extensions accepted for direct links
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".ogg", ".mov"];

/// Fallback matcher: everything that is not a known platform plays natively.
pub struct DirectMatcher;

impl Default for DirectMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderMatcher for DirectMatcher {
    fn id(&self) -> &'static str {
        "direct"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Device
    }

    fn extract_id(&self, _url: &str) -> Option<String> {
        None
    }

    fn looks_like(&self, url: &str) -> bool {
        has_video_extension(url)
    }

    fn embed_url(&self, url: &str) -> Option<String> {
        Some(url.to_string())
    }
}

/// True if the path part of `url` ends with a known video extension (case-insensitive).
///
/// Query string and fragment are ignored, so signed links such as
/// `clip.mp4?token=abc` still count.
pub fn has_video_extension(url: &str) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_ascii_lowercase();

    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_checks() {
        assert!(has_video_extension("foo.mp4"));
        assert!(has_video_extension("https://cdn.example.com/a/b/CLIP.MOV"));
        assert!(has_video_extension("https://cdn.example.com/clip.webm?sig=1#t=3"));
        assert!(has_video_extension("file:///home/me/movie.ogg"));
        assert!(!has_video_extension("https://example.com/mp4"));
        assert!(!has_video_extension("movie.mkv"));
        assert!(!has_video_extension("not a url"));
        assert!(!has_video_extension(""));
    }

    #[test]
    fn test_direct_matcher_passes_url_through() {
        let matcher = DirectMatcher::new();
        assert_eq!(matcher.kind(), ProviderKind::Device);
        assert!(!matcher.supports("anything.mp4"));
        assert_eq!(matcher.embed_url("x.mp4").as_deref(), Some("x.mp4"));
    }
}
