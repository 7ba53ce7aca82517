//! Video source classification
//!
//! Decides whether a source string is a YouTube link, a TikTok link or a
//! direct/device media reference, and derives the URL to play it with.
//! Classification is total: any string gets an answer, unknown shapes fall
//! through to [`ProviderKind::Device`].

pub mod direct;
pub mod models;
pub mod registry;
pub mod tiktok;
pub mod traits;
pub mod youtube;

pub use direct::{has_video_extension, DirectMatcher, VIDEO_EXTENSIONS};
pub use models::{ClassifiedSource, ProviderKind};
pub use registry::ProviderRegistry;
pub use tiktok::TikTokMatcher;
pub use traits::ProviderMatcher;
pub use youtube::YouTubeMatcher;

/// Determine the provider category of a video source
pub fn classify(url: &str) -> ProviderKind {
    ProviderRegistry::global().classify(url)
}

/// Provider-specific embed URL, or the input unchanged for direct sources
pub fn to_embed_url(url: &str) -> String {
    ProviderRegistry::global().to_embed_url(url)
}

/// True for known-platform links and for links ending in a video extension
pub fn is_valid_video_reference(url: &str) -> bool {
    ProviderRegistry::global().is_valid_video_reference(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_examples() {
        assert!(is_valid_video_reference("foo.mp4"));
        assert!(is_valid_video_reference("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_video_reference("https://www.tiktok.com/@u/video/99"));
        assert!(!is_valid_video_reference("not a url"));
        assert!(!is_valid_video_reference("https://www.tiktok.com/@u"));
    }

    #[test]
    fn test_unknown_passes_through() {
        let url = "https://example.com/stream";
        assert_eq!(classify(url), ProviderKind::Device);
        assert_eq!(to_embed_url(url), url);
    }
}
