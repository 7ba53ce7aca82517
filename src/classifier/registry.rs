use crate::classifier::direct::DirectMatcher;
use crate::classifier::models::{ClassifiedSource, ProviderKind};
use crate::classifier::tiktok::TikTokMatcher;
use crate::classifier::traits::ProviderMatcher;
use crate::classifier::youtube::YouTubeMatcher;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::trace;

/// The provider registry
///
/// Holds the platform matchers in priority order and routes a URL to the
/// first one that recognizes it. Unrecognized URLs go to the fallback,
/// which treats them as direct media.
pub struct ProviderRegistry {
    matchers: Vec<Arc<dyn ProviderMatcher>>,
    fallback: Arc<dyn ProviderMatcher>,
}

static DEFAULT_REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::default);

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(
            vec![Arc::new(YouTubeMatcher::new()), Arc::new(TikTokMatcher::new())],
            Arc::new(DirectMatcher::new()),
        )
    }
}

impl ProviderRegistry {
    /// Create a new registry with the given matchers and fallback
    pub fn new(matchers: Vec<Arc<dyn ProviderMatcher>>, fallback: Arc<dyn ProviderMatcher>) -> Self {
        Self { matchers, fallback }
    }

    /// Shared registry with the built-in YouTube, TikTok and direct matchers
    pub fn global() -> &'static ProviderRegistry {
        &DEFAULT_REGISTRY
    }

    /// Find the best matcher for a given URL
    fn find_matcher(&self, url: &str) -> &Arc<dyn ProviderMatcher> {
        for matcher in &self.matchers {
            if matcher.supports(url) {
                trace!("Routing {} to matcher: {}", url, matcher.id());
                return matcher;
            }
        }
        &self.fallback
    }

    pub fn classify(&self, url: &str) -> ProviderKind {
        self.find_matcher(url).kind()
    }

    /// Embeddable URL for recognized platforms, the input unchanged otherwise
    pub fn to_embed_url(&self, url: &str) -> String {
        self.find_matcher(url)
            .embed_url(url)
            .unwrap_or_else(|| url.to_string())
    }

    /// Classify and extract everything at once
    pub fn resolve(&self, url: &str) -> ClassifiedSource {
        let matcher = self.find_matcher(url);
        ClassifiedSource {
            kind: matcher.kind(),
            video_id: matcher.extract_id(url),
            embed_url: matcher.embed_url(url).unwrap_or_else(|| url.to_string()),
        }
    }

    /// Cheap pre-playback check for submitted links
    pub fn is_valid_video_reference(&self, url: &str) -> bool {
        self.matchers.iter().any(|m| m.looks_like(url)) || self.fallback.looks_like(url)
    }
}
