use crate::classifier::models::ProviderKind;

/// Core trait for all provider matchers
///
/// Each matcher recognizes the URL shapes of one hosting platform and knows
/// how to turn a recognized URL into an embeddable one.
pub trait ProviderMatcher: Send + Sync {
    /// Returns a unique identifier for this matcher (e.g., "youtube", "direct")
    fn id(&self) -> &'static str;

    /// Provider kind produced for URLs this matcher recognizes
    fn kind(&self) -> ProviderKind;

    /// Extracts the provider video id, or `None` if the URL is not recognized
    fn extract_id(&self, url: &str) -> Option<String>;

    /// Checks if this matcher can handle the given URL
    fn supports(&self, url: &str) -> bool {
        self.extract_id(url).is_some()
    }

    /// Whether the URL has this provider's shape, even without a usable id.
    ///
    /// Link validation is looser than embedding: `youtu.be/` alone passes.
    fn looks_like(&self, url: &str) -> bool {
        self.supports(url)
    }

    /// Builds the embeddable URL for a recognized URL
    fn embed_url(&self, url: &str) -> Option<String>;
}
