//! Data structures for classified video sources

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hosting platform of a video source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local file or direct media URL, played by a native video element
    #[default]
    Device,
    YouTube,
    TikTok,
}

impl ProviderKind {
    /// Get string representation used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Device => "device",
            ProviderKind::YouTube => "youtube",
            ProviderKind::TikTok => "tiktok",
        }
    }

    /// Whether sources of this kind are played through an embedded iframe
    pub fn is_embedded(&self) -> bool {
        !matches!(self, ProviderKind::Device)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" => Ok(ProviderKind::Device),
            "youtube" => Ok(ProviderKind::YouTube),
            "tiktok" => Ok(ProviderKind::TikTok),
            other => Err(format!("Unknown provider kind: {}", other)),
        }
    }
}

/// Full classification result for a video source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSource {
    pub kind: ProviderKind,
    /// Provider video id; `None` for device sources
    pub video_id: Option<String>,
    /// Embeddable URL, or the source unchanged for device sources
    pub embed_url: String,
}
