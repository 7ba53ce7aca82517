//! vidbox library
//!
//! Video source classification, upload throttling and the playback state
//! container that a player UI is built on.

pub mod classifier;
pub mod database;
pub mod host;
pub mod player;
pub mod throttle;
pub mod utils;

// Re-export main types for easier use
pub use classifier::{classify, is_valid_video_reference, to_embed_url, ClassifiedSource, ProviderKind};
pub use host::{KeyValueStore, LocalMediaHost, MediaFile, MediaHost, MemoryStore};
pub use player::{PlaybackContext, PlaybackEvent, PlaybackState, RenderMode, UploadOutcome};
pub use throttle::{Cooldown, CooldownHandle, UploadThrottle};
pub use utils::{AppSettings, UploadError, VidboxError};
