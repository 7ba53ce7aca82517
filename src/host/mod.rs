//! Host capabilities: media playback surface and key-value persistence

pub mod local;
pub mod memory;
pub mod models;
pub mod traits;

pub use local::{file_path_from_url, file_url, HostStatus, LocalMediaHost};
pub use memory::MemoryStore;
pub use models::{mime_type_for, MediaFile, FALLBACK_DOWNLOAD_NAME};
pub use traits::{KeyValueStore, MediaHost};
