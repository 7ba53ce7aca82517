use crate::host::models::MediaFile;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Platform media capabilities the player relies on
///
/// This keeps object URLs, fullscreen and file saving out of the core so
/// it can run against a browser bridge, a desktop shell or a test double.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Returns a URL the native player can load the file from
    async fn create_object_url(&self, file: &MediaFile) -> Result<String>;

    /// Releases a URL previously returned by `create_object_url`
    async fn revoke_object_url(&self, url: &str);

    /// Starts native playback of `src`
    async fn play(&self, src: &str) -> Result<()>;

    async fn pause(&self);

    async fn set_volume(&self, volume: f32);

    async fn request_fullscreen(&self) -> Result<()>;

    async fn exit_fullscreen(&self) -> Result<()>;

    /// Saves a copy of the file under `file_name`, returning where it went
    async fn save_file(&self, file: &MediaFile, file_name: &str) -> Result<PathBuf>;
}

/// Simple string key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
