//! Desktop media host backed by the local filesystem

use crate::host::models::{MediaFile, FALLBACK_DOWNLOAD_NAME};
use crate::host::traits::MediaHost;
use crate::utils::error::VidboxError;
use anyhow::Result;
use async_trait::async_trait;
use path_absolutize::Absolutize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// What the host currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostStatus {
    pub playing: Option<String>,
    pub volume: f32,
    pub fullscreen: bool,
}

/// Media host that serves picked files through `file://` URLs
pub struct LocalMediaHost {
    download_dir: PathBuf,
    object_urls: Mutex<HashSet<String>>,
    status: Mutex<HostStatus>,
}

impl LocalMediaHost {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            object_urls: Mutex::new(HashSet::new()),
            status: Mutex::new(HostStatus {
                volume: 1.0,
                ..HostStatus::default()
            }),
        }
    }

    pub async fn status(&self) -> HostStatus {
        self.status.lock().await.clone()
    }

    /// Number of object URLs handed out and not yet revoked
    pub async fn live_object_urls(&self) -> usize {
        self.object_urls.lock().await.len()
    }
}

/// Turn a path into a percent-encoded `file://` URL
pub fn file_url(path: &Path) -> Result<String, VidboxError> {
    let invalid = || VidboxError::InvalidPath(path.to_string_lossy().into_owned());
    let absolute = path.absolutize().map_err(|_| invalid())?;
    Url::from_file_path(&*absolute)
        .map(String::from)
        .map_err(|_| invalid())
}

/// Path behind a `file://` URL, `None` for any other source
pub fn file_path_from_url(src: &str) -> Option<PathBuf> {
    let url = Url::parse(src).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Keep only the last component so a stored name cannot leave the download dir
fn safe_file_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(FALLBACK_DOWNLOAD_NAME)
}

#[async_trait]
impl MediaHost for LocalMediaHost {
    async fn create_object_url(&self, file: &MediaFile) -> Result<String> {
        let path = file
            .path
            .as_ref()
            .ok_or_else(|| VidboxError::FileNotFound(file.name.clone()))?;

        if tokio::fs::metadata(path).await.is_err() {
            return Err(VidboxError::FileNotFound(path.to_string_lossy().into_owned()).into());
        }

        let url = file_url(path)?;
        self.object_urls.lock().await.insert(url.clone());
        debug!("Created object URL {}", url);
        Ok(url)
    }

    async fn revoke_object_url(&self, url: &str) {
        if self.object_urls.lock().await.remove(url) {
            debug!("Revoked object URL {}", url);
        }
    }

    async fn play(&self, src: &str) -> Result<()> {
        if let Some(path) = file_path_from_url(src) {
            if tokio::fs::metadata(&path).await.is_err() {
                warn!("Cannot play missing file {:?}", path);
                return Err(VidboxError::FileNotFound(path.to_string_lossy().into_owned()).into());
            }
        }

        self.status.lock().await.playing = Some(src.to_string());
        info!("Playing {}", src);
        Ok(())
    }

    async fn pause(&self) {
        self.status.lock().await.playing = None;
    }

    async fn set_volume(&self, volume: f32) {
        self.status.lock().await.volume = volume;
    }

    async fn request_fullscreen(&self) -> Result<()> {
        self.status.lock().await.fullscreen = true;
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<()> {
        self.status.lock().await.fullscreen = false;
        Ok(())
    }

    async fn save_file(&self, file: &MediaFile, file_name: &str) -> Result<PathBuf> {
        let source = file
            .path
            .as_ref()
            .ok_or_else(|| VidboxError::FileNotFound(file.name.clone()))?;

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(VidboxError::IoError)?;
        let target = self.download_dir.join(safe_file_name(file_name));
        tokio::fs::copy(source, &target)
            .await
            .map_err(VidboxError::IoError)?;

        info!("Saved {} to {:?}", file.name, target);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_object_url_requires_existing_file() {
        let dir = tempdir().expect("temp dir");
        let host = LocalMediaHost::new(dir.path().join("downloads"));

        let missing = MediaFile::new("gone.mp4", "video/mp4", Some(dir.path().join("gone.mp4")));
        assert!(host.create_object_url(&missing).await.is_err());

        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"data").await.expect("write");
        let file = MediaFile::from_path(&path).expect("media file");
        let url = host.create_object_url(&file).await.expect("object url");
        assert!(url.starts_with("file://"));
        assert_eq!(host.live_object_urls().await, 1);

        host.revoke_object_url(&url).await;
        assert_eq!(host.live_object_urls().await, 0);
    }

    #[tokio::test]
    async fn test_play_missing_file_fails() {
        let dir = tempdir().expect("temp dir");
        let host = LocalMediaHost::new(dir.path());
        let src = file_url(&dir.path().join("nope.mp4")).expect("file url");
        assert!(host.play(&src).await.is_err());
        assert!(host.play("https://cdn.example.com/a.mp4").await.is_ok());
        assert!(host.status().await.playing.is_some());
    }

    #[tokio::test]
    async fn test_save_file_copies_into_download_dir() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"frames").await.expect("write");

        let host = LocalMediaHost::new(dir.path().join("out"));
        let file = MediaFile::from_path(&path).expect("media file");
        let saved = host.save_file(&file, "copy.mp4").await.expect("save");

        assert_eq!(saved, dir.path().join("out").join("copy.mp4"));
        assert_eq!(tokio::fs::read(&saved).await.expect("read"), b"frames");
    }

    #[tokio::test]
    async fn test_save_file_stays_inside_download_dir() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"frames").await.expect("write");

        let out = dir.path().join("out");
        let host = LocalMediaHost::new(&out);
        let file = MediaFile::from_path(&path).expect("media file");

        let saved = host.save_file(&file, "../escape.mp4").await.expect("save");
        assert_eq!(saved, out.join("escape.mp4"));
        assert!(!dir.path().join("escape.mp4").exists());

        let saved = host.save_file(&file, "/tmp/abs.mp4").await.expect("save");
        assert_eq!(saved, out.join("abs.mp4"));

        let saved = host.save_file(&file, "..").await.expect("save");
        assert_eq!(saved, out.join(FALLBACK_DOWNLOAD_NAME));
    }

    #[tokio::test]
    async fn test_file_urls_are_percent_encoded() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("my clip #1.mp4");
        tokio::fs::write(&path, b"data").await.expect("write");

        let url = file_url(&path).expect("file url");
        assert!(url.starts_with("file://"));
        assert!(url.contains("my%20clip%20%231.mp4"));
        assert!(crate::classifier::is_valid_video_reference(&url));
        assert_eq!(file_path_from_url(&url), Some(path.clone()));

        let host = LocalMediaHost::new(dir.path().join("downloads"));
        assert!(host.play(&url).await.is_ok());
        assert_eq!(file_path_from_url("https://cdn.example.com/a.mp4"), None);
    }
}
