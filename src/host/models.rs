//! Files handed to the player by the user

use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name used when a downloaded file has no name of its own
pub const FALLBACK_DOWNLOAD_NAME: &str = "downloaded_video.mp4";

/// A picked media file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Display name, usually the file name
    pub name: String,
    pub mime_type: String,
    /// Location on the host; `None` for files only known by name (rehydrated sessions)
    pub path: Option<PathBuf>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            path,
        }
    }

    /// Build from a path on disk, guessing the MIME type from the extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let absolute = path.absolutize()?.into_owned();
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_type_for(&absolute).to_string();

        Ok(Self {
            name,
            mime_type,
            path: Some(absolute),
        })
    }

    /// A file remembered from an earlier session, known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: String::new(),
            path: None,
        }
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// Name to save a copy under
    pub fn download_name(&self) -> &str {
        if self.name.trim().is_empty() {
            FALLBACK_DOWNLOAD_NAME
        } else {
            &self.name
        }
    }
}

/// MIME type for a video file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_type_for(Path::new("a/b/clip.MP4")), "video/mp4");
        assert_eq!(mime_type_for(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_type_for(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_from_path_is_absolute() {
        let file = MediaFile::from_path(Path::new("holiday.webm")).expect("absolutize");
        assert_eq!(file.name, "holiday.webm");
        assert!(file.is_video());
        assert!(file.path.as_ref().is_some_and(|p| p.is_absolute()));
    }

    #[test]
    fn test_download_name_fallback() {
        assert_eq!(MediaFile::named("").download_name(), FALLBACK_DOWNLOAD_NAME);
        assert_eq!(MediaFile::named("a.mp4").download_name(), "a.mp4");
    }
}
