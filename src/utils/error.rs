//! Error handling for vidbox

use thiserror::Error;

/// Main error type for vidbox
#[derive(Debug, Error)]
pub enum VidboxError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Media file not found: {0}")]
    FileNotFound(String),

    #[error("Path cannot be served as a file URL: {0}")]
    InvalidPath(String),
}

/// Why an upload or link submission was turned down
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Please choose a video file")]
    NotAVideo,

    #[error("Wait {0} seconds before the next upload")]
    CooldownActive(u32),

    #[error("Enter a video link")]
    EmptyLink,

    #[error("Invalid video link")]
    InvalidLink,

    #[error("Failed to load the file: {0}")]
    HostFailure(String),
}
