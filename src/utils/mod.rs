//! Utility modules for error handling, configuration and paths

pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::{AppSettings, DEFAULT_VIDEO_SRC};
pub use error::{UploadError, VidboxError};
pub use paths::{get_app_data_dir, get_database_path, get_downloads_dir, get_settings_path};
