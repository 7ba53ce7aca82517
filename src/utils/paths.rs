//! Platform path resolution
//!
//! All paths are absolute and follow the platform conventions exposed by
//! `dirs`, so the player behaves the same whether it is started from a
//! terminal or a desktop launcher.

use std::path::PathBuf;
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "vidbox";

/// Get the application data directory, creating it if needed.
///
/// Linux: `$XDG_DATA_HOME/vidbox`, macOS: `~/Library/Application Support/vidbox`.
pub fn get_app_data_dir() -> PathBuf {
    let dir = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create app data directory {:?}: {}", dir, e);
    }

    debug!("App data directory: {:?}", dir);
    dir
}

/// Default location of the preference database
pub fn get_database_path() -> PathBuf {
    get_app_data_dir().join("vidbox.db")
}

/// Default location of the settings file
pub fn get_settings_path() -> PathBuf {
    get_app_data_dir().join("settings.json")
}

/// Get the downloads directory, falling back to `~/Downloads` and then the temp dir.
pub fn get_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using temp dir");
            std::env::temp_dir()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_absolute() {
        let path = get_database_path();
        assert!(path.is_absolute(), "Database path must be absolute path");
        assert!(path.to_string_lossy().ends_with("vidbox.db"));
    }

    #[test]
    fn test_settings_path_sits_next_to_database() {
        assert_eq!(get_settings_path().parent(), get_database_path().parent());
    }

    #[test]
    fn test_downloads_dir_is_absolute() {
        assert!(get_downloads_dir().is_absolute());
    }
}
