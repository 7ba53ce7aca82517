//! Application configuration

use crate::throttle::DEFAULT_COOLDOWN_SECS;
use crate::utils::paths::{get_database_path, get_downloads_dir};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Source shown on first launch and after a reset
pub const DEFAULT_VIDEO_SRC: &str = "https://youtu.be/RgcOQo-Ty_I";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Seconds an upload blocks the next one
    pub cooldown_secs: u32,

    /// Countdown tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Source used when nothing was stored
    pub default_video_src: String,

    /// Volume used when nothing was stored (0.0 - 1.0)
    pub default_volume: f32,

    /// Preference database location
    pub database_path: PathBuf,

    /// Where downloaded copies of uploaded files go
    pub download_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            tick_interval_ms: 1000,
            default_video_src: DEFAULT_VIDEO_SRC.to_string(),
            default_volume: 1.0,
            database_path: get_database_path(),
            download_dir: get_downloads_dir(),
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file, using defaults when the file is missing
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: AppSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;

        info!("Loaded settings from {:?}", path);
        Ok(settings.sanitized())
    }

    /// Write settings as pretty JSON, creating parent directories
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Replace values that would break the player with defaults
    pub fn sanitized(mut self) -> Self {
        if self.cooldown_secs == 0 {
            warn!("cooldown_secs of 0 is not allowed, using {}", DEFAULT_COOLDOWN_SECS);
            self.cooldown_secs = DEFAULT_COOLDOWN_SECS;
        }
        if self.tick_interval_ms == 0 {
            warn!("tick_interval_ms of 0 is not allowed, using 1000");
            self.tick_interval_ms = 1000;
        }
        if self.default_video_src.trim().is_empty() {
            self.default_video_src = DEFAULT_VIDEO_SRC.to_string();
        }
        self.default_volume = if self.default_volume.is_finite() {
            self.default_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}
