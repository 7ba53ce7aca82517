//! Snapshot of everything the player UI renders from

use crate::classifier::ProviderKind;
use crate::host::MediaFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub source: String,
    /// Set only for sources that came from a picked file
    pub file: Option<MediaFile>,
    pub kind: ProviderKind,
    pub is_playing: bool,
    /// 0.0 - 1.0
    pub volume: f32,
    pub error: bool,
    pub fullscreen: bool,
    /// 0 - 100
    pub progress: f64,
    pub current_time: f64,
    pub duration: f64,
    pub last_upload: Option<DateTime<Utc>>,
    pub cooldown_remaining: u32,
}

impl PlaybackState {
    pub fn new(source: String, kind: ProviderKind, volume: f32) -> Self {
        Self {
            source,
            file: None,
            kind,
            is_playing: false,
            volume,
            error: false,
            fullscreen: false,
            progress: 0.0,
            current_time: 0.0,
            duration: 0.0,
            last_upload: None,
            cooldown_remaining: 0,
        }
    }

    /// Forget position info when the source changes
    pub(crate) fn clear_position(&mut self) {
        self.progress = 0.0;
        self.current_time = 0.0;
        self.duration = 0.0;
    }
}

/// How the UI should present the current source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Playback failed; show an error overlay
    Error,
    /// Platform player in an iframe
    Embed { url: String, kind: ProviderKind },
    /// Native video element with custom controls
    Native { src: String },
}
