use crate::classifier::ProviderKind;
use serde::{Deserialize, Serialize};

/// Change notifications published by the playback context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A new source was selected
    SourceChanged {
        source: String,
        kind: ProviderKind,
    },
    PlayStateChanged(bool),
    VolumeChanged(f32),
    /// Playback position as a percentage of the duration
    ProgressChanged(f64),
    FullscreenChanged(bool),
    ErrorChanged(bool),
    /// Seconds left before another upload is permitted
    CooldownTick(u32),
    /// Back to the default source
    Reset,
}
