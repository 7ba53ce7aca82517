//! Pure countdown state, advanced explicitly by the caller

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds an upload blocks further uploads
pub const DEFAULT_COOLDOWN_SECS: u32 = 10;

/// Where a cooldown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CooldownPhase {
    Idle,
    Cooling(u32),
}

/// Upload cooldown counter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: u32,
    duration: u32,
    last_upload: Option<DateTime<Utc>>,
}

impl Cooldown {
    /// Idle cooldown that permits uploads immediately
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start counting down from `duration_secs`, stamping the upload time
    pub fn start(duration_secs: u32) -> Self {
        Self::start_at(duration_secs, Utc::now())
    }

    pub fn start_at(duration_secs: u32, at: DateTime<Utc>) -> Self {
        Self {
            remaining: duration_secs,
            duration: duration_secs,
            last_upload: Some(at),
        }
    }

    /// Decrement by one second, never below zero. Returns the remaining seconds.
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn is_blocked(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn last_upload(&self) -> Option<DateTime<Utc>> {
        self.last_upload
    }

    pub fn phase(&self) -> CooldownPhase {
        match self.remaining {
            0 => CooldownPhase::Idle,
            n => CooldownPhase::Cooling(n),
        }
    }
}
