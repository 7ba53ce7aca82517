//! Upload throttling
//!
//! [`Cooldown`] is the plain counter; [`UploadThrottle`] drives it from a
//! single scheduled task.

pub mod cooldown;
pub mod timer;

pub use cooldown::{Cooldown, CooldownPhase, DEFAULT_COOLDOWN_SECS};
pub use timer::{CooldownHandle, UploadThrottle};
