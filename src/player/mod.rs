//! Player state and the operations the UI drives it with

pub mod context;
pub mod events;
pub mod keys;
pub mod state;
pub mod transport;

pub use context::{PlaybackContext, UploadOutcome};
pub use events::PlaybackEvent;
pub use state::{PlaybackState, RenderMode};
pub use transport::{format_time, progress_percent, seek_target};
