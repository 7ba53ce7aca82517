//! Store keys for state that survives restarts

pub const LAST_DEVICE_VIDEO_SRC: &str = "last_device_video_src";
pub const LAST_LINK_VIDEO_SRC: &str = "last_link_video_src";
pub const LAST_VIDEO_FILE_NAME: &str = "last_video_file_name";
pub const LAST_VOLUME: &str = "last_volume";
/// Milliseconds since the Unix epoch
pub const LAST_UPLOAD_TIME: &str = "last_upload_time";
