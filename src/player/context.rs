//! Playback context: the single owner of player state
//!
//! The UI holds one [`PlaybackContext`] and calls into it for every user
//! action. Each change is published on a broadcast channel so any number of
//! views can follow along without sharing mutable state.

use crate::classifier::{self, ProviderKind};
use crate::host::{file_path_from_url, KeyValueStore, MediaFile, MediaHost};
use crate::player::events::PlaybackEvent;
use crate::player::keys;
use crate::player::state::{PlaybackState, RenderMode};
use crate::player::transport;
use crate::throttle::{CooldownHandle, UploadThrottle};
use crate::utils::config::AppSettings;
use crate::utils::error::UploadError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Result of an accepted upload or link submission
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub source: String,
    pub kind: ProviderKind,
    pub embed_url: String,
    /// The previous source was in an error state; that error was cleared
    pub cleared_error: bool,
    pub cooldown: CooldownHandle,
}

struct Inner {
    state: PlaybackState,
    /// Object URL backing the current device source, revoked on replacement
    object_url: Option<String>,
}

/// Shared playback context
pub struct PlaybackContext {
    settings: AppSettings,
    store: Arc<dyn KeyValueStore>,
    host: Arc<dyn MediaHost>,
    throttle: UploadThrottle,
    inner: RwLock<Inner>,
    /// Held from the cooldown check until the cooldown starts
    upload_gate: Mutex<()>,
    events: broadcast::Sender<PlaybackEvent>,
    cooldown_forwarder: JoinHandle<()>,
}

impl PlaybackContext {
    /// Build a context, restoring the previous session from `store`
    pub async fn load(
        settings: AppSettings,
        store: Arc<dyn KeyValueStore>,
        host: Arc<dyn MediaHost>,
    ) -> Result<Self> {
        let settings = settings.sanitized();

        let device_src = store.get(keys::LAST_DEVICE_VIDEO_SRC).await?;
        let link_src = store.get(keys::LAST_LINK_VIDEO_SRC).await?;
        let file_name = store.get(keys::LAST_VIDEO_FILE_NAME).await?;
        let volume = store
            .get(keys::LAST_VOLUME)
            .await?
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(settings.default_volume);
        let last_upload = store
            .get(keys::LAST_UPLOAD_TIME)
            .await?
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        let file = match (&device_src, file_name) {
            (Some(src), Some(name)) => Some(rehydrate_file(src, name)),
            _ => None,
        };
        let source = device_src
            .or(link_src)
            .unwrap_or_else(|| settings.default_video_src.clone());
        let kind = classifier::classify(&source);

        let mut state = PlaybackState::new(source, kind, volume);
        state.file = file;
        state.last_upload = last_upload;

        let throttle = UploadThrottle::new(settings.tick_interval());
        if let Some(uploaded) = last_upload {
            let elapsed = (Utc::now() - uploaded).num_seconds().max(0);
            let left = i64::from(settings.cooldown_secs) - elapsed;
            if left > 0 {
                throttle.resume_cooldown(left as u32, uploaded);
            }
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let cooldown_forwarder = spawn_cooldown_forwarder(throttle.subscribe(), events.clone());

        info!(
            "Playback context loaded: {} ({}), volume {:.1}",
            state.source, state.kind, state.volume
        );

        Ok(Self {
            settings,
            store,
            host,
            throttle,
            inner: RwLock::new(Inner {
                state,
                object_url: None,
            }),
            upload_gate: Mutex::new(()),
            events,
            cooldown_forwarder,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub fn cooldown(&self) -> CooldownHandle {
        self.throttle.subscribe()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub async fn snapshot(&self) -> PlaybackState {
        let mut state = self.inner.read().await.state.clone();
        state.cooldown_remaining = self.throttle.remaining();
        state
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.throttle.remaining()
    }

    pub fn is_upload_blocked(&self) -> bool {
        self.throttle.is_blocked()
    }

    /// Play a picked file. `None` means the picker returned nothing.
    pub async fn upload_file(&self, file: Option<MediaFile>) -> Result<UploadOutcome, UploadError> {
        let file = file.ok_or(UploadError::NoFileSelected)?;
        if !file.is_video() {
            return Err(UploadError::NotAVideo);
        }
        let _gate = self.upload_gate.lock().await;
        self.check_cooldown()?;

        let object_url = self
            .host
            .create_object_url(&file)
            .await
            .map_err(|e| UploadError::HostFailure(e.to_string()))?;

        let file_name = file.name.clone();
        let cleared_error = self
            .replace_source(object_url.clone(), Some(file), Some(object_url.clone()))
            .await;

        self.persist(keys::LAST_DEVICE_VIDEO_SRC, &object_url).await;
        self.persist(keys::LAST_VIDEO_FILE_NAME, &file_name).await;

        info!("Uploaded file {}", file_name);
        Ok(self.finish_upload(object_url, ProviderKind::Device, cleared_error).await)
    }

    /// Play a submitted link
    pub async fn submit_link(&self, link: &str) -> Result<UploadOutcome, UploadError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(UploadError::EmptyLink);
        }
        let _gate = self.upload_gate.lock().await;
        self.check_cooldown()?;
        if !classifier::is_valid_video_reference(link) {
            debug!("Rejected link: {}", link);
            return Err(UploadError::InvalidLink);
        }

        let cleared_error = self.replace_source(link.to_string(), None, None).await;

        self.persist(keys::LAST_LINK_VIDEO_SRC, link).await;
        self.forget(keys::LAST_DEVICE_VIDEO_SRC).await;
        self.forget(keys::LAST_VIDEO_FILE_NAME).await;

        let kind = classifier::classify(link);
        info!("Submitted {} link {}", kind, link);
        Ok(self.finish_upload(link.to_string(), kind, cleared_error).await)
    }

    /// Go back to the default source and forget the stored selection
    pub async fn reset_to_default(&self) {
        let previous_url = {
            let mut inner = self.inner.write().await;
            let source = self.settings.default_video_src.clone();
            let kind = classifier::classify(&source);
            let state = &mut inner.state;
            state.source = source;
            state.kind = kind;
            state.file = None;
            state.is_playing = false;
            state.error = false;
            state.clear_position();
            inner.object_url.take()
        };

        if let Some(url) = previous_url {
            self.host.revoke_object_url(&url).await;
        }
        self.host.pause().await;

        self.forget(keys::LAST_DEVICE_VIDEO_SRC).await;
        self.forget(keys::LAST_LINK_VIDEO_SRC).await;
        self.forget(keys::LAST_VIDEO_FILE_NAME).await;

        info!("Reset to default video");
        self.emit(PlaybackEvent::Reset);
    }

    /// Flip between playing and paused. Returns whether it is now playing.
    ///
    /// Does nothing while the controls are hidden.
    pub async fn toggle_play(&self) -> bool {
        let (source, start) = {
            let inner = self.inner.read().await;
            let state = &inner.state;
            if !has_controls(state) {
                return state.is_playing;
            }
            (state.source.clone(), !state.is_playing)
        };

        if !start {
            self.host.pause().await;
            self.inner.write().await.state.is_playing = false;
            self.emit(PlaybackEvent::PlayStateChanged(false));
            return false;
        }

        match self.host.play(&source).await {
            Ok(()) => {
                self.inner.write().await.state.is_playing = true;
                self.emit(PlaybackEvent::PlayStateChanged(true));
                true
            }
            Err(e) => {
                warn!("Playback of {} failed: {}", source, e);
                self.report_playback_error().await;
                false
            }
        }
    }

    /// Mark the current source as unplayable
    pub async fn report_playback_error(&self) {
        let was_playing = {
            let mut inner = self.inner.write().await;
            let was_playing = inner.state.is_playing;
            inner.state.error = true;
            inner.state.is_playing = false;
            was_playing
        };
        if was_playing {
            self.emit(PlaybackEvent::PlayStateChanged(false));
        }
        self.emit(PlaybackEvent::ErrorChanged(true));
    }

    /// Set the volume, clamped to 0.0 - 1.0. Non-finite values are ignored.
    pub async fn set_volume(&self, volume: f32) -> f32 {
        if !volume.is_finite() {
            return self.inner.read().await.state.volume;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.inner.write().await.state.volume = volume;

        self.host.set_volume(volume).await;
        self.persist(keys::LAST_VOLUME, &volume.to_string()).await;
        self.emit(PlaybackEvent::VolumeChanged(volume));
        volume
    }

    /// Record the native player's position
    pub async fn update_progress(&self, current_time: f64, duration: f64) {
        let progress = transport::progress_percent(current_time, duration);
        {
            let mut inner = self.inner.write().await;
            inner.state.current_time = current_time;
            inner.state.duration = duration;
            inner.state.progress = progress;
        }
        self.emit(PlaybackEvent::ProgressChanged(progress));
    }

    /// Move to a slider position. Returns the target time, or `None` when the
    /// duration is not known yet.
    pub async fn seek_to_percent(&self, percent: f64) -> Option<f64> {
        let target = {
            let mut inner = self.inner.write().await;
            let target = transport::seek_target(percent, inner.state.duration)?;
            inner.state.current_time = target;
            inner.state.progress = transport::progress_percent(target, inner.state.duration);
            target
        };
        self.emit(PlaybackEvent::ProgressChanged(percent.clamp(0.0, 100.0)));
        Some(target)
    }

    pub async fn time_display(&self) -> String {
        let inner = self.inner.read().await;
        transport::time_display(inner.state.current_time, inner.state.duration)
    }

    /// Enter or leave fullscreen. Returns the new fullscreen flag.
    pub async fn toggle_fullscreen(&self) -> Result<bool> {
        let entering = !self.inner.read().await.state.fullscreen;
        if entering {
            self.host.request_fullscreen().await?;
        } else {
            self.host.exit_fullscreen().await?;
        }

        self.inner.write().await.state.fullscreen = entering;
        self.emit(PlaybackEvent::FullscreenChanged(entering));
        Ok(entering)
    }

    /// Save a copy of the uploaded file. `Ok(None)` when there is nothing to download.
    pub async fn download(&self) -> Result<Option<PathBuf>> {
        let file = {
            let inner = self.inner.read().await;
            if !self.can_download(&inner.state) {
                return Ok(None);
            }
            inner.state.file.clone()
        };
        let Some(file) = file else {
            return Ok(None);
        };

        let saved = self.host.save_file(&file, file.download_name()).await?;
        Ok(Some(saved))
    }

    pub async fn render_mode(&self) -> RenderMode {
        let inner = self.inner.read().await;
        let state = &inner.state;
        if state.error {
            return RenderMode::Error;
        }
        if state.kind.is_embedded() {
            return RenderMode::Embed {
                url: classifier::to_embed_url(&state.source),
                kind: state.kind,
            };
        }
        RenderMode::Native {
            src: state.source.clone(),
        }
    }

    /// Transport controls are hidden for YouTube embeds and while in error
    pub async fn controls_visible(&self) -> bool {
        has_controls(&self.inner.read().await.state)
    }

    pub async fn download_available(&self) -> bool {
        let inner = self.inner.read().await;
        self.can_download(&inner.state)
    }

    pub async fn is_default_source(&self) -> bool {
        self.inner.read().await.state.source == self.settings.default_video_src
    }

    /// Stop background work; the context stays readable
    pub fn shutdown(&self) {
        self.throttle.shutdown();
        self.cooldown_forwarder.abort();
    }

    fn can_download(&self, state: &PlaybackState) -> bool {
        state.file.is_some()
            && state.source != self.settings.default_video_src
            && !state.kind.is_embedded()
    }

    fn check_cooldown(&self) -> Result<(), UploadError> {
        match self.throttle.remaining() {
            0 => Ok(()),
            remaining => Err(UploadError::CooldownActive(remaining)),
        }
    }

    /// Swap in a new source. Returns whether an error state was cleared.
    async fn replace_source(
        &self,
        source: String,
        file: Option<MediaFile>,
        object_url: Option<String>,
    ) -> bool {
        let kind = classifier::classify(&source);
        let (cleared_error, previous_url) = {
            let mut inner = self.inner.write().await;
            let previous_url = std::mem::replace(&mut inner.object_url, object_url);
            let state = &mut inner.state;
            let cleared_error = state.error;
            state.source = source.clone();
            state.kind = kind;
            state.file = file;
            state.error = false;
            state.is_playing = false;
            state.clear_position();
            (cleared_error, previous_url)
        };

        if let Some(url) = previous_url {
            self.host.revoke_object_url(&url).await;
        }
        if cleared_error {
            info!("New source replaces one that failed to play");
            self.emit(PlaybackEvent::ErrorChanged(false));
        }
        self.emit(PlaybackEvent::SourceChanged { source, kind });
        cleared_error
    }

    async fn finish_upload(&self, source: String, kind: ProviderKind, cleared_error: bool) -> UploadOutcome {
        let cooldown = self.throttle.start_cooldown(self.settings.cooldown_secs);
        let uploaded = cooldown.last_upload().unwrap_or_else(Utc::now);
        self.inner.write().await.state.last_upload = Some(uploaded);
        self.persist(keys::LAST_UPLOAD_TIME, &uploaded.timestamp_millis().to_string())
            .await;

        UploadOutcome {
            embed_url: classifier::to_embed_url(&source),
            source,
            kind,
            cleared_error,
            cooldown,
        }
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!("Failed to persist {}: {}", key, e);
        }
    }

    async fn forget(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!("Failed to remove {}: {}", key, e);
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Drop for PlaybackContext {
    fn drop(&mut self) {
        self.cooldown_forwarder.abort();
    }
}

fn has_controls(state: &PlaybackState) -> bool {
    !state.error && state.kind != ProviderKind::YouTube
}

/// Restore the picked file of an earlier session. Only `file://` sources
/// still point at something on disk.
fn rehydrate_file(source: &str, name: String) -> MediaFile {
    match file_path_from_url(source) {
        Some(path) => {
            let mime_type = crate::host::mime_type_for(&path);
            MediaFile::new(name, mime_type, Some(path))
        }
        None => MediaFile::named(name),
    }
}

fn spawn_cooldown_forwarder(
    mut handle: CooldownHandle,
    events: broadcast::Sender<PlaybackEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(remaining) = handle.changed().await {
            let _ = events.send(PlaybackEvent::CooldownTick(remaining));
        }
    })
}
