//! Scheduled upload throttle driven by a tokio interval

use crate::throttle::cooldown::Cooldown;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Countdown plus the generation of the ticker allowed to advance it
#[derive(Debug, Clone, Default)]
struct ThrottleState {
    cooldown: Cooldown,
    generation: u64,
}

/// Upload throttle with at most one active countdown task
///
/// Must be used from inside a tokio runtime: starting a cooldown spawns the
/// ticker task. Dropping the throttle aborts the ticker.
pub struct UploadThrottle {
    state: Arc<watch::Sender<ThrottleState>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    period: Duration,
}

/// Read side of the throttle, handed to whoever needs to observe the countdown
#[derive(Debug, Clone)]
pub struct CooldownHandle {
    rx: watch::Receiver<ThrottleState>,
}

impl Default for UploadThrottle {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl UploadThrottle {
    /// Create an idle throttle ticking every `period`
    pub fn new(period: Duration) -> Self {
        let (tx, _rx) = watch::channel(ThrottleState::default());
        Self {
            state: Arc::new(tx),
            ticker: Mutex::new(None),
            period,
        }
    }

    /// Start (or restart) the countdown from `duration_secs`
    ///
    /// Any running ticker is cancelled first so only one decrement per
    /// period is ever observed.
    pub fn start_cooldown(&self, duration_secs: u32) -> CooldownHandle {
        info!("Upload cooldown started: {}s", duration_secs);
        self.begin(Cooldown::start(duration_secs))
    }

    /// Continue a countdown from an earlier session with `remaining_secs` left
    pub fn resume_cooldown(&self, remaining_secs: u32, last_upload: DateTime<Utc>) -> CooldownHandle {
        info!("Upload cooldown resumed: {}s left", remaining_secs);
        self.begin(Cooldown::start_at(remaining_secs, last_upload))
    }

    fn begin(&self, cooldown: Cooldown) -> CooldownHandle {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = ticker.take() {
            previous.abort();
            debug!("Cancelled previous cooldown ticker");
        }

        let blocked = cooldown.is_blocked();
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.cooldown = cooldown;
            generation = state.generation;
        });

        if blocked {
            *ticker = Some(spawn_ticker(Arc::clone(&self.state), generation, self.period));
        }

        self.subscribe()
    }

    /// Stop the ticker without touching the remaining count.
    pub fn shutdown(&self) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = ticker.take() {
            handle.abort();
            debug!("Upload throttle ticker stopped");
        }
    }

    pub fn subscribe(&self) -> CooldownHandle {
        CooldownHandle {
            rx: self.state.subscribe(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.state.borrow().cooldown.remaining()
    }

    pub fn is_blocked(&self) -> bool {
        self.state.borrow().cooldown.is_blocked()
    }

    pub fn last_upload(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().cooldown.last_upload()
    }

    pub fn snapshot(&self) -> Cooldown {
        self.state.borrow().cooldown.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for UploadThrottle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_ticker(
    state: Arc<watch::Sender<ThrottleState>>,
    generation: u64,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let mut finished = false;
            state.send_if_modified(|current| {
                if current.generation != generation {
                    finished = true;
                    return false;
                }
                let before = current.cooldown.remaining();
                let after = current.cooldown.tick();
                finished = after == 0;
                before != after
            });

            if finished {
                debug!("Cooldown ticker {} finished", generation);
                break;
            }
        }
    })
}

impl CooldownHandle {
    pub fn remaining(&self) -> u32 {
        self.rx.borrow().cooldown.remaining()
    }

    pub fn is_blocked(&self) -> bool {
        self.rx.borrow().cooldown.is_blocked()
    }

    pub fn last_upload(&self) -> Option<DateTime<Utc>> {
        self.rx.borrow().cooldown.last_upload()
    }

    /// Wait for the next change and return the new remaining seconds.
    ///
    /// Returns `None` once the throttle has been dropped.
    pub async fn changed(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().cooldown.remaining())
    }

    /// Resolve once uploads are permitted again
    pub async fn wait_until_idle(&mut self) {
        // Err means the throttle is gone, which also leaves nothing to wait for
        let _ = self.rx.wait_for(|state| !state.cooldown.is_blocked()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_once_per_period() {
        let throttle = UploadThrottle::default();
        let handle = throttle.start_cooldown(10);
        assert_eq!(handle.remaining(), 10);
        assert!(handle.is_blocked());

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(throttle.remaining(), 7);
        assert!(throttle.is_blocked());

        time::sleep(Duration::from_secs(7)).await;
        assert_eq!(throttle.remaining(), 0);
        assert!(!handle.is_blocked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_does_not_double_decrement() {
        let throttle = UploadThrottle::default();
        throttle.start_cooldown(10);
        time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(throttle.remaining(), 8);

        throttle.start_cooldown(10);
        assert_eq!(throttle.remaining(), 10);

        time::sleep(Duration::from_millis(3_700)).await;
        assert_eq!(throttle.remaining(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_observes_every_tick() {
        let throttle = UploadThrottle::default();
        let mut handle = throttle.start_cooldown(3);

        let mut seen = Vec::new();
        while let Some(remaining) = handle.changed().await {
            seen.push(remaining);
            if remaining == 0 {
                break;
            }
        }
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_idle() {
        let throttle = UploadThrottle::default();
        let mut handle = throttle.start_cooldown(5);
        let started = Instant::now();
        handle.wait_until_idle().await;
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(!throttle.is_blocked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_freezes_countdown() {
        let throttle = UploadThrottle::default();
        throttle.start_cooldown(10);
        time::sleep(Duration::from_millis(1_500)).await;
        throttle.shutdown();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(throttle.remaining(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_keeps_original_upload_time() {
        let throttle = UploadThrottle::default();
        let uploaded = Utc::now() - chrono::Duration::seconds(6);
        let handle = throttle.resume_cooldown(4, uploaded);
        assert_eq!(handle.last_upload(), Some(uploaded));

        time::sleep(Duration::from_millis(4_500)).await;
        assert!(!throttle.is_blocked());
    }

    #[tokio::test]
    async fn test_zero_duration_is_idle() {
        let throttle = UploadThrottle::default();
        let handle = throttle.start_cooldown(0);
        assert!(!handle.is_blocked());
        assert!(handle.last_upload().is_some());
    }
}
