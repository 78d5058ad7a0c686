//! Settings change notification
//!
//! Polls a [`ConfigStore`] on a background thread and delivers whole
//! replacement configs over a channel whenever the stored settings change
//! (another process, the dashboard, or `reefwatch config set`).

use super::{ConfigStore, ThresholdConfig};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default and maximum poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Background settings poller
///
/// The thread stops when the watcher is dropped.
pub struct SettingsWatcher {
    updates: Receiver<ThresholdConfig>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SettingsWatcher {
    /// Start watching `store`, reporting changes relative to `current`
    ///
    /// Intervals longer than [`DEFAULT_POLL_INTERVAL`] are clamped to it.
    pub fn spawn(
        store: Arc<dyn ConfigStore>,
        current: ThresholdConfig,
        interval: Duration,
    ) -> Self {
        let interval = interval.min(DEFAULT_POLL_INTERVAL);
        let (update_tx, update_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut last = current;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }

                let loaded = store.load();
                if loaded != last {
                    log::info!("Settings changed in {} store", store.name());
                    last = loaded.clone();
                    if update_tx.send(loaded).is_err() {
                        break;
                    }
                }
            }
            log::debug!("Settings watcher stopped");
        });

        Self {
            updates: update_rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Most recent pending update, if any, discarding older ones
    pub fn latest(&self) -> Option<ThresholdConfig> {
        self.updates.try_iter().last()
    }

    /// Wait up to `timeout` for the next update
    pub fn wait(&self, timeout: Duration) -> Option<ThresholdConfig> {
        self.updates.recv_timeout(timeout).ok()
    }
}

impl Drop for SettingsWatcher {
    fn drop(&mut self) {
        // Disconnecting the stop channel wakes the poller immediately
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryConfigStore;
    use serde_json::json;

    #[test]
    fn test_no_update_without_change() {
        let store = Arc::new(MemoryConfigStore::new());
        let watcher = SettingsWatcher::spawn(
            store,
            ThresholdConfig::default(),
            Duration::from_millis(20),
        );

        assert!(watcher.wait(Duration::from_millis(150)).is_none());
    }

    #[test]
    fn test_update_delivered_within_a_second() {
        let store = Arc::new(MemoryConfigStore::new());
        let watcher = SettingsWatcher::spawn(
            store.clone(),
            ThresholdConfig::default(),
            Duration::from_millis(50),
        );

        store.set_raw(json!({ "tempMin": 22.0 }));

        let update = watcher
            .wait(Duration::from_secs(1))
            .expect("update within a second");
        assert_eq!(update.temp_min, 22.0);
        assert_eq!(update.temp_max, 27.0);
    }

    #[test]
    fn test_latest_returns_newest() {
        let store = Arc::new(MemoryConfigStore::new());
        let watcher = SettingsWatcher::spawn(
            store.clone(),
            ThresholdConfig::default(),
            Duration::from_millis(10),
        );

        store.set_raw(json!({ "phMin": 7.7 }));
        assert!(watcher.wait(Duration::from_secs(1)).is_some());
        store.set_raw(json!({ "phMin": 7.6 }));
        thread::sleep(Duration::from_millis(200));

        let latest = watcher.latest().expect("pending update");
        assert_eq!(latest.ph_min, 7.6);
        assert!(watcher.latest().is_none());
    }

    #[test]
    fn test_interval_clamped() {
        let store = Arc::new(MemoryConfigStore::new());
        let watcher = SettingsWatcher::spawn(
            store.clone(),
            ThresholdConfig::default(),
            Duration::from_secs(60),
        );

        store.set_raw(json!({ "soundEnabled": true }));
        let update = watcher.wait(Duration::from_millis(1500));
        assert!(update.map(|c| c.sound_enabled).unwrap_or(false));
    }
}
