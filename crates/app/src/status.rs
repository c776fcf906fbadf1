//! Transient save confirmation shared by the settings surfaces.
//!
//! The settings form shows a short "saved" line after a successful write
//! and clears it again a moment later. The status lives here, behind the
//! context, so any surface reading it sees the same line.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reelbreak_domain::constants::SAVE_STATUS_CLEAR_MS;

/// A status line that clears itself a fixed delay after each announcement.
pub struct SaveStatus {
    clear_after: Duration,
    inner: Mutex<StatusState>,
}

#[derive(Default)]
struct StatusState {
    message: Option<String>,
    // Bumped on every announcement so a pending clear from an earlier save
    // cannot wipe a newer message.
    epoch: u64,
}

impl SaveStatus {
    /// Status line with the standard clear delay.
    pub fn new() -> Arc<Self> {
        Self::with_clear_after(Duration::from_millis(SAVE_STATUS_CLEAR_MS))
    }

    /// Status line with a custom clear delay.
    pub fn with_clear_after(clear_after: Duration) -> Arc<Self> {
        Arc::new(Self { clear_after, inner: Mutex::new(StatusState::default()) })
    }

    /// The confirmation currently showing, if it has not cleared yet.
    pub fn message(&self) -> Option<String> {
        self.inner.lock().message.clone()
    }

    /// Show a confirmation and schedule its clearance.
    pub fn announce(self: &Arc<Self>, message: impl Into<String>) {
        let epoch = {
            let mut state = self.inner.lock();
            state.epoch += 1;
            state.message = Some(message.into());
            state.epoch
        };

        let status = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(status.clear_after).await;
            let mut state = status.inner.lock();
            if state.epoch == epoch {
                state.message = None;
            }
        });
    }
}
