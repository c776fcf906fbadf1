//! Daily tally service - rollover-aware load and persist

use std::sync::Arc;

use reelbreak_domain::{DailyTally, DayKey};
use tracing::info;

use crate::state_ports::{StateStore, StoreError};

/// Rollover-aware access to the persisted daily tally.
pub struct TallyService {
    store: Arc<dyn StateStore>,
}

impl TallyService {
    /// Create a new tally service
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Load the tally for `today`, resetting a stale one first.
    ///
    /// A tally recorded under a different day key is replaced by a fresh
    /// zero tally for `today`, persisted, and returned.
    ///
    /// # Errors
    /// Propagates store failures; the caller decides whether to skip the
    /// current cycle or fall back.
    pub async fn load(&self, today: &DayKey) -> Result<DailyTally, StoreError> {
        let tally = self.store.daily_tally(today).await?;
        if tally.is_stale(today) {
            let fresh = DailyTally::fresh(today.clone());
            self.store.save_daily_tally(&fresh).await?;
            info!(from = %tally.day_key, to = %today, "daily tally rolled over");
            return Ok(fresh);
        }
        Ok(tally)
    }

    /// Persist the tally as-is.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn persist(&self, tally: &DailyTally) -> Result<(), StoreError> {
        self.store.save_daily_tally(tally).await
    }
}
