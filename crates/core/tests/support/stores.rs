//! Mock state store for testing
//!
//! In-memory implementation of the `StateStore` port with per-key absence
//! semantics and pluggable failure injection, enabling deterministic tests
//! without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reelbreak_core::{StateStore, StoreError};
use reelbreak_domain::{DailyTally, DayKey, LimitSettings};

#[derive(Default)]
struct StoreState {
    limits: Option<LimitSettings>,
    daily_count: Option<u32>,
    daily_day: Option<DayKey>,
    fail: Option<StoreError>,
}

/// In-memory mock for `StateStore`.
///
/// Keeps the tally's count and day as separate optional keys, mirroring the
/// flat record real adapters sit on, so partial-record cases are testable.
#[derive(Default, Clone)]
pub struct MockStateStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockStateStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored limits.
    pub fn with_limits(self, limits: LimitSettings) -> Self {
        self.state.lock().expect("store mock lock").limits = Some(limits);
        self
    }

    /// Seed the stored tally (both keys).
    pub fn with_tally(self, count: u32, day: DayKey) -> Self {
        {
            let mut state = self.state.lock().expect("store mock lock");
            state.daily_count = Some(count);
            state.daily_day = Some(day);
        }
        self
    }

    /// Seed only the stored count, leaving the day key absent.
    pub fn with_count_only(self, count: u32) -> Self {
        self.state.lock().expect("store mock lock").daily_count = Some(count);
        self
    }

    /// Make every subsequent operation fail with `err` (or succeed again
    /// with `None`).
    pub fn set_fail(&self, err: Option<StoreError>) {
        self.state.lock().expect("store mock lock").fail = err;
    }

    /// Stored limits, if any.
    pub fn stored_limits(&self) -> Option<LimitSettings> {
        self.state.lock().expect("store mock lock").limits.clone()
    }

    /// Stored tally keys as `(count, day)`.
    pub fn stored_tally(&self) -> (Option<u32>, Option<DayKey>) {
        let state = self.state.lock().expect("store mock lock");
        (state.daily_count, state.daily_day.clone())
    }

    fn check_fail(&self) -> Result<(), StoreError> {
        match &self.state.lock().expect("store mock lock").fail {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StateStore for MockStateStore {
    async fn limit_settings(&self) -> Result<LimitSettings, StoreError> {
        self.check_fail()?;
        let state = self.state.lock().expect("store mock lock");
        Ok(state.limits.clone().unwrap_or_default())
    }

    async fn save_limit_settings(&self, settings: &LimitSettings) -> Result<(), StoreError> {
        self.check_fail()?;
        self.state.lock().expect("store mock lock").limits = Some(settings.clone());
        Ok(())
    }

    async fn daily_tally(&self, default_day: &DayKey) -> Result<DailyTally, StoreError> {
        self.check_fail()?;
        let state = self.state.lock().expect("store mock lock");
        Ok(DailyTally {
            count: state.daily_count.unwrap_or(0),
            day_key: state.daily_day.clone().unwrap_or_else(|| default_day.clone()),
        })
    }

    async fn save_daily_tally(&self, tally: &DailyTally) -> Result<(), StoreError> {
        self.check_fail()?;
        let mut state = self.state.lock().expect("store mock lock");
        state.daily_count = Some(tally.count);
        state.daily_day = Some(tally.day_key.clone());
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<(), StoreError> {
        self.check_fail()?;
        let mut state = self.state.lock().expect("store mock lock");
        if state.limits.is_none() {
            state.limits = Some(LimitSettings::default());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_defaults_missing_keys() {
        let store = MockStateStore::new().with_count_only(3);
        let today = DayKey::from_raw("2024-03-07");

        let tally = store.daily_tally(&today).await.expect("tally");
        assert_eq!(tally.count, 3);
        assert_eq!(tally.day_key, today);
    }

    #[tokio::test]
    async fn test_mock_store_failure_injection() {
        let store = MockStateStore::new();
        store.set_fail(Some(StoreError::Unavailable));
        assert_eq!(store.limit_settings().await, Err(StoreError::Unavailable));

        store.set_fail(None);
        assert!(store.limit_settings().await.is_ok());
    }
}
