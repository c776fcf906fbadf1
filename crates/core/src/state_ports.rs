//! Port interface for the persistent state store
//!
//! The store is a flat key-value record shared with the settings surfaces.
//! Adapters must keep the wire keys stable: `shortsLimit`, `maxVideoLength`,
//! `dailyShortsCount`, `dailyShortsDate`.

use async_trait::async_trait;
use reelbreak_domain::{DailyTally, DayKey, LimitSettings, ReelbreakError};
use thiserror::Error;

/// Why a store operation failed.
///
/// `Unavailable` is the explicit "backing store is gone" signal (host shut
/// down, observed page torn away). Callers are expected to skip the current
/// cycle or fall back to defaults rather than treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("state store unavailable")]
    Unavailable,

    #[error("state store backend: {0}")]
    Backend(String),
}

impl From<StoreError> for ReelbreakError {
    fn from(err: StoreError) -> Self {
        ReelbreakError::Store(err.to_string())
    }
}

/// Trait for reading and writing the persisted limiter state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the configured limits.
    ///
    /// Missing or unreadable keys fall back to their defaults field by
    /// field, so this never fails on partial records.
    async fn limit_settings(&self) -> Result<LimitSettings, StoreError>;

    /// Persist the configured limits.
    async fn save_limit_settings(&self, settings: &LimitSettings) -> Result<(), StoreError>;

    /// Load the daily tally.
    ///
    /// Each field falls back independently: a missing count reads as zero,
    /// a missing day reads as `default_day` with the stored count kept.
    /// Staleness against the current day is the caller's decision.
    async fn daily_tally(&self, default_day: &DayKey) -> Result<DailyTally, StoreError>;

    /// Persist the daily tally.
    async fn save_daily_tally(&self, tally: &DailyTally) -> Result<(), StoreError>;

    /// First-run hook: write default limits for any key not yet present.
    /// Existing values are never overwritten.
    async fn seed_defaults(&self) -> Result<(), StoreError>;
}
