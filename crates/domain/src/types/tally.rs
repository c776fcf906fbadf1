//! Daily tally and limit settings
//!
//! The tally is the persisted "how many shorts today" counter together with
//! the day it belongs to. Limits are the user-adjustable knobs that decide
//! when an interruption fires.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_VIDEO_MINUTES, DEFAULT_SHORTS_LIMIT};
use crate::errors::{ReelbreakError, Result};

/// Calendar day in the fixed sortable `YYYY-MM-DD` form (UTC).
///
/// Rollover detection is plain equality against today's key, with no
/// timezone reconciliation. A malformed stored key simply never matches and
/// forces a reset on the next check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    /// Day key for the current instant.
    pub fn today() -> Self {
        Self::for_instant(Utc::now())
    }

    /// Day key for an arbitrary instant.
    pub fn for_instant(instant: DateTime<Utc>) -> Self {
        DayKey(instant.date_naive().format("%Y-%m-%d").to_string())
    }

    /// Wrap a raw stored key without validation.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        DayKey(raw.into())
    }

    /// The raw `YYYY-MM-DD` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted daily view counter.
///
/// The count is only meaningful while `day_key` matches the current day; a
/// stale key means the tally is replaced by a fresh one on the next load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTally {
    pub count: u32,
    pub day_key: DayKey,
}

impl DailyTally {
    /// Zeroed tally for the given day.
    pub fn fresh(day_key: DayKey) -> Self {
        Self { count: 0, day_key }
    }

    /// True when this tally belongs to a different day than `today`.
    pub fn is_stale(&self, today: &DayKey) -> bool {
        self.day_key != *today
    }
}

/// User-adjustable limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Consecutive shorts allowed before an interruption fires.
    pub shorts_limit: u32,
    /// Maximum single-video length in minutes.
    pub max_video_minutes: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            shorts_limit: DEFAULT_SHORTS_LIMIT,
            max_video_minutes: DEFAULT_MAX_VIDEO_MINUTES,
        }
    }
}

impl LimitSettings {
    /// Build settings from raw form input, rejecting junk before it can
    /// reach the store.
    ///
    /// Both values must be finite and at least 1. Fractional shorts limits
    /// are truncated to whole shorts.
    ///
    /// # Errors
    /// Returns `ReelbreakError::InvalidInput` naming the offending field.
    pub fn from_input(shorts_limit: f64, max_video_minutes: f64) -> Result<Self> {
        if !shorts_limit.is_finite() || shorts_limit < 1.0 {
            return Err(ReelbreakError::InvalidInput(
                "shorts limit must be a number of at least 1".to_string(),
            ));
        }
        if !max_video_minutes.is_finite() || max_video_minutes < 1.0 {
            return Err(ReelbreakError::InvalidInput(
                "max video length must be a number of at least 1".to_string(),
            ));
        }
        Ok(Self { shorts_limit: shorts_limit as u32, max_video_minutes })
    }

    /// True when `count` has reached the shorts limit.
    pub fn shorts_limit_reached(&self, count: u32) -> bool {
        count >= self.shorts_limit
    }

    /// True when a video of `minutes` length exceeds the configured maximum.
    pub fn video_too_long(&self, minutes: f64) -> bool {
        minutes > self.max_video_minutes
    }
}
