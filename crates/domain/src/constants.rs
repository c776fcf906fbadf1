//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Default limits (seeded into the store on first run)
pub const DEFAULT_SHORTS_LIMIT: u32 = 5;
pub const DEFAULT_MAX_VIDEO_MINUTES: f64 = 20.0;

// Persistent store keys (wire names shared with the settings surfaces)
pub const KEY_SHORTS_LIMIT: &str = "shortsLimit";
pub const KEY_MAX_VIDEO_LENGTH: &str = "maxVideoLength";
pub const KEY_DAILY_SHORTS_COUNT: &str = "dailyShortsCount";
pub const KEY_DAILY_SHORTS_DATE: &str = "dailyShortsDate";

// Page address markers
pub const SHORTS_PATH_MARKER: &str = "youtube.com/shorts";
pub const WATCH_QUERY_MARKER: &str = "watch?v=";

// Background cadences
pub const ROLLOVER_CHECK_INTERVAL_MS: u64 = 60_000;
pub const DURATION_CHECK_INTERVAL_MS: u64 = 3_000;
pub const PLAYER_SETTLE_DELAY_MS: u64 = 2_000; // player metadata lags navigation
pub const SAVE_STATUS_CLEAR_MS: u64 = 2_000;

// Interruption overlay
pub const OVERLAY_ELEMENT_ID: &str = "reelbreak-overlay";
pub const INTERRUPT_IMAGE_RESOURCE: &str = "meme.png";
