//! Configuration structures
//!
//! Plain data carriers for host configuration. Loading (environment
//! variables, file probing) lives in the infra layer.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DURATION_CHECK_INTERVAL_MS, PLAYER_SETTLE_DELAY_MS, ROLLOVER_CHECK_INTERVAL_MS,
};

/// Top-level host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub assets: AssetConfig,
    #[serde(default)]
    pub cadence: CadenceConfig,
}

/// SQLite-backed state store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file path
    pub path: String,
    /// Connection pool size
    pub pool_size: u32,
}

/// Where bundled assets (the interruption image) are resolved from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory containing packaged assets
    pub dir: String,
}

/// Background cadences, overridable for development builds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadenceConfig {
    /// How often the day-rollover check fires
    #[serde(default = "default_rollover_interval_ms")]
    pub rollover_check_interval_ms: u64,
    /// How often watch pages are polled for a too-long video
    #[serde(default = "default_duration_interval_ms")]
    pub duration_check_interval_ms: u64,
    /// Grace period after navigation before the first duration read
    #[serde(default = "default_settle_delay_ms")]
    pub player_settle_delay_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            rollover_check_interval_ms: ROLLOVER_CHECK_INTERVAL_MS,
            duration_check_interval_ms: DURATION_CHECK_INTERVAL_MS,
            player_settle_delay_ms: PLAYER_SETTLE_DELAY_MS,
        }
    }
}

fn default_rollover_interval_ms() -> u64 {
    ROLLOVER_CHECK_INTERVAL_MS
}

fn default_duration_interval_ms() -> u64 {
    DURATION_CHECK_INTERVAL_MS
}

fn default_settle_delay_ms() -> u64 {
    PLAYER_SETTLE_DELAY_MS
}
