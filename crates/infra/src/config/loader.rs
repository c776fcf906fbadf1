//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `REELBREAK_DB_PATH`: State database file path
//! - `REELBREAK_DB_POOL_SIZE`: Connection pool size
//! - `REELBREAK_ASSET_DIR`: Directory holding packaged assets
//! - `REELBREAK_ROLLOVER_INTERVAL_MS`: Day-rollover check cadence (optional)
//! - `REELBREAK_DURATION_INTERVAL_MS`: Duration guard cadence (optional)
//! - `REELBREAK_SETTLE_DELAY_MS`: Player settle delay (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./reelbreak.json` or `./reelbreak.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use reelbreak_domain::{
    AssetConfig, CadenceConfig, Config, DatabaseConfig, ReelbreakError, Result,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ReelbreakError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present; the cadence
/// overrides default to their built-in values when unset.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `ReelbreakError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("REELBREAK_DB_PATH")?;
    let db_pool_size = env_var("REELBREAK_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| ReelbreakError::Config(format!("Invalid pool size: {}", e)))
    })?;
    let asset_dir = env_var("REELBREAK_ASSET_DIR")?;

    let defaults = CadenceConfig::default();
    let cadence = CadenceConfig {
        rollover_check_interval_ms: env_ms(
            "REELBREAK_ROLLOVER_INTERVAL_MS",
            defaults.rollover_check_interval_ms,
        )?,
        duration_check_interval_ms: env_ms(
            "REELBREAK_DURATION_INTERVAL_MS",
            defaults.duration_check_interval_ms,
        )?,
        player_settle_delay_ms: env_ms(
            "REELBREAK_SETTLE_DELAY_MS",
            defaults.player_settle_delay_ms,
        )?,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        assets: AssetConfig { dir: asset_dir },
        cadence,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ReelbreakError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReelbreakError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReelbreakError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReelbreakError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Arguments
/// * `contents` - File contents as string
/// * `path` - Path to the file (for format detection and error messages)
///
/// # Errors
/// Returns `ReelbreakError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReelbreakError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReelbreakError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ReelbreakError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./reelbreak.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("reelbreak.json"),
            cwd.join("reelbreak.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("reelbreak.json"),
                exe_dir.join("reelbreak.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `ReelbreakError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ReelbreakError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse a millisecond cadence from an environment variable
///
/// # Arguments
/// * `key` - Environment variable name
/// * `default` - Value used when the variable is not set
///
/// # Errors
/// Returns `ReelbreakError::Config` when the variable is set but does not
/// parse as a number.
fn env_ms(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ReelbreakError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
