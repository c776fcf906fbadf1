//! SQLite-backed state repository.
//!
//! Implements the `StateStore` port over the flat `app_state` key-value
//! table. All database operations run in `spawn_blocking` to avoid blocking
//! the async runtime.
//!
//! Reads are lenient: a missing key falls back to its default, an
//! unparsable value is treated like a missing one. Connection acquisition
//! failures surface as `StoreError::Unavailable` (the store may be shutting
//! down); statement failures surface as `StoreError::Backend`.

use std::sync::Arc;

use async_trait::async_trait;
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use reelbreak_core::{StateStore, StoreError};
use reelbreak_domain::constants::{
    DEFAULT_MAX_VIDEO_MINUTES, DEFAULT_SHORTS_LIMIT, KEY_DAILY_SHORTS_COUNT, KEY_DAILY_SHORTS_DATE,
    KEY_MAX_VIDEO_LENGTH, KEY_SHORTS_LIMIT,
};
use reelbreak_domain::{DailyTally, DayKey, LimitSettings};
use rusqlite::params;
use tokio::task;
use tracing::warn;

use super::manager::DbManager;

type DbConnection = PooledConnection<SqliteConnectionManager>;

/// SQLite-backed state repository.
///
/// Provides durable storage for the limiter state with upsert semantics.
/// All operations use `spawn_blocking` to avoid blocking the async runtime.
pub struct SqliteStateRepository {
    db: Arc<DbManager>,
}

impl SqliteStateRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Load the configured limits, falling back to defaults per key.
    pub async fn limit_settings(&self) -> Result<LimitSettings, StoreError> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<LimitSettings, StoreError> {
            let conn = get_connection(&db)?;
            let shorts_limit = query_value(&conn, KEY_SHORTS_LIMIT)?
                .and_then(|raw| parse_or_warn::<u32>(KEY_SHORTS_LIMIT, &raw))
                .unwrap_or(DEFAULT_SHORTS_LIMIT);
            let max_video_minutes = query_value(&conn, KEY_MAX_VIDEO_LENGTH)?
                .and_then(|raw| parse_or_warn::<f64>(KEY_MAX_VIDEO_LENGTH, &raw))
                .unwrap_or(DEFAULT_MAX_VIDEO_MINUTES);
            Ok(LimitSettings { shorts_limit, max_video_minutes })
        })
        .await
        .map_err(map_join_error)?
    }

    /// Persist the configured limits (upsert).
    pub async fn save_limit_settings(&self, settings: &LimitSettings) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let settings = settings.clone();

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = get_connection(&db)?;
            upsert_value(&conn, KEY_SHORTS_LIMIT, &settings.shorts_limit.to_string())?;
            upsert_value(&conn, KEY_MAX_VIDEO_LENGTH, &settings.max_video_minutes.to_string())?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    /// Load the daily tally; missing keys read as a zero count on
    /// `default_day`.
    pub async fn daily_tally(&self, default_day: &DayKey) -> Result<DailyTally, StoreError> {
        let db = Arc::clone(&self.db);
        let default_day = default_day.clone();

        task::spawn_blocking(move || -> Result<DailyTally, StoreError> {
            let conn = get_connection(&db)?;
            let count = query_value(&conn, KEY_DAILY_SHORTS_COUNT)?
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(0);
            let day_key = query_value(&conn, KEY_DAILY_SHORTS_DATE)?
                .map_or(default_day, DayKey::from_raw);
            Ok(DailyTally { count, day_key })
        })
        .await
        .map_err(map_join_error)?
    }

    /// Persist the daily tally (upsert of both keys).
    pub async fn save_daily_tally(&self, tally: &DailyTally) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);
        let tally = tally.clone();

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = get_connection(&db)?;
            upsert_value(&conn, KEY_DAILY_SHORTS_COUNT, &tally.count.to_string())?;
            upsert_value(&conn, KEY_DAILY_SHORTS_DATE, tally.day_key.as_str())?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    /// Seed default limits without overwriting existing values.
    pub async fn seed_defaults(&self) -> Result<(), StoreError> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = get_connection(&db)?;
            insert_if_absent(&conn, KEY_SHORTS_LIMIT, &DEFAULT_SHORTS_LIMIT.to_string())?;
            insert_if_absent(&conn, KEY_MAX_VIDEO_LENGTH, &DEFAULT_MAX_VIDEO_MINUTES.to_string())?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl StateStore for SqliteStateRepository {
    async fn limit_settings(&self) -> Result<LimitSettings, StoreError> {
        Self::limit_settings(self).await
    }

    async fn save_limit_settings(&self, settings: &LimitSettings) -> Result<(), StoreError> {
        Self::save_limit_settings(self, settings).await
    }

    async fn daily_tally(&self, default_day: &DayKey) -> Result<DailyTally, StoreError> {
        Self::daily_tally(self, default_day).await
    }

    async fn save_daily_tally(&self, tally: &DailyTally) -> Result<(), StoreError> {
        Self::save_daily_tally(self, tally).await
    }

    async fn seed_defaults(&self) -> Result<(), StoreError> {
        Self::seed_defaults(self).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn get_connection(db: &DbManager) -> Result<DbConnection, StoreError> {
    db.get_connection().map_err(|e| {
        warn!(error = %e, "state store connection unavailable");
        StoreError::Unavailable
    })
}

/// Read one key's raw value.
fn query_value(conn: &DbConnection, key: &str) -> Result<Option<String>, StoreError> {
    match conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    ) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StoreError::Backend(e.to_string())),
    }
}

/// Write one key's value (upsert).
fn upsert_value(conn: &DbConnection, key: &str, value: &str) -> Result<(), StoreError> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT INTO app_state (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        params![key, value, now],
    )
    .map_err(|e| StoreError::Backend(e.to_string()))?;
    Ok(())
}

/// Write one key's value only when the key does not exist yet.
fn insert_if_absent(conn: &DbConnection, key: &str, value: &str) -> Result<(), StoreError> {
    let now = chrono::Utc::now().timestamp();
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
        params![key, value, now],
    )
    .map_err(|e| StoreError::Backend(e.to_string()))?;
    Ok(())
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse::<T>().ok();
    if parsed.is_none() {
        warn!(key, raw, "unparsable stored value, using default");
    }
    parsed
}

/// Map JoinError from spawn_blocking to StoreError.
fn map_join_error(err: task::JoinError) -> StoreError {
    StoreError::Backend(format!("blocking task failed: {err}"))
}

// ============================================================================
// Tests
// ============================================================================
