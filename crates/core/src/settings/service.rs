//! Limit settings service - load with defaults, save with validation

use std::sync::Arc;

use reelbreak_domain::{LimitSettings, Result};
use tracing::{debug, info};

use crate::state_ports::{StateStore, StoreError};

/// Read and write the user-adjustable limits.
pub struct SettingsService {
    store: Arc<dyn StateStore>,
}

impl SettingsService {
    /// Create a new settings service
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Current limits for a settings surface.
    ///
    /// An unavailable store falls back to the defaults so a form always has
    /// something sensible to show.
    ///
    /// # Errors
    /// Backend failures propagate as `ReelbreakError::Store`.
    pub async fn limits(&self) -> Result<LimitSettings> {
        match self.store.limit_settings().await {
            Ok(limits) => Ok(limits),
            Err(StoreError::Unavailable) => {
                debug!("store unavailable, serving default limits");
                Ok(LimitSettings::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Validate and persist limits from raw form input.
    ///
    /// # Errors
    /// `ReelbreakError::InvalidInput` when a value is non-finite or below 1;
    /// the stored limits are left untouched in that case. Store failures
    /// propagate as `ReelbreakError::Store`.
    pub async fn save(&self, shorts_limit: f64, max_video_minutes: f64) -> Result<LimitSettings> {
        let settings = LimitSettings::from_input(shorts_limit, max_video_minutes)?;
        self.store.save_limit_settings(&settings).await?;
        info!(
            shorts_limit = settings.shorts_limit,
            max_video_minutes = settings.max_video_minutes,
            "limits saved"
        );
        Ok(settings)
    }

    /// Seed default limits on first run without overwriting existing values.
    ///
    /// # Errors
    /// Store failures propagate as `ReelbreakError::Store`.
    pub async fn seed_defaults(&self) -> Result<()> {
        self.store.seed_defaults().await.map_err(Into::into)
    }
}
