//! Duration guard service - flags single videos over the configured maximum

use std::sync::Arc;

use reelbreak_domain::parse_duration_text;
use tracing::info;

use crate::page_ports::PageView;
use crate::state_ports::{StateStore, StoreError};

/// Result of one duration check cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Not on a watch page (or no page loaded yet).
    NotWatchPage,
    /// No readable duration: player missing, live badge, malformed text, or
    /// a zero-length display.
    NoDuration,
    /// Guard disabled by a non-positive configured maximum.
    Disabled,
    /// Within the configured maximum.
    WithinLimit { minutes: f64 },
    /// Too long; an interruption should be presented.
    TooLong { minutes: f64, max_minutes: f64 },
}

/// Periodically checks whether the current video exceeds the configured
/// maximum length.
pub struct DurationGuard {
    store: Arc<dyn StateStore>,
    page: Arc<dyn PageView>,
}

impl DurationGuard {
    /// Create a new duration guard
    pub fn new(store: Arc<dyn StateStore>, page: Arc<dyn PageView>) -> Self {
        Self { store, page }
    }

    /// Quick pre-check used by the scheduler before it pays the settle
    /// delay.
    pub fn on_watch_page(&self) -> bool {
        self.page.location().is_some_and(|location| location.is_watch_page())
    }

    /// Read the displayed video length and decide whether it breaks the
    /// configured maximum.
    ///
    /// # Errors
    /// Propagates store failures reading the limits; the caller decides
    /// whether to skip the cycle.
    pub async fn check(&self) -> Result<GuardOutcome, StoreError> {
        let Some(location) = self.page.location() else {
            return Ok(GuardOutcome::NotWatchPage);
        };
        if !location.is_watch_page() {
            return Ok(GuardOutcome::NotWatchPage);
        }

        let minutes = self.page.duration_text().as_deref().and_then(parse_duration_text);
        let Some(minutes) = minutes.filter(|minutes| *minutes > 0.0) else {
            return Ok(GuardOutcome::NoDuration);
        };

        let limits = self.store.limit_settings().await?;
        if limits.max_video_minutes <= 0.0 {
            return Ok(GuardOutcome::Disabled);
        }

        if limits.video_too_long(minutes) {
            info!(minutes, max_minutes = limits.max_video_minutes, "video exceeds maximum length");
            return Ok(GuardOutcome::TooLong { minutes, max_minutes: limits.max_video_minutes });
        }

        Ok(GuardOutcome::WithinLimit { minutes })
    }
}
