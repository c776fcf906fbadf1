//! Short view tracking service - core counting and threshold logic

use std::sync::Arc;

use reelbreak_domain::{DailyTally, DayKey, InterruptKind, LimitSettings, ViewIdentity};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::session::SessionState;
use crate::page_ports::PageView;
use crate::state_ports::{StateStore, StoreError};
use crate::tally::TallyService;

/// Result of feeding one page mutation burst through the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Not a shorts page, no player yet, or the same short still on screen.
    Ignored,
    /// A new short was counted; `count` is the value the threshold decision
    /// was made on, before any post-interrupt reset.
    Counted { count: u32, interrupt: Option<InterruptKind> },
}

/// Counts consecutive shorts and decides when to interrupt.
///
/// The session lock is held across the whole increment-check-reset sequence,
/// so concurrent mutation bursts cannot interleave their decisions.
pub struct ViewTracker {
    store: Arc<dyn StateStore>,
    page: Arc<dyn PageView>,
    tally: TallyService,
    session: Mutex<SessionState>,
}

impl ViewTracker {
    /// Create a new tracker with a fresh session for `today`.
    pub fn new(store: Arc<dyn StateStore>, page: Arc<dyn PageView>, today: DayKey) -> Self {
        let tally = TallyService::new(store.clone());
        Self { store, page, tally, session: Mutex::new(SessionState::new(today)) }
    }

    /// Adopt the persisted tally into the session, rolling a stale one over.
    ///
    /// # Errors
    /// Propagates store failures; the session keeps its fresh zero tally in
    /// that case, so counting can proceed regardless.
    pub async fn bootstrap(&self, today: &DayKey) -> Result<(), StoreError> {
        let tally = self.tally.load(today).await?;
        let mut session = self.session.lock().await;
        debug!(count = tally.count, day = %tally.day_key, "session adopted persisted tally");
        session.tally = tally;
        Ok(())
    }

    /// Handle one mutation burst from the observed page.
    ///
    /// Counts the on-screen short if it is new, persists the tally, and
    /// checks the configured limit. When the limit is hit, the count resets
    /// to zero before this returns, so dismissing the overlay starts a new
    /// streak.
    ///
    /// # Errors
    /// Backend failures reading the limit propagate. An unavailable store
    /// falls back to the default limits, so the threshold decision still
    /// runs on the in-memory count.
    pub async fn on_mutation(&self) -> Result<MutationOutcome, StoreError> {
        let Some(location) = self.page.location() else {
            return Ok(MutationOutcome::Ignored);
        };
        if !location.is_shorts_page() || !self.page.player_present() {
            return Ok(MutationOutcome::Ignored);
        }

        let identity = ViewIdentity::from_location(&location);
        let mut session = self.session.lock().await;
        if session.last_view.as_ref() == Some(&identity) {
            return Ok(MutationOutcome::Ignored);
        }

        session.last_view = Some(identity);
        session.tally.count += 1;
        let count = session.tally.count;
        debug!(count, "short view counted");
        self.persist_best_effort(&session.tally).await;

        let limits = match self.store.limit_settings().await {
            Ok(limits) => limits,
            Err(StoreError::Unavailable) => {
                debug!("store unavailable, limit check runs on the default limits");
                LimitSettings::default()
            }
            Err(err) => return Err(err),
        };

        if limits.shorts_limit_reached(count) {
            session.tally.count = 0;
            self.persist_best_effort(&session.tally).await;
            info!(count, limit = limits.shorts_limit, "shorts limit reached");
            return Ok(MutationOutcome::Counted {
                count,
                interrupt: Some(InterruptKind::ShortsLimit),
            });
        }

        Ok(MutationOutcome::Counted { count, interrupt: None })
    }

    /// Reset the session tally when the calendar day has changed.
    ///
    /// Returns `true` when a rollover happened. The persisted copy is
    /// updated best-effort; the in-memory reset is what counting runs on.
    pub async fn rollover_check(&self, today: &DayKey) -> bool {
        let mut session = self.session.lock().await;
        if session.tally.day_key == *today {
            return false;
        }
        info!(from = %session.tally.day_key, to = %today, "calendar day changed, resetting tally");
        session.tally = DailyTally::fresh(today.clone());
        self.persist_best_effort(&session.tally).await;
        true
    }

    /// Snapshot of the session tally.
    pub async fn session_tally(&self) -> DailyTally {
        self.session.lock().await.tally.clone()
    }

    async fn persist_best_effort(&self, tally: &DailyTally) {
        match self.tally.persist(tally).await {
            Ok(()) => {}
            Err(StoreError::Unavailable) => debug!("store unavailable, tally not persisted"),
            Err(StoreError::Backend(err)) => warn!(error = %err, "failed to persist tally"),
        }
    }
}
