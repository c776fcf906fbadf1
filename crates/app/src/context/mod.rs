//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reelbreak_core::{
    DurationGuard, GuardOutcome, InterruptPresenter, MutationOutcome, PageView, SettingsService,
    StateStore, StoreError, ViewTracker,
};
use reelbreak_domain::{Config, DayKey, ReelbreakError, Result};
use reelbreak_infra::database::{DbManager, SqliteStateRepository};
use reelbreak_infra::platform::{DirAssetResolver, OverlayDirective, PageEvent, PageMirror};
use reelbreak_infra::scheduling::{
    GuardJob, GuardScheduler, GuardSchedulerConfig, RolloverJob, RolloverScheduler,
    RolloverSchedulerConfig, SchedulerError,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::status::SaveStatus;

/// How long a scheduler gets to start before initialization is abandoned.
const SCHEDULER_START_TIMEOUT: Duration = Duration::from_secs(10);

/// Application context - holds all services and dependencies
pub struct AppContext {
    /// Host configuration the context was built from.
    pub config: Config,
    /// SQLite connection pool behind the state store.
    pub db: Arc<DbManager>,
    /// Persistent key-value state shared with the settings surfaces.
    pub store: Arc<dyn StateStore>,
    /// Mirrored state of the observed page.
    pub mirror: Arc<PageMirror>,
    /// Shorts counting and threshold decisions.
    pub tracker: Arc<ViewTracker>,
    /// Long-video duration checks.
    pub guard: Arc<DurationGuard>,
    /// Idempotent overlay mounting.
    pub presenter: Arc<InterruptPresenter>,
    /// Limit reads and validated writes.
    pub settings: Arc<SettingsService>,
    /// Transient save confirmation for the settings form.
    pub save_status: Arc<SaveStatus>,

    rollover_scheduler: Mutex<RolloverScheduler>,
    guard_scheduler: Mutex<GuardScheduler>,
}

/// Rollover checks against the tracker's session tally.
struct TallyRolloverJob {
    tracker: Arc<ViewTracker>,
}

#[async_trait]
impl RolloverJob for TallyRolloverJob {
    async fn check(&self) -> std::result::Result<bool, ReelbreakError> {
        Ok(self.tracker.rollover_check(&DayKey::today()).await)
    }
}

/// Duration guard passes that present the long-video interruption.
struct LongVideoGuardJob {
    guard: Arc<DurationGuard>,
    presenter: Arc<InterruptPresenter>,
}

#[async_trait]
impl GuardJob for LongVideoGuardJob {
    fn should_check(&self) -> bool {
        self.guard.on_watch_page()
    }

    async fn run(&self) -> std::result::Result<(), ReelbreakError> {
        match self.guard.check().await {
            Ok(GuardOutcome::TooLong { minutes, max_minutes }) => {
                let outcome = self
                    .presenter
                    .present(reelbreak_domain::InterruptKind::LongVideo { max_minutes });
                debug!(minutes, ?outcome, "long video flagged");
                Ok(())
            }
            Ok(outcome) => {
                debug!(?outcome, "guard pass finished");
                Ok(())
            }
            Err(StoreError::Unavailable) => {
                debug!("store unavailable, guard inactive this cycle");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl AppContext {
    /// Build the full service graph from a host configuration.
    ///
    /// Opens the state database and applies migrations, seeds the default
    /// limits on first run, adopts the persisted tally into a fresh session,
    /// and constructs (but does not start) both schedulers. The returned
    /// receiver carries the overlay directives the hosting surface renders.
    ///
    /// # Errors
    /// Fails when the database cannot be opened or migrated, or when
    /// seeding the defaults fails outright. A merely unavailable store
    /// during the tally bootstrap is tolerated; counting starts from zero.
    pub async fn new(config: Config) -> Result<(Self, mpsc::UnboundedReceiver<OverlayDirective>)> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let store: Arc<dyn StateStore> = Arc::new(SqliteStateRepository::new(db.clone()));
        let settings = Arc::new(SettingsService::new(store.clone()));
        settings.seed_defaults().await?;

        let (mirror, directives) = PageMirror::new();
        let mirror = Arc::new(mirror);
        let page: Arc<dyn PageView> = mirror.clone();
        let assets = Arc::new(DirAssetResolver::new(config.assets.dir.clone()));
        let presenter = Arc::new(InterruptPresenter::new(page.clone(), assets));

        let today = DayKey::today();
        let tracker = Arc::new(ViewTracker::new(store.clone(), page.clone(), today.clone()));
        if let Err(err) = tracker.bootstrap(&today).await {
            warn!(error = %err, "tally bootstrap skipped, counting starts at zero");
        }

        let guard = Arc::new(DurationGuard::new(store.clone(), page));

        let rollover_scheduler = RolloverScheduler::new(
            Arc::new(TallyRolloverJob { tracker: tracker.clone() }),
            RolloverSchedulerConfig {
                interval: Duration::from_millis(config.cadence.rollover_check_interval_ms),
                ..RolloverSchedulerConfig::default()
            },
        );
        let guard_scheduler = GuardScheduler::new(
            Arc::new(LongVideoGuardJob { guard: guard.clone(), presenter: presenter.clone() }),
            GuardSchedulerConfig {
                interval: Duration::from_millis(config.cadence.duration_check_interval_ms),
                settle_delay: Duration::from_millis(config.cadence.player_settle_delay_ms),
                ..GuardSchedulerConfig::default()
            },
        );

        info!(db = %db.path().display(), "application context initialized");

        Ok((
            Self {
                config,
                db,
                store,
                mirror,
                tracker,
                guard,
                presenter,
                settings,
                save_status: SaveStatus::new(),
                rollover_scheduler: Mutex::new(rollover_scheduler),
                guard_scheduler: Mutex::new(guard_scheduler),
            },
            directives,
        ))
    }

    /// Start both background schedulers (fail-fast initialization).
    ///
    /// # Errors
    /// Returns `ReelbreakError::Internal` when a scheduler fails to start
    /// or does not start within the timeout, and `InvalidInput` when the
    /// schedulers are already running.
    pub async fn start_schedulers(&self) -> Result<()> {
        {
            let mut scheduler = self.rollover_scheduler.lock().await;
            tokio::time::timeout(SCHEDULER_START_TIMEOUT, scheduler.start())
                .await
                .map_err(|_| {
                    ReelbreakError::Internal("rollover scheduler start timed out".into())
                })?
                .map_err(ReelbreakError::from)?;
        }

        {
            let mut scheduler = self.guard_scheduler.lock().await;
            tokio::time::timeout(SCHEDULER_START_TIMEOUT, scheduler.start())
                .await
                .map_err(|_| ReelbreakError::Internal("guard scheduler start timed out".into()))?
                .map_err(ReelbreakError::from)?;
        }

        info!("background schedulers started");
        Ok(())
    }

    /// Apply one event from the hosting surface and run the view tracker
    /// over the updated page state.
    ///
    /// Tracking failures are logged and dropped; every page event is an
    /// independent cycle and the next one gets a clean attempt.
    pub async fn handle_page_event(&self, event: &PageEvent) {
        self.mirror.apply(event);

        match self.tracker.on_mutation().await {
            Ok(MutationOutcome::Counted { count, interrupt: Some(kind) }) => {
                let outcome = self.presenter.present(kind);
                info!(count, ?outcome, "shorts limit interruption");
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "view tracking skipped this cycle"),
        }
    }

    /// Stop both schedulers gracefully. Idempotent: schedulers that never
    /// started (or already stopped) are left alone.
    ///
    /// # Errors
    /// Returns `ReelbreakError::Internal` when a running scheduler fails to
    /// stop cleanly.
    pub async fn shutdown(&self) -> Result<()> {
        match self.rollover_scheduler.lock().await.stop().await {
            Ok(()) | Err(SchedulerError::NotRunning) => {}
            Err(err) => {
                return Err(ReelbreakError::Internal(format!(
                    "failed to stop rollover scheduler: {err}"
                )));
            }
        }

        match self.guard_scheduler.lock().await.stop().await {
            Ok(()) | Err(SchedulerError::NotRunning) => {}
            Err(err) => {
                return Err(ReelbreakError::Internal(format!(
                    "failed to stop guard scheduler: {err}"
                )));
            }
        }

        info!("application context shut down");
        Ok(())
    }
}
