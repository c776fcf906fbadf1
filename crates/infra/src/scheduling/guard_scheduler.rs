//! Video duration guard scheduler.
//!
//! Polls the watch page on a short cadence, with an immediate first pass so
//! a freshly opened video is checked right away. Player metadata lags
//! navigation, so each pass sleeps a settle delay between the page check and
//! the duration read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reelbreak_domain::constants::{DURATION_CHECK_INTERVAL_MS, PLAYER_SETTLE_DELAY_MS};
use reelbreak_domain::ReelbreakError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Trait representing a single duration guard pass.
#[async_trait]
pub trait GuardJob: Send + Sync {
    /// Cheap pre-check; a pass is skipped outright when the current page
    /// cannot host a long video.
    fn should_check(&self) -> bool;

    /// Read the player duration and interrupt when it exceeds the limit.
    async fn run(&self) -> Result<(), ReelbreakError>;
}

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Configuration for the guard scheduler
#[derive(Debug, Clone)]
pub struct GuardSchedulerConfig {
    /// Interval between guard passes
    pub interval: Duration,
    /// Delay between the page check and the duration read
    pub settle_delay: Duration,
    /// Timeout applied to a single pass
    pub job_timeout: Duration,
    /// Timeout for awaiting the task join handle on stop
    pub join_timeout: Duration,
}

impl Default for GuardSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DURATION_CHECK_INTERVAL_MS),
            settle_delay: Duration::from_millis(PLAYER_SETTLE_DELAY_MS),
            job_timeout: Duration::from_secs(10),
            join_timeout: Duration::from_secs(5),
        }
    }
}

/// Guard scheduler with explicit lifecycle management
pub struct GuardScheduler {
    job: Arc<dyn GuardJob>,
    config: GuardSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl GuardScheduler {
    /// Create a new guard scheduler
    pub fn new(job: Arc<dyn GuardJob>, config: GuardSchedulerConfig) -> Self {
        Self {
            job,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Spawns a background task that runs guard passes periodically, the
    /// first one immediately.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is already running
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Create a new cancellation token (supports restart after stop)
        self.cancellation_token = CancellationToken::new();

        let job = Arc::clone(&self.job);
        let config = self.config.clone();
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::guard_loop(job, config, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        info!("Guard scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// Cancels the background task and awaits completion. A pass waiting out
    /// the settle delay is cancelled along with the loop.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is not running
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: join_timeout.as_secs() })?
                .map_err(|err| SchedulerError::TaskJoinFailed(err.to_string()))?;
        }

        info!("Guard scheduler stopped");
        Ok(())
    }

    /// Check if scheduler is running
    ///
    /// A scheduler is considered running if it has an active task handle that
    /// hasn't finished.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Background guard loop
    async fn guard_loop(
        job: Arc<dyn GuardJob>,
        config: GuardSchedulerConfig,
        cancel: CancellationToken,
    ) {
        // Immediate first tick covers the page the session opened on.
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Guard loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if !job.should_check() {
                        continue;
                    }

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!("Guard loop cancelled during settle delay");
                            break;
                        }
                        _ = tokio::time::sleep(config.settle_delay) => {}
                    }

                    match tokio::time::timeout(config.job_timeout, job.run()).await {
                        Ok(Ok(())) => debug!("Guard pass finished"),
                        Ok(Err(err)) => error!(error = %err, "Guard pass failed"),
                        Err(_) => warn!(
                            timeout_secs = config.job_timeout.as_secs(),
                            "Guard pass timed out"
                        ),
                    }
                }
            }
        }
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for GuardScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("GuardScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
