//! Day rollover scheduler.
//!
//! Periodically compares the tracked day against the calendar so a session
//! left open across midnight starts the new day at zero. The first check
//! fires one full interval after start; the session bootstrap has already
//! reconciled the stored day at that point.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use reelbreak_infra::scheduling::{
//!     RolloverJob, RolloverScheduler, RolloverSchedulerConfig, SchedulerResult,
//! };
//!
//! struct NoopJob;
//!
//! #[async_trait]
//! impl RolloverJob for NoopJob {
//!     async fn check(&self) -> Result<bool, reelbreak_domain::ReelbreakError> {
//!         Ok(false)
//!     }
//! }
//!
//! # async fn example() -> SchedulerResult<()> {
//! let mut scheduler =
//!     RolloverScheduler::new(Arc::new(NoopJob), RolloverSchedulerConfig::default());
//!
//! scheduler.start().await?;
//! // ... session runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reelbreak_domain::constants::ROLLOVER_CHECK_INTERVAL_MS;
use reelbreak_domain::ReelbreakError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Trait representing a single rollover check.
#[async_trait]
pub trait RolloverJob: Send + Sync {
    /// Compare the tracked day against the calendar. Returns true when the
    /// tally rolled over to a fresh day.
    async fn check(&self) -> Result<bool, ReelbreakError>;
}

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Configuration for the rollover scheduler
#[derive(Debug, Clone)]
pub struct RolloverSchedulerConfig {
    /// Interval between day checks
    pub interval: Duration,
    /// Timeout applied to a single check
    pub job_timeout: Duration,
    /// Timeout for awaiting the task join handle on stop
    pub join_timeout: Duration,
}

impl Default for RolloverSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(ROLLOVER_CHECK_INTERVAL_MS),
            job_timeout: Duration::from_secs(10),
            join_timeout: Duration::from_secs(5),
        }
    }
}

/// Rollover scheduler with explicit lifecycle management
pub struct RolloverScheduler {
    job: Arc<dyn RolloverJob>,
    config: RolloverSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl RolloverScheduler {
    /// Create a new rollover scheduler
    pub fn new(job: Arc<dyn RolloverJob>, config: RolloverSchedulerConfig) -> Self {
        Self {
            job,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Spawns a background task that checks the day periodically.
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
            Self::check_loop(job, config, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        info!("Rollover scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// Cancels the background task and awaits completion.
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

        info!("Rollover scheduler stopped");
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

    /// Background check loop
    async fn check_loop(
        job: Arc<dyn RolloverJob>,
        config: RolloverSchedulerConfig,
        cancel: CancellationToken,
    ) {
        // No immediate tick: the first check lands one interval after start.
        let start = tokio::time::Instant::now() + config.interval;
        let mut ticker = tokio::time::interval_at(start, config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Rollover loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    match tokio::time::timeout(config.job_timeout, job.check()).await {
                        Ok(Ok(true)) => info!("Daily tally rolled over"),
                        Ok(Ok(false)) => debug!("Day unchanged"),
                        Ok(Err(err)) => error!(error = %err, "Rollover check failed"),
                        Err(_) => warn!(
                            timeout_secs = config.job_timeout.as_secs(),
                            "Rollover check timed out"
                        ),
                    }
                }
            }
        }
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for RolloverScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("RolloverScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingJob {
        checks: AtomicUsize,
    }

    impl CountingJob {
        fn new() -> Self {
            Self { checks: AtomicUsize::new(0) }
        }

        fn check_count(&self) -> usize {
            self.checks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RolloverJob for CountingJob {
        async fn check(&self) -> Result<bool, ReelbreakError> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    fn fast_config() -> RolloverSchedulerConfig {
        RolloverSchedulerConfig {
            interval: Duration::from_millis(20),
            job_timeout: Duration::from_secs(2),
            join_timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_lifecycle_runs_checks() {
        let job = Arc::new(CountingJob::new());
        let mut scheduler = RolloverScheduler::new(job.clone(), fast_config());

        assert!(!scheduler.is_running());
        scheduler.start().await.expect("start succeeds");
        assert!(scheduler.is_running());

        tokio::time::sleep(Duration::from_millis(150)).await;
        scheduler.stop().await.expect("stop succeeds");

        assert!(job.check_count() >= 1);
        assert!(!scheduler.is_running());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_first_check_waits_a_full_interval() {
        let job = Arc::new(CountingJob::new());
        let mut scheduler = RolloverScheduler::new(
            job.clone(),
            RolloverSchedulerConfig { interval: Duration::from_secs(60), ..fast_config() },
        );

        scheduler.start().await.expect("start succeeds");
        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.stop().await.expect("stop succeeds");

        assert_eq!(job.check_count(), 0, "no check before the first interval elapses");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_double_start_is_rejected() {
        let job = Arc::new(CountingJob::new());
        let mut scheduler = RolloverScheduler::new(job, fast_config());

        scheduler.start().await.expect("first start");
        let err = scheduler.start().await.expect_err("second start fails");
        assert!(matches!(err, SchedulerError::AlreadyRunning));
        scheduler.stop().await.expect("stop succeeds");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_without_start_is_rejected() {
        let job = Arc::new(CountingJob::new());
        let mut scheduler = RolloverScheduler::new(job, fast_config());

        let err = scheduler.stop().await.expect_err("stop fails");
        assert!(matches!(err, SchedulerError::NotRunning));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_restart_after_stop_succeeds() {
        let job = Arc::new(CountingJob::new());
        let mut scheduler = RolloverScheduler::new(job, fast_config());

        scheduler.start().await.expect("start succeeds");
        scheduler.stop().await.expect("stop succeeds");
        assert!(!scheduler.is_running());

        scheduler.start().await.expect("start again");
        scheduler.stop().await.expect("stop again");
    }
}
