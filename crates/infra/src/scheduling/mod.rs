//! Scheduling infrastructure for background cadences
//!
//! Two interval schedulers drive the engine's time-based behavior:
//! - Rollover scheduling (daily tally day checks while a session stays open)
//! - Guard scheduling (watch page duration polling)
//!
//! Both follow the same runtime rules:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on job executions

pub mod error;
pub mod guard_scheduler;
pub mod rollover_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use guard_scheduler::{GuardJob, GuardScheduler, GuardSchedulerConfig};
pub use rollover_scheduler::{RolloverJob, RolloverScheduler, RolloverSchedulerConfig};
