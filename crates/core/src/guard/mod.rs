//! Long video duration guard

pub mod service;

pub use service::{DurationGuard, GuardOutcome};
