//! # Reelbreak Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite state store)
//! - The mirrored page surface and asset resolution
//! - Background schedulers (day rollover, duration checks)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `reelbreak-core`
//! - Depends on `reelbreak-domain` and `reelbreak-core`
//! - Contains all "impure" code (I/O, timers, channels)

pub mod config;
pub mod database;
pub mod platform;
pub mod scheduling;

// Re-export commonly used items
pub use database::*;
pub use platform::*;
pub use scheduling::*;
