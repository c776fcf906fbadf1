//! # Reelbreak Domain
//!
//! Business domain types and models for Reelbreak.
//!
//! This crate contains:
//! - Domain data types (DailyTally, LimitSettings, Overlay, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and models
//!
//! ## Architecture
//! - No dependencies on other Reelbreak crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export the duration text parser
pub use utils::duration::parse_duration_text;
