//! # Reelbreak App
//!
//! Composition root - context wiring, command surface, and the page event
//! bridge.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Commands backing the settings and popup forms
//! - The stdin/stdout bridge the hosting surface speaks
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owns the binary entry point

pub mod bridge;
pub mod commands;
pub mod context;
pub mod status;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::AppContext;
pub use status::SaveStatus;
