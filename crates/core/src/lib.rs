//! # Reelbreak Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - View counting and interruption rules
//! - Port/adapter interfaces (traits)
//! - Use cases and services
//!
//! ## Architecture Principles
//! - Only depends on `reelbreak-domain`
//! - No database, process, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod guard;
pub mod interrupt;
pub mod settings;
pub mod tally;
pub mod tracking;

// Infrastructure ports
pub mod page_ports;
pub mod state_ports;

// Re-export specific items to avoid ambiguity
pub use guard::{DurationGuard, GuardOutcome};
pub use interrupt::{InterruptPresenter, PresentOutcome};
pub use page_ports::{AssetResolver, PageView};
pub use settings::SettingsService;
pub use state_ports::{StateStore, StoreError};
pub use tally::TallyService;
pub use tracking::{MutationOutcome, ViewTracker};
