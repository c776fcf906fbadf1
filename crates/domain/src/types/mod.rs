//! Domain types and models

pub mod overlay;
pub mod page;
pub mod tally;

// Re-export for convenience
pub use overlay::{AssetUrl, InterruptKind, Overlay};
pub use page::{PageLocation, ViewIdentity};
pub use tally::{DailyTally, DayKey, LimitSettings};
