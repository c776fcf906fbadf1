//! In-memory session state for the view tracker

use reelbreak_domain::{DailyTally, DayKey, ViewIdentity};

/// What the tracker remembers between page events.
///
/// The tally here is the working copy; the store receives a snapshot of it
/// after every change. The last counted view survives a day rollover so a
/// short left on screen over midnight is not counted twice.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Working copy of the daily tally.
    pub tally: DailyTally,
    /// Identity of the last short that was counted.
    pub last_view: Option<ViewIdentity>,
}

impl SessionState {
    /// Fresh session for the given day.
    pub fn new(today: DayKey) -> Self {
        Self { tally: DailyTally::fresh(today), last_view: None }
    }
}
