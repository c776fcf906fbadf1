//! Daily tally commands backing the popup display

use std::sync::Arc;
use std::time::Instant;

use reelbreak_domain::DailyTally;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Today's shorts tally for display.
///
/// Served from the tracker's session state, which is the value the limit
/// decisions run on even when the store is unreachable.
pub async fn get_daily_tally(ctx: &Arc<AppContext>) -> DailyTally {
    let command_name = "tally::get_daily_tally";
    let start = Instant::now();

    let tally = ctx.tracker.session_tally().await;

    log_command_execution(command_name, start.elapsed(), true);
    tally
}
