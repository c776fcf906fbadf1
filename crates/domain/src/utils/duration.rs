//! Video duration text parsing
//!
//! The observed player renders durations as `MM:SS` or `HH:MM:SS`. Anything
//! else (live badges, empty text, premiere countdowns) yields `None` so a
//! check cycle can bail out instead of acting on garbage.

/// Parse player duration text into fractional minutes.
///
/// Accepts two segments (`MM:SS`) or three (`HH:MM:SS`). Returns `None` for
/// empty, non-numeric, or otherwise malformed text.
pub fn parse_duration_text(text: &str) -> Option<f64> {
    let segments: Option<Vec<u32>> =
        text.trim().split(':').map(|segment| segment.trim().parse::<u32>().ok()).collect();

    match segments?.as_slice() {
        [minutes, seconds] => Some(f64::from(*minutes) + f64::from(*seconds) / 60.0),
        [hours, minutes, seconds] => {
            Some(f64::from(*hours) * 60.0 + f64::from(*minutes) + f64::from(*seconds) / 60.0)
        }
        _ => None,
    }
}
