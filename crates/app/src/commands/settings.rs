//! Limit settings commands backing the options form

use std::sync::Arc;
use std::time::Instant;

use reelbreak_domain::LimitSettings;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Text shown on the status line after a successful save.
const SAVE_CONFIRMATION: &str = "Saved. Changes apply immediately.";

/// Current limits for the settings form, defaults applied.
///
/// # Errors
/// Returns a display-ready message when the store read fails outright;
/// an unavailable store serves the defaults instead of failing.
pub async fn get_limit_settings(ctx: &Arc<AppContext>) -> Result<LimitSettings, String> {
    let command_name = "settings::get_limit_settings";
    let start = Instant::now();

    let result =
        ctx.settings.limits().await.map_err(|e| format!("Failed to load limits: {e}"));

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Validate and save limits from the settings form.
///
/// Rejections leave the stored values untouched, and the returned message
/// is the form's inline validation text. A successful save announces a
/// transient confirmation on the shared status line.
///
/// # Errors
/// Returns the validation or store failure as a display-ready message.
pub async fn save_limit_settings(
    ctx: &Arc<AppContext>,
    shorts_limit: f64,
    max_video_minutes: f64,
) -> Result<LimitSettings, String> {
    let command_name = "settings::save_limit_settings";
    let start = Instant::now();

    let result =
        ctx.settings.save(shorts_limit, max_video_minutes).await.map_err(|e| e.to_string());

    if result.is_ok() {
        ctx.save_status.announce(SAVE_CONFIRMATION);
    }

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// The save confirmation still showing on the status line, if any.
pub fn get_save_status(ctx: &Arc<AppContext>) -> Option<String> {
    ctx.save_status.message()
}
