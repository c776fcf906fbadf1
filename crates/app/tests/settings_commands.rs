//! Integration tests for the settings command surface
//!
//! The options form reads and writes limits exclusively through these
//! commands; the tests pin the validation, persistence, and status line
//! behavior it relies on.

mod support;

use std::time::Duration;

use reelbreak_app::commands;
use reelbreak_domain::LimitSettings;
use support::TestApp;

#[tokio::test(flavor = "multi_thread")]
async fn test_get_limit_settings_serves_defaults_on_first_run() {
    let app = TestApp::new().await;

    let limits = commands::get_limit_settings(&app.ctx).await.expect("limits should load");
    assert_eq!(limits, LimitSettings::default());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_persists_and_announces_confirmation() {
    let app = TestApp::new().await;

    let saved = commands::save_limit_settings(&app.ctx, 3.0, 45.0)
        .await
        .expect("valid limits should save");
    assert_eq!(saved.shorts_limit, 3);

    let reloaded = commands::get_limit_settings(&app.ctx).await.expect("limits should reload");
    assert_eq!(reloaded, saved);

    let status = commands::get_save_status(&app.ctx).expect("confirmation should be showing");
    assert!(status.contains("Saved"), "got {status:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_input_leaves_stored_limits_unchanged() {
    let app = TestApp::new().await;
    commands::save_limit_settings(&app.ctx, 3.0, 45.0).await.expect("initial save");

    for (shorts_limit, max_video_minutes) in
        [(0.0, 20.0), (-1.0, 20.0), (f64::NAN, 20.0), (5.0, f64::INFINITY), (5.0, 0.0)]
    {
        let err = commands::save_limit_settings(&app.ctx, shorts_limit, max_video_minutes)
            .await
            .expect_err("out-of-range input should be rejected");
        assert!(err.contains("at least 1"), "got {err:?}");
    }

    let limits = commands::get_limit_settings(&app.ctx).await.expect("limits should load");
    assert_eq!(limits.shorts_limit, 3);
    assert!((limits.max_video_minutes - 45.0).abs() < f64::EPSILON);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_input_does_not_announce() {
    let app = TestApp::new().await;

    commands::save_limit_settings(&app.ctx, f64::NAN, 20.0)
        .await
        .expect_err("invalid input should be rejected");
    assert_eq!(commands::get_save_status(&app.ctx), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_confirmation_clears_after_two_seconds() {
    let app = TestApp::new().await;

    commands::save_limit_settings(&app.ctx, 3.0, 45.0).await.expect("save should succeed");
    assert!(commands::get_save_status(&app.ctx).is_some());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(commands::get_save_status(&app.ctx), None);
}
