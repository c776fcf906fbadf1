//! Integration tests for the long video duration guard

mod support;

use std::sync::Arc;

use reelbreak_core::{
    DurationGuard, GuardOutcome, InterruptPresenter, PresentOutcome, StateStore, StoreError,
};
use reelbreak_domain::{InterruptKind, LimitSettings};
use support::{MockAssetResolver, MockPageView, MockStateStore};

/// Helper to build a guard over fresh mocks.
fn setup() -> (MockStateStore, MockPageView, DurationGuard) {
    let store = MockStateStore::new();
    let page = MockPageView::new();
    let guard = DurationGuard::new(Arc::new(store.clone()), Arc::new(page.clone()));
    (store, page, guard)
}

/// Helper to put a watch page with the given duration text on screen.
fn show_watch_page(page: &MockPageView, duration_text: Option<&str>) {
    page.navigate("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    page.set_player(duration_text.is_some(), duration_text);
}

#[tokio::test]
async fn test_flags_video_over_the_limit() {
    let (_store, page, guard) = setup();
    show_watch_page(&page, Some("25:00"));

    let outcome = guard.check().await.expect("check");
    assert_eq!(outcome, GuardOutcome::TooLong { minutes: 25.0, max_minutes: 20.0 });
}

#[tokio::test]
async fn test_accepts_video_at_the_limit() {
    let (_store, page, guard) = setup();
    show_watch_page(&page, Some("20:00"));

    // The comparison is strict: exactly the maximum is allowed
    assert_eq!(guard.check().await.expect("check"), GuardOutcome::WithinLimit { minutes: 20.0 });
}

#[tokio::test]
async fn test_hours_long_video_is_flagged() {
    let (_store, page, guard) = setup();
    show_watch_page(&page, Some("1:02:03"));

    let outcome = guard.check().await.expect("check");
    let GuardOutcome::TooLong { minutes, max_minutes } = outcome else {
        panic!("expected TooLong, got {outcome:?}");
    };
    assert!((minutes - 62.05).abs() < 1e-9, "got {minutes}");
    assert!((max_minutes - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_ignores_non_watch_pages() {
    let (_store, page, guard) = setup();
    page.navigate("https://www.youtube.com/shorts/aaa");
    page.set_player(true, Some("45:00"));

    assert!(!guard.on_watch_page());
    assert_eq!(guard.check().await.expect("check"), GuardOutcome::NotWatchPage);
}

#[tokio::test]
async fn test_nothing_loaded_yet_is_not_a_watch_page() {
    let (_store, _page, guard) = setup();

    assert!(!guard.on_watch_page());
    assert_eq!(guard.check().await.expect("check"), GuardOutcome::NotWatchPage);
}

#[tokio::test]
async fn test_unreadable_duration_skips_the_check() {
    let (_store, page, guard) = setup();

    for text in [None, Some("LIVE"), Some("0:00")] {
        show_watch_page(&page, text);
        assert_eq!(
            guard.check().await.expect("check"),
            GuardOutcome::NoDuration,
            "duration text {text:?} should not be checkable"
        );
    }
}

#[tokio::test]
async fn test_non_positive_maximum_disables_the_guard() {
    let (store, page, guard) = setup();
    store
        .save_limit_settings(&LimitSettings { shorts_limit: 5, max_video_minutes: 0.0 })
        .await
        .expect("seed limits");
    show_watch_page(&page, Some("45:00"));

    assert_eq!(guard.check().await.expect("check"), GuardOutcome::Disabled);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let (store, page, guard) = setup();
    show_watch_page(&page, Some("45:00"));
    store.set_fail(Some(StoreError::Unavailable));

    assert_eq!(guard.check().await, Err(StoreError::Unavailable));
}

#[tokio::test]
async fn test_too_long_outcome_feeds_the_presenter() {
    let (store, page, guard) = setup();
    store
        .save_limit_settings(&LimitSettings { shorts_limit: 5, max_video_minutes: 15.0 })
        .await
        .expect("seed limits");
    show_watch_page(&page, Some("30:00"));
    let presenter =
        InterruptPresenter::new(Arc::new(page.clone()), Arc::new(MockAssetResolver::new()));

    let outcome = guard.check().await.expect("check");
    let GuardOutcome::TooLong { max_minutes, .. } = outcome else {
        panic!("expected TooLong, got {outcome:?}");
    };

    assert_eq!(
        presenter.present(InterruptKind::LongVideo { max_minutes }),
        PresentOutcome::Shown
    );
    let mounted = page.mounted_overlays();
    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].title, "⏱️ Long Video Detected");
    assert_eq!(mounted[0].body, "This video exceeds your 15 min limit.");
}
