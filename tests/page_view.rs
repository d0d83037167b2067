// tests/page_view.rs
//! Timer-driven behaviour of a mounted page view.
//!
//! Every test runs on a paused clock, so sleeps complete instantly and in
//! deadline order.

mod common;

use common::*;
use notion_blog::{
    extract_title, ImageValidator, PageView, PostRepository, ViewState, REFRESH_DELAY,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn view(repo: &Arc<FakeRepository>, validator: &Arc<FakeImageValidator>) -> PageView {
    PageView::new(
        Arc::clone(repo) as Arc<dyn PostRepository>,
        Arc::clone(validator) as Arc<dyn ImageValidator>,
    )
}

#[tokio::test(start_paused = true)]
async fn mount_fetches_once_after_delay() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Fresh", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Built", vec![])));
    assert_eq!(view.state(), ViewState::RefreshScheduled);
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Built");

    tokio::time::sleep(REFRESH_DELAY - Duration::from_millis(100)).await;
    assert!(repo.fetches().is_empty(), "fetched before the refresh delay");

    view.wait_for_refresh().await;
    assert_eq!(repo.fetches(), vec!["abc".to_string()]);
    assert_eq!(view.state(), ViewState::RefreshComplete);
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Fresh");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(repo.fetches().len(), 1, "refresh must not poll");
}

#[tokio::test(start_paused = true)]
async fn initial_snapshot_is_published_before_refresh() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Fresh", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);
    let mut states = view.subscribe_state();

    view.mount(Some(post_id("abc")), Some(snapshot("Built", vec![])));
    assert_eq!(*states.borrow_and_update(), ViewState::RefreshScheduled);

    let snapshots = view.subscribe_snapshot();
    assert_eq!(extract_title(snapshots.borrow().as_ref().unwrap()), "Built");

    states.changed().await.unwrap();
    assert_eq!(*states.borrow(), ViewState::RefreshComplete);
}

#[tokio::test(start_paused = true)]
async fn navigate_cancels_pending_refresh() {
    let repo = Arc::new(
        FakeRepository::new()
            .with_post("abc", snapshot("Abc", vec![]))
            .with_post("xyz", snapshot("Xyz", vec![])),
    );
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Abc (built)", vec![])));
    tokio::time::sleep(Duration::from_secs(1)).await;

    view.navigate(post_id("xyz"), Some(snapshot("Xyz (built)", vec![])));
    assert_eq!(view.post_id(), Some(&post_id("xyz")));
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Xyz (built)");

    view.wait_for_refresh().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(repo.fetches(), vec!["xyz".to_string()]);
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Xyz");
}

#[tokio::test(start_paused = true)]
async fn navigate_to_same_post_keeps_timer() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), None);
    tokio::time::sleep(Duration::from_secs(2)).await;
    view.navigate(post_id("abc"), None);

    // The original timer still fires 3s after mount, not 3s after navigate
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(repo.fetches(), vec!["abc".to_string()]);
    assert_eq!(view.state(), ViewState::RefreshComplete);
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_snapshot() {
    let repo = Arc::new(FakeRepository::new().with_failing_post("abc"));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Built", vec![])));
    let before = view.snapshot().unwrap();

    view.wait_for_refresh().await;

    assert_eq!(view.state(), ViewState::RefreshComplete);
    assert!(Arc::ptr_eq(&before, &view.snapshot().unwrap()));
    assert_eq!(repo.fetches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn mount_without_post_id_does_nothing() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(None, Some(snapshot("Built", vec![image(1, "https://img/a.png")])));
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(view.state(), ViewState::Uninitialized);
    assert!(view.snapshot().is_none());
    assert!(repo.fetches().is_empty());
    assert_eq!(validator.checks(), 0);
}

#[tokio::test(start_paused = true)]
async fn fallback_mount_loads_on_refresh() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), None);
    assert_eq!(view.state(), ViewState::RefreshScheduled);
    assert!(view.snapshot().is_none());

    view.wait_for_refresh().await;
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Abc");
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_refresh() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Built", vec![])));
    view.unmount();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(repo.fetches().is_empty());
    assert_eq!(view.state(), ViewState::Uninitialized);
    assert!(view.post_id().is_none());
    assert!(view.snapshot().is_none());
}

#[tokio::test(start_paused = true)]
async fn unmount_clears_refreshed_snapshot() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);
    let snapshots = view.subscribe_snapshot();

    view.mount(Some(post_id("abc")), None);
    view.wait_for_refresh().await;
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Abc");

    view.unmount();
    assert!(view.snapshot().is_none());
    assert!(snapshots.borrow().is_none());
}

#[tokio::test(start_paused = true)]
async fn navigate_without_initial_snapshot_drops_previous_post() {
    let repo = Arc::new(
        FakeRepository::new()
            .with_post("abc", snapshot("Abc", vec![]))
            .with_failing_post("xyz"),
    );
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Abc (built)", vec![])));
    view.wait_for_refresh().await;
    assert_eq!(extract_title(&view.snapshot().unwrap()), "Abc");

    view.navigate(post_id("xyz"), None);
    assert_eq!(view.post_id(), Some(&post_id("xyz")));
    assert_eq!(view.state(), ViewState::RefreshScheduled);
    assert!(view.snapshot().is_none(), "still showing the previous post");

    // xyz never loads, so the view ends with nothing rather than abc's content
    view.wait_for_refresh().await;
    assert_eq!(view.state(), ViewState::RefreshComplete);
    assert!(view.snapshot().is_none());
    assert_eq!(repo.fetches(), vec!["abc".to_string(), "xyz".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_refresh() {
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", vec![])));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), None);
    drop(view);
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(repo.fetches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failing_images_latch_expired_flag() {
    let blocks = vec![
        image(1, "https://img/a.png"),
        toggle(2, "More", vec![image(3, "https://img/b.png"), image(4, "https://img/c.png")]),
    ];
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", blocks.clone())));
    let validator = Arc::new(FakeImageValidator::with_broken(&[
        "https://img/a.png",
        "https://img/c.png",
    ]));
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Built", blocks)));
    let failed = view.wait_for_image_checks().await;

    assert_eq!(failed, 2);
    assert_eq!(validator.checks(), 3);
    assert!(view.is_image_expired());
    assert!(!view.expired_flag().mark_expired(), "latch already set");

    // The refreshed snapshot is checked again; the flag stays set
    view.wait_for_refresh().await;
    assert_eq!(view.wait_for_image_checks().await, 2);
    assert_eq!(validator.checks(), 6);
    assert!(view.is_image_expired());
}

#[tokio::test(start_paused = true)]
async fn healthy_images_leave_flag_unset() {
    let blocks = vec![image(1, "https://img/a.png")];
    let repo = Arc::new(FakeRepository::new().with_post("abc", snapshot("Abc", blocks.clone())));
    let validator = Arc::new(FakeImageValidator::default());
    let mut view = view(&repo, &validator);

    view.mount(Some(post_id("abc")), Some(snapshot("Built", blocks)));
    assert_eq!(view.wait_for_image_checks().await, 0);
    assert!(!view.is_image_expired());
}
