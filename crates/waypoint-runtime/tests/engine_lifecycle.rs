#![forbid(unsafe_code)]

//! End-to-end engine lifecycle against the in-memory host.
//!
//! Covers the resource rules a real host depends on: frame requests and key
//! listeners exist only while a tour is on screen, and every exit path
//! (Escape, finishing, unmount, drop) releases both.
//!
//! Run:
//!   cargo test -p waypoint-runtime --test engine_lifecycle

use std::cell::RefCell;
use std::rc::Rc;

use waypoint_core::{
    AppState, BoundingBox, KeyCode, KeyEvent, Page, StateFlag, Step, TourConfig, TourEvent,
    Viewport,
};
use waypoint_core::step::Anchor;
use waypoint_runtime::testing::RecordingHost;
use waypoint_runtime::{
    AdaptiveTutorial, AppStateBridge, Observable, OnboardingTour, TickOutcome,
};

static TOUR: &[Step] = &[
    Step::new("welcome", "Welcome", "Let's look around."),
    Step::new("upload", "Upload", "Your data goes here.")
        .target("#upload")
        .position(Anchor::Right),
    Step::new("nav", "Navigation", "Analyses live in the sidebar.")
        .target("#nav")
        .position(Anchor::Left),
    Step::new("done", "Done", "That's it."),
];

static UPLOAD: &[Step] = &[
    Step::new("dropzone", "Drop a file", "CSV, TSV or Excel.")
        .target("#dropzone")
        .interactive("Drop a file onto the highlighted area."),
    Step::new("columns", "Columns", "Pick the label column.").requires(StateFlag::DataLoaded),
];

static PCA: &[Step] = &[
    Step::new("components", "Components", "Choose how many to keep.").target("#components"),
    Step::new("scores", "Scores plot", "Each point is a sample.")
        .target("#scores")
        .requires(StateFlag::PcaComputed),
];

fn pages(page: Page) -> &'static [Step] {
    match page {
        Page::Upload => UPLOAD,
        Page::Pca => PCA,
        _ => &[],
    }
}

fn host() -> RecordingHost {
    let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
    host.place("#upload", BoundingBox::new(100.0, 100.0, 50.0, 20.0));
    host.place("#nav", BoundingBox::new(1000.0, 60.0, 240.0, 600.0));
    host.place("#dropzone", BoundingBox::new(320.0, 180.0, 640.0, 240.0));
    host.place("#components", BoundingBox::new(40.0, 600.0, 160.0, 32.0));
    host.place("#scores", BoundingBox::new(400.0, 120.0, 480.0, 480.0));
    host
}

fn onboarding(host: &RecordingHost) -> OnboardingTour<RecordingHost> {
    OnboardingTour::onboarding(TOUR, TourConfig::default(), host.clone()).expect("valid tour")
}

#[test]
fn full_walkthrough_by_keyboard() {
    let host = host();
    let mut tour = onboarding(&host);
    tour.open();

    let mut visited = vec![tour.current_step().map(|s| s.id)];
    while tour.handle_key(&KeyEvent::new(KeyCode::Right)) && tour.is_open() {
        visited.push(tour.current_step().map(|s| s.id));
    }
    assert_eq!(
        visited,
        vec![Some("welcome"), Some("upload"), Some("nav"), Some("done")]
    );
    assert!(!tour.is_open());
    assert!(host.listeners().is_empty());
    assert!(host.pending_frames().is_empty());
    assert_eq!(host.listener_counts(), (1, 1));
}

#[test]
fn card_follows_a_moving_target() {
    let host = host();
    let mut tour = onboarding(&host);
    tour.open();
    tour.next();
    assert_eq!(tour.geometry().map(|g| g.card.left), Some(166.0));

    // Layout shift: the upload button moves down and right.
    host.place("#upload", BoundingBox::new(400.0, 300.0, 100.0, 40.0));
    let mut outcome = TickOutcome::Stale;
    assert!(host.pump_frame(|frame| outcome = tour.on_frame(frame)));
    let TickOutcome::Updated(geometry) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert_eq!(geometry.card.left, 516.0);
    assert_eq!(geometry.card.top, 210.0);
    assert_eq!(tour.geometry(), Some(geometry));

    // Nothing moves: the loop keeps running without updates.
    for _ in 0..5 {
        let mut outcome = TickOutcome::Stale;
        assert!(host.pump_frame(|frame| outcome = tour.on_frame(frame)));
        assert_eq!(outcome, TickOutcome::Unchanged);
    }
    assert_eq!(tour.tracker_stats().updates, 1);
    assert_eq!(host.pending_frames().len(), 1);
}

#[test]
fn target_that_disappears_centers_the_card() {
    let host = host();
    let mut tour = onboarding(&host);
    tour.open();
    tour.next();
    host.remove("#upload");

    let mut outcome = TickOutcome::Stale;
    host.pump_frame(|frame| outcome = tour.on_frame(frame));
    let TickOutcome::Updated(geometry) = outcome else {
        panic!("expected an update, got {outcome:?}");
    };
    assert!(geometry.target.is_none());
    assert!(geometry.highlight.is_none());
    assert_eq!(geometry.card.left, (1280.0 - 360.0) / 2.0);
    // Still polling: the target may come back.
    assert_eq!(host.pending_frames().len(), 1);
}

#[test]
fn every_exit_path_releases_resources() {
    let host = host();

    let mut tour = onboarding(&host);
    tour.open();
    tour.next();
    tour.handle_key(&KeyEvent::new(KeyCode::Escape));
    assert!(host.listeners().is_empty() && host.pending_frames().is_empty());

    tour.open();
    tour.goto(1);
    tour.unmount();
    assert!(host.listeners().is_empty() && host.pending_frames().is_empty());

    let mut other = onboarding(&host);
    other.open();
    other.goto(2);
    drop(other);
    assert!(host.listeners().is_empty() && host.pending_frames().is_empty());

    let (attached, detached) = host.listener_counts();
    assert_eq!(attached, detached);
}

#[test]
fn scroll_requested_once_per_activation() {
    let host = host();
    let mut tour = onboarding(&host);
    tour.open();
    tour.next();
    for _ in 0..3 {
        host.pump_frame(|frame| {
            tour.on_frame(frame);
        });
    }
    tour.next();
    assert_eq!(host.scroll_log(), vec!["#upload".to_string(), "#nav".to_string()]);
}

#[test]
fn tutorial_follows_app_state_through_the_bridge() {
    let host = host();
    let state = Observable::new(AppState::default());
    let tutorial = Rc::new(RefCell::new(AdaptiveTutorial::adaptive(
        pages,
        AppState::default(),
        TourConfig::default(),
        host.clone(),
    )));
    let bridge = AppStateBridge::connect(&state, &tutorial);

    {
        let mut t = tutorial.borrow_mut();
        t.open();
        t.next();
        assert_eq!(t.pending_requirement(), Some(StateFlag::DataLoaded));
    }

    // Uploading a file satisfies the hint but does not move the tour.
    state.update(|s| {
        s.data_loaded = true;
        s.session_id = Some("a1b2".into());
    });
    {
        let t = tutorial.borrow();
        assert_eq!(t.current_index(), 1);
        assert_eq!(t.pending_requirement(), None);
    }

    // Navigating swaps the tutorial and restarts it on the new page.
    state.update(|s| s.active_page = Page::Pca);
    {
        let t = tutorial.borrow();
        assert_eq!(t.current_index(), 0);
        assert_eq!(t.current_step().map(|s| s.id), Some("components"));
        let view = t.snapshot().expect("visible");
        assert_eq!(view.total, 2);
        assert_eq!(view.geometry.card.anchor, Anchor::Bottom);
    }
    assert_eq!(host.pending_frames().len(), 1);
    assert_eq!(bridge.forwarded_count(), 3);

    // A page without a tutorial hides the overlay and releases the host.
    state.update(|s| s.active_page = Page::Report);
    {
        let t = tutorial.borrow();
        assert!(t.is_open());
        assert!(t.snapshot().is_none());
    }
    assert!(host.listeners().is_empty());
    assert!(host.pending_frames().is_empty());

    drop(bridge);
    drop(tutorial);
    assert!(host.listeners().is_empty());
}

#[test]
fn replaying_onboarding_after_finish() {
    let host = host();
    let mut tour = onboarding(&host);
    tour.open();
    for _ in 0..TOUR.len() {
        tour.next();
    }
    assert!(!tour.is_open());
    assert_eq!(tour.restart(), Some(TourEvent::Opened));
    assert_eq!(tour.current_index(), 0);
    assert!(tour.has_shortcuts());
}
