#![forbid(unsafe_code)]

//! Scenes composed from a live engine snapshot.
//!
//! Run:
//!   cargo test -p waypoint-overlay --test scene_from_engine

use proptest::prelude::*;

use waypoint_core::step::Anchor;
use waypoint_core::{BoundingBox, Step, TourConfig, Viewport};
use waypoint_overlay::{CellGrid, CellMetrics, Layer, OverlayScene, OverlayStyle, PointerDisposition};
use waypoint_runtime::testing::RecordingHost;
use waypoint_runtime::{OnboardingTour, TickOutcome};

static TOUR: &[Step] = &[
    Step::new("welcome", "Welcome", "This tour takes about a minute."),
    Step::new("upload", "Upload a dataset", "CSV or Excel, one sample per row.")
        .target("#upload")
        .position(Anchor::Right)
        .interactive("Click the button to pick a file."),
    Step::new("sidebar", "Analyses", "Preprocessing, PCA, clustering and more.")
        .target("#sidebar")
        .position(Anchor::Right),
];

fn tour(host: &RecordingHost) -> OnboardingTour<RecordingHost> {
    OnboardingTour::onboarding(TOUR, TourConfig::default(), host.clone()).expect("valid tour")
}

#[test]
fn closed_tour_draws_nothing() {
    let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
    let tour = tour(&host);
    assert!(OverlayScene::compose(tour.snapshot(), &OverlayStyle::default()).is_none());
}

#[test]
fn scene_tracks_the_engine() {
    let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
    host.place("#upload", BoundingBox::new(100.0, 100.0, 50.0, 20.0));
    host.place("#sidebar", BoundingBox::new(0.0, 64.0, 220.0, 736.0));
    let mut tour = tour(&host);
    let style = OverlayStyle::default();

    tour.open();
    let welcome = OverlayScene::compose(tour.snapshot(), &style).expect("scene");
    assert!(welcome.cutout.is_none());
    assert_eq!(welcome.card.progress, "1 / 3");

    tour.next();
    let upload = OverlayScene::compose(tour.snapshot(), &style).expect("scene");
    assert_eq!(upload.card.rect.left, 166.0);
    assert_eq!(upload.hit_test(110.0, 105.0), PointerDisposition::PassThrough);
    assert_eq!(upload.card.action_hint, Some("Click the button to pick a file."));

    // The button moves; the next frame's scene follows it.
    host.place("#upload", BoundingBox::new(500.0, 300.0, 50.0, 20.0));
    let mut outcome = TickOutcome::Stale;
    host.pump_frame(|frame| outcome = tour.on_frame(frame));
    assert!(matches!(outcome, TickOutcome::Updated(_)));
    let moved = OverlayScene::compose(tour.snapshot(), &style).expect("scene");
    assert_eq!(moved.card.rect.left, 566.0);
    assert_eq!(moved.hit_test(110.0, 105.0), PointerDisposition::Blocked);

    tour.next();
    let last = OverlayScene::compose(tour.snapshot(), &style).expect("scene");
    assert_eq!(last.card.next_label, "Finish");
    assert_eq!(last.hit_test(100.0, 400.0), PointerDisposition::Blocked);

    let grid = CellGrid::render(&last, CellMetrics::default());
    assert!(grid.count(Layer::Cutout) > 0);
    assert!(grid.to_text().contains("[Back] [Finish]"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn any_geometry_rasterizes(
        x in -2000.0f64..4000.0,
        y in -2000.0f64..4000.0,
        w in 0.0f64..3000.0,
        h in 0.0f64..3000.0,
        vw in 0.0f64..3000.0,
        vh in 0.0f64..2000.0,
        index in 0usize..3,
    ) {
        let host = RecordingHost::new(Viewport::new(vw, vh));
        host.place("#upload", BoundingBox::new(x, y, w, h));
        host.place("#sidebar", BoundingBox::new(x, y, w, h));
        let mut tour = tour(&host);
        tour.open();
        tour.goto(index);

        let scene = OverlayScene::compose(tour.snapshot(), &OverlayStyle::default());
        prop_assert!(scene.is_some());
        let Some(scene) = scene else { return Ok(()) };
        let _ = scene.hit_test(x, y);

        let grid = CellGrid::render(&scene, CellMetrics::default());
        prop_assert_eq!(grid.width(), (vw / 8.0).ceil() as u16);
        prop_assert_eq!(grid.height(), (vh / 16.0).ceil() as u16);
    }
}
