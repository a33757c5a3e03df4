#![forbid(unsafe_code)]

//! Log output contract for the engine.
//!
//! Target-resolution misses are a degraded state: they must show up at
//! `debug` (never `warn` or above), and finishing a tour is an `info`
//! event. The capture layer mirrors the one used by the span hierarchy
//! tests upstream, trimmed to events.
//!
//! Run:
//!   cargo test -p waypoint-runtime --test tracing_events

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

use waypoint_core::{Step, TourConfig, Viewport};
use waypoint_runtime::OnboardingTour;
use waypoint_runtime::testing::RecordingHost;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

fn with_captured_events(f: impl FnOnce()) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: Arc::clone(&events),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

static TOUR: &[Step] = &[
    Step::new("ghost", "Ghost", "Target never renders.").target("#ghost"),
    Step::new("end", "End", "Bye."),
];

#[test]
fn missing_target_logs_at_debug_only() {
    let events = with_captured_events(|| {
        let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
        let mut tour = OnboardingTour::onboarding(TOUR, TourConfig::default(), host.clone())
            .expect("valid tour");
        tour.open();
        for _ in 0..3 {
            host.pump_frame(|frame| {
                tour.on_frame(frame);
            });
        }
    });

    let misses: Vec<_> = events
        .iter()
        .filter(|e| e.message.contains("target not found"))
        .collect();
    assert_eq!(misses.len(), 4, "one per activation and tick: {events:?}");
    assert!(misses.iter().all(|e| e.level == tracing::Level::DEBUG));
    assert!(events.iter().all(|e| e.level > tracing::Level::WARN));
}

#[test]
fn finishing_logs_at_info() {
    let events = with_captured_events(|| {
        let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
        let mut tour =
            OnboardingTour::onboarding(TOUR, TourConfig::default(), host).expect("valid tour");
        tour.open();
        tour.next();
        tour.next();
    });

    let finished: Vec<_> = events
        .iter()
        .filter(|e| e.message.contains("tour finished"))
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].level, tracing::Level::INFO);
}
