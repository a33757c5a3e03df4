#![forbid(unsafe_code)]

//! Runtime: host capabilities, the frame-synchronized geometry tracker and
//! the tour engine.
//!
//! # Role in Waypoint
//! `waypoint-runtime` is where a [`TourSession`](waypoint_core::TourSession)
//! meets a live UI. Hosts implement [`OverlayHost`] (element lookup, frame
//! callbacks, key listeners); the [`TourEngine`] drives the session, keeps
//! the card glued to the target frame by frame, and owns listener and
//! frame-request lifetimes.
//!
//! # Key components
//! - [`engine`]: [`TourEngine`] with the [`FixedSteps`] and
//!   [`AdaptiveSteps`] sources.
//! - [`tracker`]: [`GeometryTracker`], one measurement per display frame.
//! - [`frame_task`]: at-most-one pending frame request with stale-handle
//!   rejection.
//! - [`observable`] and [`bridge`]: the host's `AppState` feed into the
//!   adaptive tutorial.
//! - [`testing`]: [`RecordingHost`](testing::RecordingHost), an in-memory
//!   host for tests and demos.
//!
//! Everything here is single-threaded; shared handles are `Rc<RefCell<_>>`.

pub mod bridge;
pub mod engine;
pub mod frame_task;
pub mod host;
pub mod observable;
pub mod testing;
pub mod tracker;

pub use bridge::AppStateBridge;
pub use engine::{
    AdaptiveSteps, AdaptiveTutorial, FixedSteps, OnboardingTour, PageRegistry, StepSource,
    TourEngine,
};
pub use frame_task::FrameTask;
pub use host::{
    ElementLocator, FrameHandle, FrameScheduler, ListenerId, OverlayHost, ShortcutRegistry,
};
pub use observable::{Observable, Subscription};
pub use tracker::{GeometryTracker, TickOutcome, TrackerStats};
