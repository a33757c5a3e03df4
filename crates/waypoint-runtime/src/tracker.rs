#![forbid(unsafe_code)]

//! Frame-synchronized geometry tracking for the active step.
//!
//! The tracker measures the step's target through the host, places the
//! card, and then re-measures once per display frame for as long as the
//! step stays active. Placement is recomputed only when the target box or
//! the viewport actually moved, compared bit-for-bit.
//!
//! ```text
//! activate(step) ──► measure ──► place ──► request_frame ─┐
//!                                  ▲                       │
//!                                  └── changed? ◄── on_frame
//! ```
//!
//! # Invariants
//!
//! 1. At most one frame request is outstanding (see [`FrameTask`]).
//! 2. A step without a target never schedules frames.
//! 3. `activate` always cancels the previous request before measuring.
//! 4. Frame callbacks with a superseded handle are ignored.
//! 5. The host is asked to scroll a target into view at most once per
//!    activation, the first time the target resolves.

use waypoint_core::config::{ScrollBehavior, TourConfig};
use waypoint_core::geometry::{BoundingBox, Viewport};
use waypoint_core::placement::TrackedGeometry;
use waypoint_core::step::{Anchor, Step, TargetRef};

use crate::frame_task::FrameTask;
use crate::host::{ElementLocator, FrameHandle, FrameScheduler};

/// Result of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Target or viewport moved; this is the new geometry.
    Updated(TrackedGeometry),
    /// Same measurements as the previous tick.
    Unchanged,
    /// Callback for a cancelled or superseded frame; nothing was done.
    Stale,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub activations: u64,
    pub ticks: u64,
    pub updates: u64,
    pub stale: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveStep {
    target: Option<TargetRef>,
    anchor: Anchor,
    scroll_pending: bool,
}

/// Measures and places the card for one active step at a time.
#[derive(Debug)]
pub struct GeometryTracker {
    config: TourConfig,
    active: Option<ActiveStep>,
    last_target: Option<BoundingBox>,
    last_viewport: Viewport,
    geometry: Option<TrackedGeometry>,
    task: FrameTask,
    stats: TrackerStats,
}

impl GeometryTracker {
    pub fn new(config: TourConfig) -> Self {
        Self {
            config,
            active: None,
            last_target: None,
            last_viewport: Viewport::default(),
            geometry: None,
            task: FrameTask::new(),
            stats: TrackerStats::default(),
        }
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Geometry from the latest activation or update.
    pub fn geometry(&self) -> Option<TrackedGeometry> {
        self.geometry
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a frame request is outstanding.
    pub fn is_polling(&self) -> bool {
        self.task.is_pending()
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Start tracking `step`, replacing whatever was tracked before.
    ///
    /// Geometry is computed synchronously so the first render is correct.
    pub fn activate<H>(&mut self, step: &Step, host: &mut H) -> TrackedGeometry
    where
        H: ElementLocator + FrameScheduler + ?Sized,
    {
        self.task.cancel(host);
        self.stats.activations += 1;
        let mut active = ActiveStep {
            target: step.target,
            anchor: step.position,
            scroll_pending: self.config.scroll != ScrollBehavior::None,
        };

        let target = self.measure(&mut active, host);
        let viewport = host.viewport();
        let geometry = self.store(target, viewport, active.anchor);
        tracing::debug!(
            step = step.id,
            target = ?step.target.map(|t| t.as_str()),
            resolved = target.is_some(),
            left = geometry.card.left,
            top = geometry.card.top,
            "tracker activated"
        );

        if active.target.is_some() {
            self.task.schedule(host);
        }
        self.active = Some(active);
        geometry
    }

    /// Handle a display-frame callback.
    pub fn on_frame<H>(&mut self, handle: FrameHandle, host: &mut H) -> TickOutcome
    where
        H: ElementLocator + FrameScheduler + ?Sized,
    {
        if !self.task.accept(handle) {
            self.stats.stale += 1;
            tracing::trace!(%handle, "stale frame ignored");
            return TickOutcome::Stale;
        }
        let Some(mut active) = self.active else {
            self.stats.stale += 1;
            return TickOutcome::Stale;
        };
        self.stats.ticks += 1;

        let target = self.measure(&mut active, host);
        let viewport = host.viewport();
        let moved = !same_box(target, self.last_target) || !viewport.bit_eq(&self.last_viewport);

        self.active = Some(active);
        self.task.schedule(host);

        if !moved {
            return TickOutcome::Unchanged;
        }
        self.stats.updates += 1;
        let geometry = self.store(target, viewport, active.anchor);
        tracing::trace!(
            left = geometry.card.left,
            top = geometry.card.top,
            "tracked geometry updated"
        );
        TickOutcome::Updated(geometry)
    }

    /// Stop tracking and cancel any outstanding frame request.
    pub fn deactivate<H>(&mut self, host: &mut H)
    where
        H: FrameScheduler + ?Sized,
    {
        self.task.cancel(host);
        if self.active.take().is_some() {
            tracing::debug!("tracker deactivated");
        }
        self.geometry = None;
        self.last_target = None;
    }

    fn measure<H>(&mut self, active: &mut ActiveStep, host: &mut H) -> Option<BoundingBox>
    where
        H: ElementLocator + ?Sized,
    {
        let target = active.target?;
        let Some(rect) = host.locate(&target) else {
            self.stats.misses += 1;
            tracing::debug!(%target, "target not found; centering card");
            return None;
        };
        if active.scroll_pending {
            active.scroll_pending = false;
            host.scroll_into_view(&target, self.config.scroll);
        }
        Some(rect)
    }

    fn store(
        &mut self,
        target: Option<BoundingBox>,
        viewport: Viewport,
        anchor: Anchor,
    ) -> TrackedGeometry {
        let geometry = TrackedGeometry::compute(target, anchor, viewport, &self.config);
        self.last_target = target;
        self.last_viewport = viewport;
        self.geometry = Some(geometry);
        geometry
    }
}

fn same_box(a: Option<BoundingBox>, b: Option<BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.bit_eq(&b),
        (None, None) => true,
        _ => false,
    }
}
