#![forbid(unsafe_code)]

//! Capabilities the engine consumes from the host UI.
//!
//! A web host implements these over the DOM (`querySelector`,
//! `getBoundingClientRect`, `requestAnimationFrame`, `keydown` listeners);
//! a terminal host over its widget tree and tick loop. The engine never
//! sees anything more specific than these traits.

use std::fmt;

use waypoint_core::config::ScrollBehavior;
use waypoint_core::geometry::{BoundingBox, Viewport};
use waypoint_core::step::TargetRef;

/// Token for one scheduled display-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Token for an installed set of tour shortcut listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Resolves target references and reports screen geometry.
pub trait ElementLocator {
    /// Current box of the element `target` refers to.
    ///
    /// `None` when nothing matches, e.g. the page has not rendered it yet.
    fn locate(&mut self, target: &TargetRef) -> Option<BoundingBox>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Bring the element to the vertical center of the viewport.
    fn scroll_into_view(&mut self, target: &TargetRef, behavior: ScrollBehavior);
}

/// Schedules callbacks on the host's paint cycle.
///
/// After `request_frame` returns `h`, the host calls the engine's
/// `on_frame(h)` once, before its next paint, unless `cancel_frame(h)` was
/// called first.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Installs and removes the tour's global key listeners.
///
/// While installed, the host routes key events to the engine's
/// `handle_key`.
pub trait ShortcutRegistry {
    fn attach_shortcuts(&mut self) -> ListenerId;
    fn detach_shortcuts(&mut self, id: ListenerId);
}

/// Everything the engine needs from its host.
pub trait OverlayHost: ElementLocator + FrameScheduler + ShortcutRegistry {}

impl<T: ElementLocator + FrameScheduler + ShortcutRegistry> OverlayHost for T {}
