#![forbid(unsafe_code)]

//! In-memory host for tests and demos.
//!
//! [`RecordingHost`] implements every host capability over shared state, so
//! a test can keep one handle while the engine owns a clone, then move
//! elements around, resize the viewport and deliver frames by hand.
//!
//! ```ignore
//! let host = RecordingHost::new(Viewport::new(1280.0, 800.0));
//! host.place("#upload", BoundingBox::new(100.0, 100.0, 50.0, 20.0));
//! let mut tour = OnboardingTour::onboarding(STEPS, TourConfig::default(), host.clone())?;
//! tour.open();
//! host.pump_frame(|frame| tour.on_frame(frame));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use waypoint_core::config::ScrollBehavior;
use waypoint_core::geometry::{BoundingBox, Viewport};
use waypoint_core::step::TargetRef;

use crate::host::{ElementLocator, FrameHandle, FrameScheduler, ListenerId, ShortcutRegistry};

#[derive(Debug, Default)]
struct HostState {
    viewport: Viewport,
    elements: BTreeMap<String, BoundingBox>,
    next_frame: u64,
    pending: Vec<FrameHandle>,
    requested: u64,
    cancelled: u64,
    next_listener: u64,
    listeners: Vec<ListenerId>,
    attached: u64,
    detached: u64,
    scrolls: Vec<(String, ScrollBehavior)>,
}

/// Cloneable host whose clones share one UI tree, clock and listener set.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                viewport,
                ..HostState::default()
            })),
        }
    }

    /// Put (or move) the element matched by `selector`.
    pub fn place(&self, selector: &str, rect: BoundingBox) {
        self.state
            .borrow_mut()
            .elements
            .insert(selector.to_owned(), rect);
    }

    /// Remove the element matched by `selector`.
    pub fn remove(&self, selector: &str) {
        self.state.borrow_mut().elements.remove(selector);
    }

    /// Remove every element, e.g. when the page is swapped out.
    pub fn clear(&self) {
        self.state.borrow_mut().elements.clear();
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = viewport;
    }

    /// Outstanding frame requests, oldest first.
    pub fn pending_frames(&self) -> Vec<FrameHandle> {
        self.state.borrow().pending.clone()
    }

    /// Pop the oldest outstanding frame as if the host were about to paint.
    pub fn take_frame(&self) -> Option<FrameHandle> {
        let mut state = self.state.borrow_mut();
        if state.pending.is_empty() {
            None
        } else {
            Some(state.pending.remove(0))
        }
    }

    /// Deliver one frame through `deliver`. Returns `false` when none was
    /// pending.
    pub fn pump_frame(&self, deliver: impl FnOnce(FrameHandle)) -> bool {
        match self.take_frame() {
            Some(frame) => {
                deliver(frame);
                true
            }
            None => false,
        }
    }

    pub fn frames_requested(&self) -> u64 {
        self.state.borrow().requested
    }

    pub fn frames_cancelled(&self) -> u64 {
        self.state.borrow().cancelled
    }

    /// Currently installed shortcut listeners.
    pub fn listeners(&self) -> Vec<ListenerId> {
        self.state.borrow().listeners.clone()
    }

    /// `(attached, detached)` counts over the host's lifetime.
    pub fn listener_counts(&self) -> (u64, u64) {
        let state = self.state.borrow();
        (state.attached, state.detached)
    }

    /// Selectors the engine asked to scroll into view, in order.
    pub fn scroll_log(&self) -> Vec<String> {
        self.state
            .borrow()
            .scrolls
            .iter()
            .map(|(selector, _)| selector.clone())
            .collect()
    }

    /// Scroll behaviors requested, in order.
    pub fn scroll_behaviors(&self) -> Vec<ScrollBehavior> {
        self.state
            .borrow()
            .scrolls
            .iter()
            .map(|(_, behavior)| *behavior)
            .collect()
    }
}

impl ElementLocator for RecordingHost {
    fn locate(&mut self, target: &TargetRef) -> Option<BoundingBox> {
        self.state.borrow().elements.get(target.as_str()).copied()
    }

    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn scroll_into_view(&mut self, target: &TargetRef, behavior: ScrollBehavior) {
        self.state
            .borrow_mut()
            .scrolls
            .push((target.as_str().to_owned(), behavior));
    }
}

impl FrameScheduler for RecordingHost {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        state.next_frame += 1;
        state.requested += 1;
        let handle = FrameHandle(state.next_frame);
        state.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|h| *h != handle);
        if state.pending.len() != before {
            state.cancelled += 1;
        }
    }
}

impl ShortcutRegistry for RecordingHost {
    fn attach_shortcuts(&mut self) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_listener += 1;
        state.attached += 1;
        let id = ListenerId(state.next_listener);
        state.listeners.push(id);
        id
    }

    fn detach_shortcuts(&mut self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|l| *l != id);
        if state.listeners.len() != before {
            state.detached += 1;
        }
    }
}
