#![forbid(unsafe_code)]

//! One-way feed from the host's [`AppState`] into an adaptive tutorial.
//!
//! The bridge subscribes to an [`Observable<AppState>`] and pushes every
//! distinct value into the tutorial with
//! [`receive_app_state`](crate::engine::TourEngine::receive_app_state).
//! It never writes back to the observable.
//!
//! The tutorial is held weakly: once the host drops its last strong
//! handle the bridge goes quiet instead of keeping an unmounted engine
//! alive. Dropping the bridge drops the subscription.
//!
//! If the tutorial is already borrowed when a change arrives (a host
//! updating state from inside a tour callback), the value is parked as
//! pending. It is delivered by the next change or by
//! [`AppStateBridge::flush`], which the host calls once it has released
//! its borrow. Only the newest pending value is kept.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use waypoint_core::app_state::AppState;

use crate::engine::AdaptiveTutorial;
use crate::host::OverlayHost;
use crate::observable::{Observable, Subscription};

struct Forwarder<H: OverlayHost> {
    tutorial: Weak<RefCell<AdaptiveTutorial<H>>>,
    last: RefCell<Option<AppState>>,
    pending: RefCell<Option<AppState>>,
    forwarded: Cell<u64>,
    skipped: Cell<u64>,
}

impl<H: OverlayHost> Forwarder<H> {
    fn push(&self, state: &AppState) {
        if self.last.borrow().as_ref() == Some(state) {
            // A parked value is now older than what the tutorial already has.
            self.pending.borrow_mut().take();
            self.skipped.set(self.skipped.get() + 1);
            return;
        }
        self.deliver(state.clone());
    }

    fn deliver(&self, state: AppState) -> bool {
        let Some(tutorial) = self.tutorial.upgrade() else {
            tracing::trace!("tutorial gone; app state dropped");
            self.pending.borrow_mut().take();
            return false;
        };
        let Ok(mut tutorial) = tutorial.try_borrow_mut() else {
            tracing::warn!(page = %state.active_page, "tutorial busy; app state push deferred");
            *self.pending.borrow_mut() = Some(state);
            return false;
        };
        self.pending.borrow_mut().take();
        let _ = tutorial.receive_app_state(state.clone());
        *self.last.borrow_mut() = Some(state);
        self.forwarded.set(self.forwarded.get() + 1);
        true
    }

    fn flush(&self) -> bool {
        let Some(state) = self.pending.borrow_mut().take() else {
            return false;
        };
        self.deliver(state)
    }
}

/// Keeps an adaptive tutorial in sync with an app-state observable.
pub struct AppStateBridge<H: OverlayHost> {
    forwarder: Rc<Forwarder<H>>,
    _subscription: Subscription,
}

impl<H: OverlayHost + 'static> AppStateBridge<H> {
    /// Subscribe to `source` and push its current value right away.
    pub fn connect(
        source: &Observable<AppState>,
        tutorial: &Rc<RefCell<AdaptiveTutorial<H>>>,
    ) -> Self {
        let forwarder = Rc::new(Forwarder {
            tutorial: Rc::downgrade(tutorial),
            last: RefCell::new(None),
            pending: RefCell::new(None),
            forwarded: Cell::new(0),
            skipped: Cell::new(0),
        });
        let sink = Rc::clone(&forwarder);
        let subscription = source.subscribe(move |state| sink.push(state));
        source.with(|state| forwarder.push(state));
        Self {
            forwarder,
            _subscription: subscription,
        }
    }
}

impl<H: OverlayHost> AppStateBridge<H> {
    /// Deliver a value parked while the tutorial was busy.
    ///
    /// Returns `true` if a value reached the tutorial. A no-op when nothing
    /// is pending or the tutorial is still borrowed.
    pub fn flush(&self) -> bool {
        self.forwarder.flush()
    }

    /// Whether a change is waiting for [`flush`](Self::flush).
    pub fn has_pending(&self) -> bool {
        self.forwarder.pending.borrow().is_some()
    }

    /// Values delivered to the tutorial.
    pub fn forwarded_count(&self) -> u64 {
        self.forwarder.forwarded.get()
    }

    /// Values not delivered because they equal the last one delivered.
    pub fn skipped_count(&self) -> u64 {
        self.forwarder.skipped.get()
    }

    /// Whether the tutorial is still alive.
    pub fn is_connected(&self) -> bool {
        self.forwarder.tutorial.strong_count() > 0
    }
}

impl<H: OverlayHost> std::fmt::Debug for AppStateBridge<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateBridge")
            .field("forwarded", &self.forwarded_count())
            .field("skipped", &self.skipped_count())
            .field("pending", &self.has_pending())
            .field("connected", &self.is_connected())
            .finish()
    }
}
