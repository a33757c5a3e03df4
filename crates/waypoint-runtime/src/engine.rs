#![forbid(unsafe_code)]

//! The tour engine: one session, one tracker, one host.
//!
//! [`TourEngine`] ties a [`TourSession`] to a [`GeometryTracker`] and to the
//! host's shortcut listeners. It is parametrized over where its steps come
//! from:
//!
//! - [`FixedSteps`]: a static list, used for the onboarding tour.
//! - [`AdaptiveSteps`]: a per-page registry driven by [`AppState`], used
//!   for the teaching-mode tutorial.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► open ──► next/previous/goto ... ──► close ──► (open again)
//!                                   │
//!                              next at last ──► close
//! unmount / drop: close, detach, cancel; the engine is inert afterwards.
//! ```
//!
//! # Invariants
//!
//! 1. Shortcut listeners are installed exactly while the session is visible
//!    (open with at least one step) and the engine is mounted.
//! 2. The tracker polls exactly while the session is visible, the engine is
//!    mounted and the current step has a target.
//! 3. Every step change re-activates the tracker synchronously, so
//!    [`TourEngine::geometry`] is never one frame behind.
//! 4. `required_state` never moves the session; it only surfaces as a
//!    waiting hint.

use waypoint_core::app_state::{AppState, Page, StateFlag};
use waypoint_core::config::TourConfig;
use waypoint_core::error::RegistryError;
use waypoint_core::input::{KeyEvent, TourCommand, command_for};
use waypoint_core::placement::TrackedGeometry;
use waypoint_core::session::{TourEvent, TourSession};
use waypoint_core::step::{Step, StepList};
use waypoint_core::view::TourView;

use crate::host::{FrameHandle, ListenerId, OverlayHost};
use crate::tracker::{GeometryTracker, TickOutcome, TrackerStats};

/// Supplies the step list a [`TourEngine`] walks through.
pub trait StepSource {
    /// Short name used in logs.
    fn label(&self) -> &'static str;

    /// The list the session should currently hold.
    fn steps(&self) -> StepList;

    /// The milestone `step` is waiting for, if it is not reached yet.
    fn unmet_requirement(&self, _step: &Step) -> Option<StateFlag> {
        None
    }
}

/// A fixed step list.
#[derive(Debug, Clone)]
pub struct FixedSteps {
    steps: StepList,
}

impl FixedSteps {
    pub fn new(steps: &'static [Step]) -> Result<Self, RegistryError> {
        Ok(Self {
            steps: StepList::new(steps)?,
        })
    }
}

impl StepSource for FixedSteps {
    fn label(&self) -> &'static str {
        "onboarding"
    }

    fn steps(&self) -> StepList {
        self.steps.clone()
    }
}

/// Maps a page to its tutorial steps.
pub type PageRegistry = fn(Page) -> &'static [Step];

/// Step lists chosen by the host's current page.
#[derive(Debug, Clone)]
pub struct AdaptiveSteps {
    registry: PageRegistry,
    state: AppState,
}

impl AdaptiveSteps {
    pub fn new(registry: PageRegistry, state: AppState) -> Self {
        Self { registry, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn steps_for(&self, page: Page) -> StepList {
        StepList::new((self.registry)(page)).unwrap_or_else(|err| {
            tracing::warn!(%page, error = %err, "invalid tutorial registry; showing nothing");
            StepList::empty()
        })
    }
}

impl StepSource for AdaptiveSteps {
    fn label(&self) -> &'static str {
        "tutorial"
    }

    fn steps(&self) -> StepList {
        self.steps_for(self.state.active_page)
    }

    fn unmet_requirement(&self, step: &Step) -> Option<StateFlag> {
        step.required_state.filter(|flag| !self.state.is_set(*flag))
    }
}

/// A guided tour bound to a host.
pub struct TourEngine<S: StepSource, H: OverlayHost> {
    source: S,
    session: TourSession,
    tracker: GeometryTracker,
    listener: Option<ListenerId>,
    mounted: bool,
    host: H,
}

/// The fixed onboarding tour.
pub type OnboardingTour<H> = TourEngine<FixedSteps, H>;

/// The page-scoped teaching-mode tutorial.
pub type AdaptiveTutorial<H> = TourEngine<AdaptiveSteps, H>;

impl<S: StepSource, H: OverlayHost> std::fmt::Debug for TourEngine<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourEngine")
            .field("source", &self.source.label())
            .field("session", &self.session)
            .field("listener", &self.listener)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<S: StepSource, H: OverlayHost> TourEngine<S, H> {
    /// A mounted, closed engine.
    ///
    /// An invalid `config` is replaced by the defaults with a warning, so
    /// placement never sees a negative or non-finite length.
    pub fn new(source: S, config: TourConfig, host: H) -> Self {
        let problems = config.validate();
        let config = if problems.is_empty() {
            config
        } else {
            tracing::warn!(
                tour = source.label(),
                ?problems,
                "invalid tour config; using defaults"
            );
            TourConfig::default()
        };
        let session = TourSession::new(source.steps());
        tracing::debug!(
            tour = source.label(),
            steps = session.total_steps(),
            "tour mounted"
        );
        Self {
            source,
            session,
            tracker: GeometryTracker::new(config),
            listener: None,
            mounted: true,
            host,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The config placement runs with.
    pub fn config(&self) -> &TourConfig {
        self.tracker.config()
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Open with at least one step.
    pub fn is_visible(&self) -> bool {
        self.mounted && self.session.is_visible()
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    pub fn total_steps(&self) -> usize {
        self.session.total_steps()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.session.current_step()
    }

    /// Geometry of the current step, while visible.
    pub fn geometry(&self) -> Option<TrackedGeometry> {
        if self.is_visible() {
            self.tracker.geometry()
        } else {
            None
        }
    }

    /// Whether a frame request is outstanding.
    pub fn is_polling(&self) -> bool {
        self.tracker.is_polling()
    }

    pub fn has_shortcuts(&self) -> bool {
        self.listener.is_some()
    }

    pub fn tracker_stats(&self) -> TrackerStats {
        self.tracker.stats()
    }

    /// Everything a renderer needs, or `None` when nothing should be drawn.
    pub fn snapshot(&self) -> Option<TourView<'_>> {
        if !self.is_visible() {
            return None;
        }
        let step = self.session.current_step()?;
        Some(TourView {
            step,
            index: self.session.current_index(),
            total: self.session.total_steps(),
            geometry: self.tracker.geometry()?,
            waiting_for: self.source.unmet_requirement(step),
        })
    }

    /// Show the tour from its first step. No-op when already open.
    pub fn open(&mut self) -> Option<TourEvent> {
        if !self.mounted {
            return None;
        }
        let event = self.session.open();
        self.settle(event.as_ref());
        event
    }

    /// Hide the tour. The index is kept until the next `open`.
    pub fn close(&mut self) -> Option<TourEvent> {
        let event = self.session.close();
        self.settle(event.as_ref());
        event
    }

    /// Leave the tour; same as [`close`](Self::close).
    pub fn exit(&mut self) -> Option<TourEvent> {
        self.close()
    }

    /// Close (if open) and replay from the first step.
    pub fn restart(&mut self) -> Option<TourEvent> {
        let _ = self.close();
        self.open()
    }

    /// Advance one step; closes the tour when called on the last step.
    pub fn next(&mut self) -> Option<TourEvent> {
        if !self.mounted {
            return None;
        }
        match self.session.next() {
            Some(TourEvent::ReachedEnd { last }) => {
                tracing::info!(tour = self.source.label(), last, "tour finished");
                self.close()
            }
            event => {
                self.settle(event.as_ref());
                event
            }
        }
    }

    /// Go back one step. No-op on the first step.
    pub fn previous(&mut self) -> Option<TourEvent> {
        if !self.mounted {
            return None;
        }
        let event = self.session.previous();
        self.settle(event.as_ref());
        event
    }

    /// Jump to `index`; out-of-range indices are ignored.
    pub fn goto(&mut self, index: usize) -> Option<TourEvent> {
        if !self.mounted {
            return None;
        }
        let event = self.session.goto(index);
        if event.is_none() {
            tracing::trace!(index, total = self.session.total_steps(), "goto ignored");
        }
        self.settle(event.as_ref());
        event
    }

    /// Apply a tour shortcut. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        let Some(command) = command_for(key) else {
            return false;
        };
        tracing::trace!(?command, "tour shortcut");
        match command {
            TourCommand::Close => {
                let _ = self.close();
            }
            TourCommand::Next => {
                let _ = self.next();
            }
            TourCommand::Previous => {
                let _ = self.previous();
            }
        }
        true
    }

    /// Forward a display-frame callback to the tracker.
    pub fn on_frame(&mut self, handle: FrameHandle) -> TickOutcome {
        if !self.mounted {
            return TickOutcome::Stale;
        }
        self.tracker.on_frame(handle, &mut self.host)
    }

    /// Tear down: close, detach listeners, cancel the frame loop.
    ///
    /// Every later call is a no-op. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let _ = self.session.close();
        self.mounted = false;
        self.settle(None);
        tracing::debug!(tour = self.source.label(), "tour unmounted");
    }

    /// Swap the step list from the source and restart tracking at step 0.
    fn reload_steps(&mut self) -> Option<TourEvent> {
        let event = self.session.replace_steps(self.source.steps());
        self.settle(event.as_ref());
        event
    }

    /// Bring tracker and listeners in line with the session.
    fn settle(&mut self, event: Option<&TourEvent>) {
        if let Some(event) = event {
            tracing::debug!(tour = self.source.label(), ?event, "tour event");
        }
        let visible = self.is_visible();

        match self.session.current_step() {
            Some(step) if visible => {
                if event.is_some() || !self.tracker.is_active() {
                    self.tracker.activate(step, &mut self.host);
                }
            }
            _ => self.tracker.deactivate(&mut self.host),
        }

        match (visible, self.listener) {
            (true, None) => {
                let id = self.host.attach_shortcuts();
                tracing::trace!(?id, "shortcuts attached");
                self.listener = Some(id);
            }
            (false, Some(id)) => {
                self.host.detach_shortcuts(id);
                tracing::trace!(?id, "shortcuts detached");
                self.listener = None;
            }
            _ => {}
        }
    }
}

impl<H: OverlayHost> TourEngine<FixedSteps, H> {
    /// An onboarding tour over a static list.
    pub fn onboarding(
        steps: &'static [Step],
        config: TourConfig,
        host: H,
    ) -> Result<Self, RegistryError> {
        Ok(Self::new(FixedSteps::new(steps)?, config, host))
    }
}

impl<H: OverlayHost> TourEngine<AdaptiveSteps, H> {
    /// A teaching-mode tutorial starting from `state`.
    pub fn adaptive(registry: PageRegistry, state: AppState, config: TourConfig, host: H) -> Self {
        Self::new(AdaptiveSteps::new(registry, state), config, host)
    }

    /// Latest application state received.
    pub fn app_state(&self) -> &AppState {
        self.source.state()
    }

    /// Take a new application state.
    ///
    /// A page change swaps the step list, resets to the first step and
    /// re-measures. Other changes only affect the waiting hint.
    pub fn receive_app_state(&mut self, state: AppState) -> Option<TourEvent> {
        if self.source.state == state {
            return None;
        }
        let page_changed = self.source.state.active_page != state.active_page;
        tracing::debug!(
            page = %state.active_page,
            page_changed,
            "app state received"
        );
        self.source.state = state;
        if page_changed {
            self.reload_steps()
        } else {
            None
        }
    }

    /// The current step's milestone if it is not reached yet.
    pub fn pending_requirement(&self) -> Option<StateFlag> {
        let step = self.session.current_step()?;
        self.source.unmet_requirement(step)
    }
}

impl<S: StepSource, H: OverlayHost> Drop for TourEngine<S, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
