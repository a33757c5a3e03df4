#![forbid(unsafe_code)]

//! Scripted replay of a tour against the simulated workspace.
//!
//! A replay builds a [`SimulatedApp`], mounts the chosen tour on its host,
//! and applies [`Action`]s one by one. Tour actions go straight to the
//! engine; host actions (navigation, milestones, scrolling, resizing,
//! frames) go through the app so the tutorial sees them the way it would
//! in the browser: through the app-state bridge and the frame loop.
//!
//! Snapshots rasterize the current [`OverlayScene`] into a [`CellGrid`]
//! and print it. Every action can also be journaled as JSONL.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use tracing::{debug, debug_span, info};

use waypoint_core::app_state::Page;
use waypoint_core::config::TourConfig;
use waypoint_core::geometry::Viewport;
use waypoint_core::session::TourEvent;
use waypoint_overlay::{CellGrid, CellMetrics, Layer, OverlayScene, OverlayStyle};
use waypoint_runtime::testing::RecordingHost;
use waypoint_runtime::{
    AdaptiveTutorial, AppStateBridge, OnboardingTour, StepSource, TickOutcome, TourEngine,
};

use crate::dom::{DESIGN_VIEWPORT, SimulatedApp};
use crate::error::Result;
use crate::journal::{Journal, JournalEntry};
use crate::registry::{ONBOARDING, page_steps};
use crate::script::{Action, ONBOARDING_SCRIPT, TUTORIAL_SCRIPT};

/// Which tour to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TourKind {
    /// First-run tour of the application shell.
    #[default]
    Onboarding,
    /// Teaching-mode tutorial that follows the active page.
    Tutorial,
}

impl TourKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Tutorial => "tutorial",
        }
    }

    /// Script used when none is given.
    pub const fn default_script(self) -> &'static str {
        match self {
            Self::Onboarding => ONBOARDING_SCRIPT,
            Self::Tutorial => TUTORIAL_SCRIPT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub tour: TourKind,
    /// Page the app starts on.
    pub page: Page,
    pub viewport: Viewport,
    pub metrics: CellMetrics,
    pub config: TourConfig,
    pub style: OverlayStyle,
    /// Print snapshots; when off they are still composed and counted.
    pub render: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            tour: TourKind::default(),
            page: Page::default(),
            viewport: DESIGN_VIEWPORT,
            metrics: CellMetrics::default(),
            config: TourConfig::default(),
            style: OverlayStyle::default(),
            render: true,
        }
    }
}

/// What happened over a whole replay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub tour: &'static str,
    pub actions: usize,
    pub snapshots: usize,
    /// Open-to-closed transitions (close, exit, Esc, finishing).
    pub closes: usize,
    pub final_index: usize,
    pub visible_at_end: bool,
    pub frames_requested: u64,
    pub frames_cancelled: u64,
    pub listeners_attached: u64,
    pub listeners_detached: u64,
    pub geometry_updates: u64,
    pub target_misses: u64,
    pub app_states_forwarded: u64,
    /// Listeners or frame requests still held after unmount. Always zero
    /// unless the engine leaks.
    pub leaked: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tour: {}", self.tour)?;
        writeln!(
            f,
            "actions: {}  snapshots: {}  closes: {}",
            self.actions, self.snapshots, self.closes
        )?;
        writeln!(
            f,
            "frames: {} requested, {} cancelled  geometry updates: {}  target misses: {}",
            self.frames_requested, self.frames_cancelled, self.geometry_updates, self.target_misses
        )?;
        writeln!(
            f,
            "listeners: {} attached, {} detached  app states forwarded: {}",
            self.listeners_attached, self.listeners_detached, self.app_states_forwarded
        )?;
        write!(f, "leaked after unmount: {}", self.leaked)
    }
}

/// Run `actions` and write snapshots to `out`.
pub fn replay<W: Write, J: Write>(
    options: &ReplayOptions,
    actions: &[Action],
    out: &mut W,
    journal: Option<&mut Journal<J>>,
) -> Result<ReplaySummary> {
    info!(
        tour = options.tour.label(),
        page = %options.page,
        actions = actions.len(),
        "replay starting"
    );
    let app = SimulatedApp::new(options.viewport, options.page);
    let host = app.host().clone();
    let summary = match options.tour {
        TourKind::Onboarding => {
            let engine = OnboardingTour::onboarding(ONBOARDING, options.config.clone(), host)?;
            let tour = RefCell::new(engine);
            let mut replayer = Replayer::new(options, app, out, journal);
            replayer.drive(&tour, actions)?;
            replayer.finish(&tour)
        }
        TourKind::Tutorial => {
            let engine = AdaptiveTutorial::adaptive(
                page_steps,
                app.state().get(),
                options.config.clone(),
                host,
            );
            let tour = Rc::new(RefCell::new(engine));
            let bridge = AppStateBridge::connect(app.state(), &tour);
            let mut replayer = Replayer::new(options, app, out, journal);
            replayer.drive(&tour, actions)?;
            bridge.flush();
            let mut summary = replayer.finish(&tour);
            summary.app_states_forwarded = bridge.forwarded_count();
            summary
        }
    };
    info!(
        closes = summary.closes,
        snapshots = summary.snapshots,
        leaked = summary.leaked,
        "replay finished"
    );
    Ok(summary)
}

struct Replayer<'a, W: Write, J: Write> {
    options: &'a ReplayOptions,
    app: SimulatedApp,
    out: &'a mut W,
    journal: Option<&'a mut Journal<J>>,
    actions: usize,
    snapshots: usize,
    closes: usize,
}

impl<'a, W: Write, J: Write> Replayer<'a, W, J> {
    fn new(
        options: &'a ReplayOptions,
        app: SimulatedApp,
        out: &'a mut W,
        journal: Option<&'a mut Journal<J>>,
    ) -> Self {
        Self {
            options,
            app,
            out,
            journal,
            actions: 0,
            snapshots: 0,
            closes: 0,
        }
    }

    fn drive<S: StepSource>(
        &mut self,
        tour: &RefCell<TourEngine<S, RecordingHost>>,
        actions: &[Action],
    ) -> Result<()> {
        for (seq, action) in actions.iter().enumerate() {
            let _span = debug_span!("replay.action", seq, action = %action).entered();
            let was_open = tour.borrow().is_open();
            let outcome = self.apply(tour, *action)?;
            if was_open && !tour.borrow().is_open() {
                self.closes += 1;
            }
            self.actions += 1;
            debug!(%outcome, "applied");
            self.record(tour, action, outcome)?;
        }
        Ok(())
    }

    fn apply<S: StepSource>(
        &mut self,
        tour: &RefCell<TourEngine<S, RecordingHost>>,
        action: Action,
    ) -> Result<String> {
        let outcome = match action {
            Action::Open => describe(tour.borrow_mut().open()),
            Action::Close => describe(tour.borrow_mut().close()),
            Action::Exit => describe(tour.borrow_mut().exit()),
            Action::Restart => describe(tour.borrow_mut().restart()),
            Action::Next => describe(tour.borrow_mut().next()),
            Action::Previous => describe(tour.borrow_mut().previous()),
            Action::Goto(index) => describe(tour.borrow_mut().goto(index)),
            Action::Key(key) => {
                if tour.borrow_mut().handle_key(&key) {
                    "key handled".to_owned()
                } else {
                    "key ignored".to_owned()
                }
            }
            Action::Frame(count) => self.pump(tour, count),
            // The tour is not borrowed here, so the bridge can deliver.
            Action::Page(page) => {
                self.app.navigate(page);
                format!("navigated to {page}")
            }
            Action::Done(flag) => {
                self.app.complete(flag);
                format!("reached {flag}")
            }
            Action::Scroll(dy) => {
                self.app.scroll_by(dy);
                format!("scrolled to {}", self.app.scroll_y())
            }
            Action::Resize(viewport) => {
                self.app.resize(viewport);
                format!("viewport {}x{}", viewport.width, viewport.height)
            }
            Action::Snapshot => self.snapshot(tour)?,
        };
        Ok(outcome)
    }

    fn pump<S: StepSource>(&self, tour: &RefCell<TourEngine<S, RecordingHost>>, count: u32) -> String {
        let (mut updated, mut unchanged, mut stale, mut idle) = (0u32, 0u32, 0u32, 0u32);
        for _ in 0..count {
            let mut tick = None;
            self.app
                .host()
                .pump_frame(|frame| tick = Some(tour.borrow_mut().on_frame(frame)));
            match tick {
                Some(TickOutcome::Updated(_)) => updated += 1,
                Some(TickOutcome::Unchanged) => unchanged += 1,
                Some(TickOutcome::Stale) => stale += 1,
                None => idle += 1,
            }
        }
        format!("frames: {updated} updated, {unchanged} unchanged, {stale} stale, {idle} idle")
    }

    fn snapshot<S: StepSource>(
        &mut self,
        tour: &RefCell<TourEngine<S, RecordingHost>>,
    ) -> Result<String> {
        self.snapshots += 1;
        let number = self.snapshots;
        let engine = tour.borrow();
        let Some(scene) = OverlayScene::compose(engine.snapshot(), &self.options.style) else {
            if self.options.render {
                writeln!(self.out, "-- snapshot {number}: nothing shown --")?;
            }
            return Ok("hidden".to_owned());
        };
        let grid = CellGrid::render(&scene, self.options.metrics);
        if self.options.render {
            writeln!(
                self.out,
                "-- snapshot {number}: {} ({}) --",
                scene.card.step_id, scene.card.progress
            )?;
            writeln!(self.out, "{}", grid.to_text().trim_end_matches('\n'))?;
        }
        let highlighted = grid.count(Layer::Cutout);
        Ok(match scene.card.waiting_hint() {
            Some(hint) => format!("{}: {highlighted} cells highlighted; {hint}", scene.card.step_id),
            None => format!("{}: {highlighted} cells highlighted", scene.card.step_id),
        })
    }

    fn record<S: StepSource>(
        &mut self,
        tour: &RefCell<TourEngine<S, RecordingHost>>,
        action: &Action,
        outcome: String,
    ) -> Result<()> {
        let Some(journal) = self.journal.as_deref_mut() else {
            return Ok(());
        };
        let engine = tour.borrow();
        let view = engine.snapshot();
        let host = self.app.host();
        journal.record(JournalEntry {
            seq: 0,
            tour: self.options.tour.label().to_owned(),
            action: action.to_string(),
            outcome,
            visible: engine.is_visible(),
            step: view.map(|view| view.step.id.to_owned()),
            index: engine.current_index(),
            total: engine.total_steps(),
            waiting_for: view
                .and_then(|view| view.waiting_for)
                .map(|flag| flag.to_string()),
            frames_pending: host.pending_frames().len(),
            listeners: host.listeners().len(),
        })
    }

    fn finish<S: StepSource>(self, tour: &RefCell<TourEngine<S, RecordingHost>>) -> ReplaySummary {
        let mut engine = tour.borrow_mut();
        let final_index = engine.current_index();
        let visible_at_end = engine.is_visible();
        let stats = engine.tracker_stats();
        engine.unmount();

        let host = self.app.host();
        let (listeners_attached, listeners_detached) = host.listener_counts();
        ReplaySummary {
            tour: self.options.tour.label(),
            actions: self.actions,
            snapshots: self.snapshots,
            closes: self.closes,
            final_index,
            visible_at_end,
            frames_requested: host.frames_requested(),
            frames_cancelled: host.frames_cancelled(),
            listeners_attached,
            listeners_detached,
            geometry_updates: stats.updates,
            target_misses: stats.misses,
            app_states_forwarded: 0,
            leaked: host.listeners().len() + host.pending_frames().len(),
        }
    }
}

fn describe(event: Option<TourEvent>) -> String {
    match event {
        None => "ignored".to_owned(),
        Some(TourEvent::Opened) => "opened".to_owned(),
        Some(TourEvent::StepChanged { from, to, reason }) => {
            format!("step {from} -> {to} ({})", reason.label())
        }
        Some(TourEvent::ReachedEnd { last }) => format!("reached end at {last}"),
        Some(TourEvent::Closed { at }) => format!("closed at {at}"),
        Some(TourEvent::StepsReplaced { len }) => format!("steps replaced ({len})"),
    }
}
