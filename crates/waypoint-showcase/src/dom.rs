#![forbid(unsafe_code)]

//! A simulated chemometrics workspace for driving tours without a browser.
//!
//! [`SimulatedApp`] owns a [`RecordingHost`] laid out like the real
//! application (a fixed header and sidebar plus one content area per
//! [`Page`]) and the [`Observable<AppState>`] the real shell would publish.
//! Navigation swaps the content elements before publishing the new page,
//! the same order a UI framework commits its tree before running effects.

use tracing::debug;

use waypoint_core::app_state::{AppState, Page, StateFlag};
use waypoint_core::geometry::{BoundingBox, Viewport};
use waypoint_runtime::observable::Observable;
use waypoint_runtime::testing::RecordingHost;

type Layout = &'static [(&'static str, BoundingBox)];

/// Viewport the layouts are designed for.
pub const DESIGN_VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

/// Session id reported once data is loaded.
pub const DEMO_SESSION: &str = "demo-session";

static SHELL: Layout = &[
    ("#app-header", BoundingBox::new(0.0, 0.0, 1280.0, 64.0)),
    ("#session-badge", BoundingBox::new(880.0, 16.0, 170.0, 32.0)),
    ("#teaching-toggle", BoundingBox::new(1070.0, 16.0, 190.0, 32.0)),
    ("#nav-sidebar", BoundingBox::new(0.0, 64.0, 220.0, 736.0)),
    ("#nav-upload", BoundingBox::new(12.0, 84.0, 196.0, 36.0)),
    ("#assistant-button", BoundingBox::new(1200.0, 720.0, 56.0, 56.0)),
];

static UPLOAD: Layout = &[
    ("#upload-dropzone", BoundingBox::new(260.0, 96.0, 640.0, 220.0)),
    ("#load-example", BoundingBox::new(920.0, 96.0, 200.0, 40.0)),
    ("#column-table", BoundingBox::new(260.0, 360.0, 980.0, 420.0)),
];

static PREPROCESSING: Layout = &[
    ("#column-picker", BoundingBox::new(260.0, 96.0, 300.0, 400.0)),
    ("#nan-strategy", BoundingBox::new(600.0, 96.0, 260.0, 40.0)),
    ("#standardize-toggle", BoundingBox::new(600.0, 160.0, 260.0, 40.0)),
    ("#run-preprocessing", BoundingBox::new(600.0, 540.0, 140.0, 40.0)),
];

static PCA: Layout = &[
    ("#pca-components", BoundingBox::new(260.0, 96.0, 200.0, 40.0)),
    ("#run-pca", BoundingBox::new(480.0, 96.0, 140.0, 40.0)),
    ("#scree-plot", BoundingBox::new(660.0, 96.0, 580.0, 300.0)),
    ("#scores-plot", BoundingBox::new(660.0, 420.0, 580.0, 360.0)),
    ("#loadings-plot", BoundingBox::new(260.0, 900.0, 980.0, 360.0)),
];

static CLUSTERING: Layout = &[
    ("#cluster-method", BoundingBox::new(260.0, 96.0, 260.0, 40.0)),
    ("#cluster-use-pca", BoundingBox::new(260.0, 156.0, 260.0, 32.0)),
    ("#run-clustering", BoundingBox::new(260.0, 220.0, 140.0, 40.0)),
    ("#silhouette-chart", BoundingBox::new(620.0, 96.0, 620.0, 400.0)),
];

static CLASSIFIER: Layout = &[
    ("#classifier-target", BoundingBox::new(260.0, 96.0, 260.0, 40.0)),
    ("#classifier-model", BoundingBox::new(260.0, 156.0, 260.0, 40.0)),
    ("#train-classifier", BoundingBox::new(260.0, 220.0, 140.0, 40.0)),
    ("#confusion-matrix", BoundingBox::new(700.0, 96.0, 420.0, 420.0)),
];

static SIMILARITY: Layout = &[
    ("#similarity-sample", BoundingBox::new(260.0, 96.0, 260.0, 40.0)),
    ("#similarity-metric", BoundingBox::new(260.0, 156.0, 260.0, 40.0)),
    ("#similarity-results", BoundingBox::new(260.0, 480.0, 980.0, 300.0)),
];

static REPORT: Layout = &[
    ("#report-sections", BoundingBox::new(260.0, 96.0, 400.0, 360.0)),
    ("#export-report", BoundingBox::new(260.0, 700.0, 180.0, 44.0)),
];

/// Content elements rendered for `page`.
pub fn page_layout(page: Page) -> Layout {
    match page {
        Page::Upload => UPLOAD,
        Page::Preprocessing => PREPROCESSING,
        Page::Pca => PCA,
        Page::Clustering => CLUSTERING,
        Page::Classifier => CLASSIFIER,
        Page::Similarity => SIMILARITY,
        Page::Report => REPORT,
    }
}

/// The workspace shell: element tree plus published app state.
#[derive(Debug)]
pub struct SimulatedApp {
    host: RecordingHost,
    state: Observable<AppState>,
    scroll_y: f64,
}

impl SimulatedApp {
    pub fn new(viewport: Viewport, page: Page) -> Self {
        let app = Self {
            host: RecordingHost::new(viewport),
            state: Observable::new(AppState::default().on_page(page)),
            scroll_y: 0.0,
        };
        app.lay_out();
        app
    }

    /// Host handle to give to a tour; clones share this app's tree.
    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    pub fn state(&self) -> &Observable<AppState> {
        &self.state
    }

    pub fn page(&self) -> Page {
        self.state.with(|state| state.active_page)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Swap the content area to `page`, then publish the page change.
    pub fn navigate(&mut self, page: Page) {
        debug!(%page, "navigate");
        self.scroll_y = 0.0;
        self.lay_out_page(page);
        self.state.update(|state| state.active_page = page);
    }

    /// Mark a milestone as reached. Loading data also opens a session.
    pub fn complete(&self, flag: StateFlag) {
        debug!(%flag, "milestone reached");
        self.state.update(|state| {
            *state = state.clone().with_flag(flag, true);
            if flag == StateFlag::DataLoaded && state.session_id.is_none() {
                state.session_id = Some(DEMO_SESSION.to_owned());
            }
        });
    }

    /// Scroll the content area by `dy` pixels; the shell stays put.
    pub fn scroll_by(&mut self, dy: f64) {
        if !dy.is_finite() {
            return;
        }
        self.scroll_y = (self.scroll_y + dy).max(0.0);
        debug!(scroll_y = self.scroll_y, "scroll");
        self.lay_out();
    }

    pub fn resize(&self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "resize");
        self.host.set_viewport(viewport);
    }

    fn lay_out(&self) {
        self.lay_out_page(self.page());
    }

    fn lay_out_page(&self, page: Page) {
        self.host.clear();
        for &(selector, rect) in SHELL {
            self.host.place(selector, rect);
        }
        for &(selector, rect) in page_layout(page) {
            self.host.place(
                selector,
                BoundingBox::new(rect.left, rect.top - self.scroll_y, rect.width, rect.height),
            );
        }
    }
}
