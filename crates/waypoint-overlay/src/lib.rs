#![forbid(unsafe_code)]

//! Overlay: what an open tour looks like.
//!
//! # Role in Waypoint
//! `waypoint-overlay` turns a [`TourView`](waypoint_core::TourView) into an
//! [`OverlayScene`] (scrim, cut-out, card), routes pointer events through
//! it with [`OverlayScene::hit_test`], and can rasterize it into a
//! [`CellGrid`] for terminal previews and layout tests.
//!
//! Nothing here owns state; every function is pure.

pub mod grid;
pub mod hit;
pub mod scene;
pub mod text;

pub use grid::{Cell, CellContent, CellGrid, CellMetrics, Layer};
pub use hit::PointerDisposition;
pub use scene::{Card, Cutout, OverlayScene, OverlayStyle, ProgressDot};
