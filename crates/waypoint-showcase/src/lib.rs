#![forbid(unsafe_code)]

//! Waypoint showcase: the chemometrics workspace tours, plus a replay CLI
//! that drives them against a simulated workspace and prints the overlay.
//!
//! - [`registry`]: onboarding steps and one tutorial per page.
//! - [`dom`]: [`SimulatedApp`](dom::SimulatedApp), the workspace layout and
//!   its published app state.
//! - [`script`], [`replay`], [`journal`]: scripted runs, rendered snapshots
//!   and a JSONL record of each action.

pub mod cli;
pub mod dom;
pub mod error;
pub mod journal;
pub mod logging;
pub mod registry;
pub mod replay;
pub mod script;

pub use cli::{Cli, run, run_from_env};
pub use error::{Result, ShowcaseError};
pub use replay::{ReplayOptions, ReplaySummary, TourKind, replay};
