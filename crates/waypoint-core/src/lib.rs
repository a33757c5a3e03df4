#![forbid(unsafe_code)]

//! Core: steps, the tour session state machine, placement geometry and
//! input mapping.
//!
//! # Role in Waypoint
//! `waypoint-core` holds everything about a guided tour that can be stated
//! without a host: the step data model, the open/indexed session, where the
//! explanation card goes for a given target box, and which keys drive the
//! tour. It has no I/O and no clock.
//!
//! # How it fits in the system
//! `waypoint-runtime` wires these pieces to a host UI (element lookup, frame
//! callbacks, key listeners). `waypoint-overlay` turns a session plus
//! [`placement::TrackedGeometry`] into a drawable scene.

pub mod app_state;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod placement;
pub mod session;
pub mod step;
pub mod view;

pub use app_state::{AppState, Page, StateFlag, UnknownPage, UnknownStateFlag};
pub use config::{ScrollBehavior, TourConfig};
pub use error::{ConfigError, RegistryError};
pub use geometry::{BoundingBox, Size, Viewport};
pub use input::{KeyCode, KeyEvent, KeyEventKind, Modifiers, TourCommand};
pub use placement::{CardPlacement, TrackedGeometry};
pub use session::{AdvanceReason, TourEvent, TourSession};
pub use step::{Anchor, Step, StepList, TargetRef};
pub use view::TourView;
