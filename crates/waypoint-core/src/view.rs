#![forbid(unsafe_code)]

//! Read-only view of an open tour, handed to renderers.

use crate::app_state::StateFlag;
use crate::placement::TrackedGeometry;
use crate::step::Step;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourView<'a> {
    pub step: &'a Step,
    pub index: usize,
    pub total: usize,
    pub geometry: TrackedGeometry,
    /// Milestone the step talks about that the host has not reached yet.
    pub waiting_for: Option<StateFlag>,
}

impl TourView<'_> {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }
}
