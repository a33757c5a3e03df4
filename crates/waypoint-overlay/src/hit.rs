#![forbid(unsafe_code)]

//! Pointer routing for an overlay scene.

use crate::scene::OverlayScene;

/// Where a pointer event at a given point should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDisposition {
    /// Deliver to the page underneath (interactive cut-out).
    PassThrough,
    /// Deliver to the card.
    Card,
    /// Swallowed by the scrim.
    Blocked,
}

impl OverlayScene {
    /// Route a pointer event at viewport coordinates `(x, y)`.
    ///
    /// The card sits above everything; an interactive cut-out lets events
    /// through; the scrim swallows the rest, including points outside the
    /// viewport.
    pub fn hit_test(&self, x: f64, y: f64) -> PointerDisposition {
        if self.card.rect.contains(x, y) {
            return PointerDisposition::Card;
        }
        match self.cutout {
            Some(cutout) if cutout.pass_through && cutout.rect.contains(x, y) => {
                PointerDisposition::PassThrough
            }
            _ => PointerDisposition::Blocked,
        }
    }
}
