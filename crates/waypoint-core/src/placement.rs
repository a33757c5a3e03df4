#![forbid(unsafe_code)]

//! Card placement around a target box, clamped to the viewport.
//!
//! # Invariants
//!
//! 1. When the viewport can hold the card plus margins, the placed card is
//!    fully inside `[margin, viewport - size - margin]` on both axes.
//! 2. When it cannot, the lower bound (`margin`) wins.
//! 3. Without a target the card is centered, whatever the step's anchor.
//! 4. Placement is a pure function of its inputs.

use crate::config::TourConfig;
use crate::geometry::{BoundingBox, Size, Viewport};
use crate::step::Anchor;

/// Where the card ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Anchor actually used (`Center` when there was no target).
    pub anchor: Anchor,
}

impl CardPlacement {
    /// The card as a box.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.left, self.top, self.width, self.height)
    }
}

/// Derived geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedGeometry {
    pub viewport: Viewport,
    /// Measured target box, `None` when the target is absent or unresolved.
    pub target: Option<BoundingBox>,
    /// Target inflated by the highlight padding: the scrim cut-out.
    pub highlight: Option<BoundingBox>,
    pub card: CardPlacement,
}

impl TrackedGeometry {
    /// Compute geometry for a measured (or missing) target.
    pub fn compute(
        target: Option<BoundingBox>,
        anchor: Anchor,
        viewport: Viewport,
        config: &TourConfig,
    ) -> Self {
        let card = place_card(target, anchor, config.card_size(), config.margin, viewport);
        Self {
            viewport,
            target,
            highlight: target.map(|t| t.inflate(config.highlight_padding)),
            card,
        }
    }
}

/// Clamp `value` into `[lo, hi]`. An empty range or NaN yields `lo`.
#[inline]
pub fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    // `!(hi >= lo)` also catches a NaN bound, which `f64::clamp` rejects.
    if value.is_nan() || !(hi >= lo) {
        return lo;
    }
    value.clamp(lo, hi)
}

/// Naive position before clamping: `(left, top, anchor_used)`.
pub fn unclamped_position(
    target: Option<BoundingBox>,
    anchor: Anchor,
    card: Size,
    margin: f64,
    viewport: Viewport,
) -> (f64, f64, Anchor) {
    let centered = (
        (viewport.width - card.width) / 2.0,
        (viewport.height - card.height) / 2.0,
        Anchor::Center,
    );
    let Some(r) = target else {
        return centered;
    };

    let beside_top = r.top + r.height / 2.0 - card.height / 2.0;
    let around_left = r.left + r.width / 2.0 - card.width / 2.0;

    match anchor {
        Anchor::Right => (r.right() + margin, beside_top, Anchor::Right),
        Anchor::Left => (r.left - card.width - margin, beside_top, Anchor::Left),
        Anchor::Top => (around_left, r.top - card.height - margin, Anchor::Top),
        Anchor::Bottom => (around_left, r.bottom() + margin, Anchor::Bottom),
        Anchor::Center => centered,
    }
}

/// Place the card next to `target` and clamp it into the viewport.
///
/// The card is narrowed to `viewport.width - 2 * margin` when the viewport
/// is too small for it; its height is kept.
pub fn place_card(
    target: Option<BoundingBox>,
    anchor: Anchor,
    card: Size,
    margin: f64,
    viewport: Viewport,
) -> CardPlacement {
    let fit_width = (viewport.width - margin * 2.0).max(0.0);
    let card = Size::new(card.width.min(fit_width), card.height);

    let (left, top, anchor) = unclamped_position(target, anchor, card, margin, viewport);
    CardPlacement {
        left: clamp_axis(left, margin, viewport.width - card.width - margin),
        top: clamp_axis(top, margin, viewport.height - card.height - margin),
        width: card.width,
        height: card.height,
        anchor,
    }
}
