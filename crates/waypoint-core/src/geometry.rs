#![forbid(unsafe_code)]

//! Geometric primitives in host screen space.
//!
//! Coordinates are CSS-style pixels: origin at the top-left of the
//! viewport, `x` grows right, `y` grows down. Values are `f64` because
//! hosts report sub-pixel layout.

/// An element's on-screen bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Check if the box has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the box.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Grow the box by `amount` on every side.
    ///
    /// Negative amounts shrink it; width and height never go below zero.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> BoundingBox {
        BoundingBox {
            left: self.left - amount,
            top: self.top - amount,
            width: (self.width + amount * 2.0).max(0.0),
            height: (self.height + amount * 2.0).max(0.0),
        }
    }

    /// Bit-level equality on all four edges.
    ///
    /// Unlike `==` this treats two NaNs with the same payload as equal and
    /// distinguishes `0.0` from `-0.0`, so it answers "did the host report
    /// exactly the same numbers".
    #[inline]
    pub fn bit_eq(&self, other: &BoundingBox) -> bool {
        self.left.to_bits() == other.left.to_bits()
            && self.top.to_bits() == other.top.to_bits()
            && self.width.to_bits() == other.width.to_bits()
            && self.height.to_bits() == other.height.to_bits()
    }

    /// Intersection with another box, `None` if they don't overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(BoundingBox::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

/// Width and height of a floating element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible viewport of the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as a box anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Bit-level equality, see [`BoundingBox::bit_eq`].
    #[inline]
    pub fn bit_eq(&self, other: &Viewport) -> bool {
        self.width.to_bits() == other.width.to_bits()
            && self.height.to_bits() == other.height.to_bits()
    }
}
