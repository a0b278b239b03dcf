#![forbid(unsafe_code)]

//! Cell-grid geometry: rectangles, sizes and per-side margins.
//!
//! All arithmetic saturates at the `u16` bounds instead of wrapping.

/// An area of the terminal grid. `(x, y)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at `(0, 0)`.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// No cells at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether cell `(x, y)` lies inside.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `margin` on each side. Over-large margins leave an empty rect.
    #[must_use]
    pub const fn inner(&self, margin: Sides) -> Self {
        Self::new(
            self.x.saturating_add(margin.left),
            self.y.saturating_add(margin.top),
            self.width.saturating_sub(margin.horizontal_sum()),
            self.height.saturating_sub(margin.vertical_sum()),
        )
    }
}

/// Width and height in cells; what widgets report as their natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Grow by `sides`; the inverse of [`Rect::inner`].
    #[inline]
    #[must_use]
    pub const fn expand(self, sides: Sides) -> Self {
        Self::new(
            self.width.saturating_add(sides.horizontal_sum()),
            self.height.saturating_add(sides.vertical_sum()),
        )
    }

    /// Limit each dimension to `max`.
    #[inline]
    #[must_use]
    pub fn clamp_max(self, max: Size) -> Self {
        Self::new(self.width.min(max.width), self.height.min(max.height))
    }
}

/// Per-side thickness of a border, shadow or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    /// The same thickness everywhere.
    pub const fn all(n: u16) -> Self {
        Self::new(n, n, n, n)
    }

    /// Clockwise from the top, CSS order.
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// `left + right`.
    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// `top + bottom`.
    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Stack two margins, e.g. a border plus a shadow.
    #[must_use]
    pub const fn add(self, other: Sides) -> Self {
        Self::new(
            self.top.saturating_add(other.top),
            self.right.saturating_add(other.right),
            self.bottom.saturating_add(other.bottom),
            self.left.saturating_add(other.left),
        )
    }
}
