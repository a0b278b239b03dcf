#![forbid(unsafe_code)]

//! Splitting and placing rectangles along one axis.
//!
//! - [`Constraint`] - size policies (Fixed, Percentage, Ratio, Weight, FitContent)
//! - [`Flex`] - divides a rect into rows or columns
//! - [`place`] - single-axis placement of one item, used by overlays
//!
//! # Intrinsic Sizing
//!
//! `FitContent` items need the widget's natural size. Callers supply it via
//! [`Flex::split_with_measurer`] or the `natural` argument of [`place`]:
//!
//! ```
//! use modtui_core::geometry::Rect;
//! use modtui_layout::{Constraint, Flex, LayoutSizeHint};
//!
//! let flex = Flex::horizontal()
//!     .constraints([Constraint::FitContent, Constraint::Weight(1)]);
//!
//! let rects = flex.split_with_measurer(Rect::from_size(40, 1), |idx, _available| match idx {
//!     0 => LayoutSizeHint::exact(6),
//!     _ => LayoutSizeHint::ZERO,
//! });
//! assert_eq!(rects[0].width, 6);
//! assert_eq!(rects[1].width, 34);
//! ```

use std::cmp::min;

use modtui_core::geometry::Rect;

/// A size policy for one axis of a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// This many cells.
    Fixed(u16),
    /// A percentage of the available space (0.0 - 100.0).
    Percentage(f32),
    /// A fraction of the available space (numerator, denominator).
    Ratio(u32, u32),
    /// A proportional share of the space left after non-flexible items.
    Weight(u16),
    /// The widget's natural size along this axis.
    FitContent,
}

impl Constraint {
    /// Fill all available space.
    pub const FULL: Self = Self::Percentage(100.0);

    /// Whether this is the "size to natural content" policy.
    #[inline]
    pub const fn is_fit_content(&self) -> bool {
        matches!(self, Self::FitContent)
    }

    /// Whether this item competes for leftover space in a [`Flex`].
    #[inline]
    pub const fn is_flexible(&self) -> bool {
        matches!(self, Self::Weight(_))
    }

    /// Resolve this policy for a single item on its own.
    ///
    /// `natural` is the widget's measured size on this axis. The result never
    /// exceeds `available`. A lone weighted item takes everything.
    pub fn resolve(&self, available: u16, natural: u16) -> u16 {
        let size = match *self {
            Self::Fixed(size) => size,
            Self::Percentage(p) => percent_of(available, p),
            Self::Ratio(n, d) => {
                let scaled = u64::from(available) * u64::from(n) / u64::from(d.max(1));
                scaled.min(u64::from(u16::MAX)) as u16
            }
            Self::Weight(_) => available,
            Self::FitContent => natural,
        };
        min(size, available)
    }
}

fn percent_of(available: u16, p: f32) -> u16 {
    let p = if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 };
    (f32::from(available) * p / 100.0).round() as u16
}

/// What a measurer reports for one item along the split axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSizeHint {
    /// Below this the item is clipped.
    pub min: u16,
    /// The item's natural length.
    pub preferred: u16,
}

impl LayoutSizeHint {
    pub const ZERO: Self = Self {
        min: 0,
        preferred: 0,
    };

    /// `min` and `preferred` both set to `size`.
    #[inline]
    pub const fn exact(size: u16) -> Self {
        Self {
            min: size,
            preferred: size,
        }
    }
}

/// Axis along which a [`Flex`] splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Alignment of an item within the space it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Left or top.
    #[default]
    Start,
    Center,
    /// Right or bottom.
    End,
}

impl Alignment {
    /// Offset of an item of length `len` inside a span of length `available`.
    #[inline]
    pub const fn offset(self, available: u16, len: u16) -> u16 {
        let slack = available.saturating_sub(len);
        match self {
            Self::Start => 0,
            Self::Center => slack / 2,
            Self::End => slack,
        }
    }
}

/// Place one item along an axis: resolve its length, then align it.
///
/// Returns `(start, len)` in absolute coordinates.
pub fn place(
    start: u16,
    available: u16,
    constraint: Constraint,
    alignment: Alignment,
    natural: u16,
) -> (u16, u16) {
    let len = constraint.resolve(available, natural);
    (start.saturating_add(alignment.offset(available, len)), len)
}

/// Splits a rect into consecutive rows or columns, one per constraint.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    gap: u16,
}

impl Flex {
    /// Rows, top to bottom.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Columns, left to right.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Blank cells between neighbouring items.
    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Number of constraints (and therefore output rects).
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Split the given area. `FitContent` items get zero size.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        self.split_with_measurer(area, |_, _| LayoutSizeHint::ZERO)
    }

    /// Split the given area, asking `measurer(index, remaining)` for the
    /// natural size of `FitContent` items.
    pub fn split_with_measurer<F>(&self, area: Rect, measurer: F) -> Vec<Rect>
    where
        F: Fn(usize, u16) -> LayoutSizeHint,
    {
        if self.constraints.is_empty() {
            return Vec::new();
        }

        let total = match self.direction {
            Direction::Vertical => area.height,
            Direction::Horizontal => area.width,
        };
        let gaps = self
            .gap
            .saturating_mul(u16::try_from(self.constraints.len() - 1).unwrap_or(u16::MAX));
        let available = total.saturating_sub(gaps);
        let sizes = solve_constraints(&self.constraints, available, &measurer);

        let mut rects = Vec::with_capacity(sizes.len());
        let mut cursor = match self.direction {
            Direction::Vertical => area.y,
            Direction::Horizontal => area.x,
        };
        for size in sizes {
            let rect = match self.direction {
                Direction::Vertical => Rect::new(area.x, cursor, area.width, size),
                Direction::Horizontal => Rect::new(cursor, area.y, size, area.height),
            };
            rects.push(rect);
            cursor = cursor.saturating_add(size).saturating_add(self.gap);
        }
        rects
    }
}

/// Two-pass solver: rigid items first, then weighted items share what's left.
fn solve_constraints<F>(constraints: &[Constraint], available: u16, measurer: &F) -> Vec<u16>
where
    F: Fn(usize, u16) -> LayoutSizeHint,
{
    let mut sizes = vec![0u16; constraints.len()];
    let mut remaining = available;
    let mut grow_indices = Vec::new();

    for (i, constraint) in constraints.iter().enumerate() {
        if constraint.is_flexible() {
            grow_indices.push(i);
            continue;
        }
        let natural = if constraint.is_fit_content() {
            measurer(i, remaining).preferred
        } else {
            0
        };
        let size = min(constraint.resolve(available, natural), remaining);
        sizes[i] = size;
        remaining -= size;
    }

    let total_weight: u64 = grow_indices
        .iter()
        .map(|&i| weight_of(constraints[i]))
        .sum::<u64>()
        .max(1);
    let space = remaining;
    let mut allocated = 0u16;
    for (idx, &i) in grow_indices.iter().enumerate() {
        // last one absorbs the rounding remainder
        let size = if idx == grow_indices.len() - 1 {
            space - allocated
        } else {
            let share = u64::from(space) * weight_of(constraints[i]) / total_weight;
            min(share as u16, space - allocated)
        };
        sizes[i] = size;
        allocated += size;
    }

    sizes
}

fn weight_of(constraint: Constraint) -> u64 {
    match constraint {
        Constraint::Weight(w) => u64::from(w),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_to_available() {
        assert_eq!(Constraint::Fixed(50).resolve(20, 0), 20);
        assert_eq!(Constraint::FitContent.resolve(20, 30), 20);
        assert_eq!(Constraint::FitContent.resolve(20, 7), 7);
    }

    #[test]
    fn resolve_percentage_and_ratio() {
        assert_eq!(Constraint::Percentage(50.0).resolve(80, 0), 40);
        assert_eq!(Constraint::FULL.resolve(80, 3), 80);
        assert_eq!(Constraint::Ratio(1, 4).resolve(80, 0), 20);
        assert_eq!(Constraint::Ratio(1, 0).resolve(80, 0), 80);
    }

    #[test]
    fn resolve_bad_percentage_is_zero() {
        assert_eq!(Constraint::Percentage(f32::NAN).resolve(80, 0), 0);
        assert_eq!(Constraint::Percentage(-5.0).resolve(80, 0), 0);
        assert_eq!(Constraint::Percentage(500.0).resolve(80, 0), 80);
    }

    #[test]
    fn lone_weight_takes_everything() {
        assert_eq!(Constraint::Weight(1).resolve(33, 2), 33);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Alignment::Start.offset(10, 4), 0);
        assert_eq!(Alignment::Center.offset(10, 4), 3);
        assert_eq!(Alignment::End.offset(10, 4), 6);
        assert_eq!(Alignment::Center.offset(4, 10), 0);
    }

    #[test]
    fn place_centers_fit_content() {
        assert_eq!(
            place(5, 20, Constraint::FitContent, Alignment::Center, 10),
            (10, 10)
        );
    }

    #[test]
    fn equal_weights_split_evenly() {
        let rects = Flex::horizontal()
            .constraints([Constraint::Weight(1); 3])
            .split(Rect::from_size(30, 1));
        let widths: Vec<u16> = rects.iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![10, 10, 10]);
        assert_eq!(rects[2].x, 20);
    }

    #[test]
    fn weights_are_proportional() {
        let rects = Flex::vertical()
            .constraints([Constraint::Weight(1), Constraint::Weight(3)])
            .split(Rect::from_size(1, 40));
        assert_eq!(rects[0].height, 10);
        assert_eq!(rects[1].height, 30);
        assert_eq!(rects[1].y, 10);
    }

    #[test]
    fn rigid_items_are_allocated_first() {
        let rects = Flex::vertical()
            .constraints([Constraint::Weight(1), Constraint::Fixed(1), Constraint::Fixed(1)])
            .split(Rect::from_size(10, 10));
        let heights: Vec<u16> = rects.iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![8, 1, 1]);
    }

    #[test]
    fn gap_is_reserved_between_items() {
        let rects = Flex::horizontal()
            .gap(2)
            .constraints([Constraint::Weight(1), Constraint::Weight(1)])
            .split(Rect::from_size(12, 1));
        assert_eq!(rects[0].width, 5);
        assert_eq!(rects[1].x, 7);
        assert_eq!(rects[1].width, 5);
    }

    #[test]
    fn empty_flex_yields_no_rects() {
        assert!(Flex::vertical().split(Rect::from_size(10, 10)).is_empty());
    }

    #[test]
    fn zero_weights_still_cover_space() {
        let rects = Flex::horizontal()
            .constraints([Constraint::Weight(0), Constraint::Weight(0)])
            .split(Rect::from_size(10, 1));
        assert_eq!(rects[0].width + rects[1].width, 10);
    }
}
