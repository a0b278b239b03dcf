//! Property-based invariants for the flex solver and single-axis placement.
//!
//! 1. Allocated sizes never exceed the available space.
//! 2. With at least one weighted item the space is covered exactly.
//! 3. Rects are laid out in order without overlap.
//! 4. `place` keeps the item inside its span.

use modtui_core::geometry::Rect;
use modtui_layout::{Alignment, Constraint, Flex, LayoutSizeHint, place};
use proptest::prelude::*;

fn constraint_strategy() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        (0u16..=200).prop_map(Constraint::Fixed),
        (0.0f32..=100.0).prop_map(Constraint::Percentage),
        (0u32..=8, 1u32..=8).prop_map(|(n, d)| Constraint::Ratio(n, d)),
        (0u16..=5).prop_map(Constraint::Weight),
        Just(Constraint::FitContent),
    ]
}

fn alignment_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Start),
        Just(Alignment::Center),
        Just(Alignment::End),
    ]
}

proptest! {
    #[test]
    fn total_never_exceeds_available(
        constraints in prop::collection::vec(constraint_strategy(), 1..8),
        width in 0u16..=400,
        natural in 0u16..=100,
    ) {
        let rects = Flex::horizontal()
            .constraints(constraints)
            .split_with_measurer(Rect::from_size(width, 1), |_, _| LayoutSizeHint::exact(natural));
        let total: u32 = rects.iter().map(|r| u32::from(r.width)).sum();
        prop_assert!(total <= u32::from(width), "total {} > {}", total, width);
    }

    #[test]
    fn weighted_layouts_cover_space(
        mut constraints in prop::collection::vec(constraint_strategy(), 0..6),
        height in 0u16..=400,
    ) {
        constraints.push(Constraint::Weight(1));
        let rects = Flex::vertical()
            .constraints(constraints)
            .split(Rect::from_size(1, height));
        let total: u32 = rects.iter().map(|r| u32::from(r.height)).sum();
        prop_assert_eq!(total, u32::from(height));
    }

    #[test]
    fn rects_are_ordered_and_disjoint(
        constraints in prop::collection::vec(constraint_strategy(), 1..8),
        width in 0u16..=400,
        gap in 0u16..=3,
    ) {
        let rects = Flex::horizontal()
            .gap(gap)
            .constraints(constraints)
            .split(Rect::new(3, 0, width, 1));
        for pair in rects.windows(2) {
            prop_assert!(pair[0].right() <= pair[1].x);
        }
    }

    #[test]
    fn place_stays_in_span(
        start in 0u16..=1000,
        available in 0u16..=1000,
        constraint in constraint_strategy(),
        alignment in alignment_strategy(),
        natural in 0u16..=2000,
    ) {
        let (pos, len) = place(start, available, constraint, alignment, natural);
        prop_assert!(len <= available);
        prop_assert!(pos >= start);
        prop_assert!(u32::from(pos) + u32::from(len) <= u32::from(start) + u32::from(available));
    }
}
