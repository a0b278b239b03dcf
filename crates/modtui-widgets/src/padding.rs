#![forbid(unsafe_code)]

//! Horizontal padding: aligns one child within the width it is given.

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Size};
use modtui_layout::{Alignment, Constraint, place};

use crate::Widget;
use crate::tree::{WidgetId, WidgetTree};

/// Container that sizes its slot child with `width` and aligns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    align: Alignment,
    width: Constraint,
}

impl Padding {
    /// Create padding with the given alignment and width policy.
    pub const fn new(align: Alignment, width: Constraint) -> Self {
        Self { align, width }
    }

    /// Insert a padding container around `child`.
    pub fn wrap(
        tree: &mut WidgetTree,
        child: WidgetId,
        align: Alignment,
        width: Constraint,
    ) -> WidgetId {
        tree.insert_container(Self::new(align, width), Some(child))
    }

    /// Where the child sits inside `area`.
    #[must_use]
    pub fn child_area(&self, tree: &WidgetTree, child: WidgetId, area: Rect) -> Rect {
        let natural = tree.measure(child, area.size());
        let (x, width) = place(area.x, area.width, self.width, self.align, natural.width);
        Rect::new(x, area.y, width, area.height)
    }
}

impl Widget for Padding {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        let Ok(Some(child)) = tree.child(id) else {
            return false;
        };
        let inner = self.child_area(tree, child, area);
        if let Some((x, y)) = event.mouse_position() {
            if !inner.contains(x, y) {
                return false;
            }
        }
        tree.user_input_if_selectable(child, event, inner, focus)
    }

    fn selectable(&self, tree: &WidgetTree, id: WidgetId) -> bool {
        matches!(tree.child(id), Ok(Some(child)) if tree.selectable(child))
    }

    fn measure(&self, tree: &WidgetTree, id: WidgetId, available: Size) -> Size {
        match tree.child(id) {
            Ok(Some(child)) => tree.measure(child, available),
            _ => Size::ZERO,
        }
    }
}
