#![forbid(unsafe_code)]

//! Generic single-child container.
//!
//! A `Slot` forwards everything to whatever currently occupies its child
//! slot. It is the tree's root and the usual splice point for dialogs.

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Size};

use crate::Widget;
use crate::tree::{WidgetId, WidgetTree};

/// Transparent container with one settable child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot;

impl Slot {
    /// Create a slot widget.
    pub const fn new() -> Self {
        Self
    }

    /// Insert a slot container holding `child`.
    pub fn wrap(tree: &mut WidgetTree, child: Option<WidgetId>) -> WidgetId {
        tree.insert_container(Self, child)
    }
}

impl Widget for Slot {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        match tree.child(id) {
            Ok(Some(child)) => tree.user_input_if_selectable(child, event, area, focus),
            _ => false,
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use crate::text::Text;
    use modtui_core::event::KeyCode;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn empty_slot_is_inert() {
        let mut tree = WidgetTree::new();
        let slot = Slot::wrap(&mut tree, None);
        assert!(!tree.selectable(slot));
        assert_eq!(tree.measure(slot, Size::new(10, 10)), Size::ZERO);
        let area = Rect::from_size(10, 1);
        assert!(!tree.user_input(slot, &Event::key(KeyCode::Enter), area, true));
    }

    #[test]
    fn follows_whatever_occupies_it() {
        let mut tree = WidgetTree::new();
        let pressed = Rc::new(Cell::new(false));
        let p = Rc::clone(&pressed);
        let button = tree.insert(Button::new("Go", Rc::new(move |_: &mut WidgetTree| p.set(true))));
        let label = tree.insert(Text::new("label"));
        let slot = Slot::wrap(&mut tree, Some(label));
        assert!(!tree.selectable(slot));
        assert_eq!(tree.measure(slot, Size::new(20, 1)), Size::new(5, 1));

        tree.set_child(slot, Some(button)).expect("slot accepts a child");
        assert!(tree.selectable(slot));
        let area = Rect::from_size(20, 1);
        assert!(tree.user_input(slot, &Event::key(KeyCode::Enter), area, true));
        assert!(pressed.get());
    }
}
