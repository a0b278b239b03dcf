#![forbid(unsafe_code)]

//! Linear containers: `Pile` (vertical) and `Columns` (horizontal).
//!
//! Both are a [`Stack`] of items with a per-item size policy along the main
//! axis. The stack tracks which item has focus, forwards keyboard input to
//! it, and moves focus with the arrow keys when the item leaves a key
//! unhandled. Mouse events go to the item under the pointer.

use modtui_core::event::{Event, KeyCode, MouseEventKind};
use modtui_core::geometry::{Rect, Size};
use modtui_layout::{Constraint, Direction, Flex, LayoutSizeHint};

use crate::tree::{WidgetId, WidgetTree};
use crate::{Widget, next_selectable};

/// One entry of a stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackItem {
    pub widget: WidgetId,
    /// Main-axis size policy.
    pub sizing: Constraint,
}

impl StackItem {
    pub const fn new(widget: WidgetId, sizing: Constraint) -> Self {
        Self { widget, sizing }
    }
}

/// A vertical or horizontal run of widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    direction: Direction,
    items: Vec<StackItem>,
    focus: usize,
}

impl Stack {
    /// A vertical stack; Up/Down move focus.
    pub fn pile(items: impl IntoIterator<Item = StackItem>) -> Self {
        Self::new(Direction::Vertical, items)
    }

    /// A horizontal stack; Left/Right and Tab/BackTab move focus.
    pub fn columns(items: impl IntoIterator<Item = StackItem>) -> Self {
        Self::new(Direction::Horizontal, items)
    }

    pub fn new(direction: Direction, items: impl IntoIterator<Item = StackItem>) -> Self {
        Self {
            direction,
            items: items.into_iter().collect(),
            focus: 0,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Size policy of item `idx`.
    #[must_use]
    pub fn sizing(&self, idx: usize) -> Option<Constraint> {
        self.items.get(idx).map(|item| item.sizing)
    }

    /// Replace the size policy of item `idx`. Returns false if out of range.
    pub fn set_sizing(&mut self, idx: usize, sizing: Constraint) -> bool {
        match self.items.get_mut(idx) {
            Some(item) => {
                item.sizing = sizing;
                true
            }
            None => false,
        }
    }

    /// The focused item, falling back to the first selectable one.
    #[must_use]
    pub fn focus(&self, tree: &WidgetTree) -> Option<usize> {
        let ids = self.ids();
        match ids.get(self.focus) {
            Some(&id) if tree.selectable(id) => Some(self.focus),
            _ => ids.iter().position(|&id| tree.selectable(id)),
        }
    }

    /// Move focus to item `idx`. Returns false if out of range.
    pub fn set_focus(&mut self, idx: usize) -> bool {
        if idx < self.items.len() {
            self.focus = idx;
            true
        } else {
            false
        }
    }

    /// Areas of each item within `area`.
    #[must_use]
    pub fn layout(&self, tree: &WidgetTree, area: Rect) -> Vec<Rect> {
        let flex = Flex::vertical()
            .direction(self.direction)
            .constraints(self.items.iter().map(|item| item.sizing));
        flex.split_with_measurer(area, |idx, remaining| {
            let widget = self.items[idx].widget;
            let natural = match self.direction {
                Direction::Vertical => tree.measure(widget, Size::new(area.width, remaining)).height,
                Direction::Horizontal => tree.measure(widget, Size::new(remaining, area.height)).width,
            };
            LayoutSizeHint::exact(natural)
        })
    }

    fn ids(&self) -> Vec<WidgetId> {
        self.items.iter().map(|item| item.widget).collect()
    }

    fn navigation(&self, code: KeyCode) -> Option<bool> {
        match (self.direction, code) {
            (Direction::Vertical, KeyCode::Up) => Some(false),
            (Direction::Vertical, KeyCode::Down) => Some(true),
            (Direction::Horizontal, KeyCode::Left | KeyCode::BackTab) => Some(false),
            (Direction::Horizontal, KeyCode::Right | KeyCode::Tab) => Some(true),
            _ => None,
        }
    }

    fn mouse_input(
        &mut self,
        tree: &mut WidgetTree,
        event: &Event,
        rects: &[Rect],
        (x, y): (u16, u16),
        focus: bool,
    ) -> bool {
        let Some(idx) = rects.iter().position(|rect| rect.contains(x, y)) else {
            return false;
        };
        let widget = self.items[idx].widget;
        if !tree.selectable(widget) {
            return false;
        }
        if matches!(event, Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_))) {
            self.focus = idx;
        }
        tree.user_input(widget, event, rects[idx], focus)
    }
}

impl Widget for Stack {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        _id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        let rects = self.layout(tree, area);
        if let Some(position) = event.mouse_position() {
            return self.mouse_input(tree, event, &rects, position, focus);
        }

        let Some(current) = self.focus(tree) else {
            return false;
        };
        self.focus = current;
        if tree.user_input(self.items[current].widget, event, rects[current], focus) {
            return true;
        }

        let Some(forward) = event.key_press().and_then(|key| self.navigation(key.code)) else {
            return false;
        };
        match next_selectable(tree, &self.ids(), current, forward) {
            Some(next) => {
                self.focus = next;
                true
            }
            None => false,
        }
    }

    fn selectable(&self, tree: &WidgetTree, _id: WidgetId) -> bool {
        self.items.iter().any(|item| tree.selectable(item.widget))
    }

    fn measure(&self, tree: &WidgetTree, _id: WidgetId, available: Size) -> Size {
        let mut along: u16 = 0;
        let mut across: u16 = 0;
        for item in &self.items {
            let natural = tree.measure(item.widget, available);
            let (main, cross) = match self.direction {
                Direction::Vertical => (natural.height, natural.width),
                Direction::Horizontal => (natural.width, natural.height),
            };
            let main = match item.sizing {
                Constraint::Fixed(n) => n,
                _ => main,
            };
            along = along.saturating_add(main);
            across = across.max(cross);
        }
        match self.direction {
            Direction::Vertical => Size::new(across, along),
            Direction::Horizontal => Size::new(along, across),
        }
    }

    fn children(&self) -> Vec<WidgetId> {
        self.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use crate::text::Text;
    use crate::tree::Action;
    use modtui_core::event::{MouseButton, MouseEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Action {
        let log = Rc::clone(log);
        Rc::new(move |_tree: &mut WidgetTree| log.borrow_mut().push(name))
    }

    fn buttons(tree: &mut WidgetTree, log: &Rc<RefCell<Vec<&'static str>>>) -> Vec<StackItem> {
        ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                let id = tree.insert(Button::new(name, recorder(log, name)));
                StackItem::new(id, Constraint::Weight(1))
            })
            .collect()
    }

    #[test]
    fn columns_tab_moves_focus() {
        let mut tree = WidgetTree::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let items = buttons(&mut tree, &log);
        let row = tree.insert(Stack::columns(items));
        let area = Rect::new(0, 0, 30, 1);

        assert!(tree.user_input(row, &Event::key(KeyCode::Tab), area, true));
        assert!(tree.user_input(row, &Event::key(KeyCode::Enter), area, true));
        assert!(tree.user_input(row, &Event::key(KeyCode::Right), area, true));
        assert!(tree.user_input(row, &Event::key(KeyCode::Enter), area, true));
        // Already at the last item.
        assert!(!tree.user_input(row, &Event::key(KeyCode::Right), area, true));
        assert!(tree.user_input(row, &Event::key(KeyCode::BackTab), area, true));
        assert!(tree.user_input(row, &Event::key(KeyCode::Enter), area, true));
        assert_eq!(*log.borrow(), vec!["b", "c", "b"]);
    }

    #[test]
    fn pile_skips_unselectable_items() {
        let mut tree = WidgetTree::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let label = tree.insert(Text::new("title"));
        let ok = tree.insert(Button::new("ok", recorder(&log, "ok")));
        let pile = tree.insert(Stack::pile([
            StackItem::new(label, Constraint::Fixed(1)),
            StackItem::new(ok, Constraint::Fixed(1)),
        ]));
        let area = Rect::new(0, 0, 10, 2);

        assert_eq!(tree.get::<Stack>(pile).unwrap().focus(&tree), Some(1));
        assert!(tree.user_input(pile, &Event::key(KeyCode::Enter), area, true));
        assert!(!tree.user_input(pile, &Event::key(KeyCode::Up), area, true));
        assert_eq!(*log.borrow(), vec!["ok"]);
    }

    #[test]
    fn mouse_routes_by_split() {
        let mut tree = WidgetTree::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let items = buttons(&mut tree, &log);
        let row = tree.insert(Stack::columns(items));
        let area = Rect::new(0, 0, 30, 1);

        let click = |x| Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, 0));
        assert!(tree.user_input(row, &click(25), area, true));
        assert!(tree.user_input(row, &click(2), area, true));
        assert_eq!(*log.borrow(), vec!["c", "a"]);
        assert_eq!(tree.get::<Stack>(row).unwrap().focus(&tree), Some(0));
    }

    #[test]
    fn measure_sums_main_axis() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("abc"));
        let b = tree.insert(Text::new("abcdef\nxy"));
        let pile = tree.insert(Stack::pile([
            StackItem::new(a, Constraint::Weight(1)),
            StackItem::new(b, Constraint::FitContent),
        ]));
        assert_eq!(tree.measure(pile, Size::new(80, 24)), Size::new(6, 3));
        assert_eq!(tree.children(pile), vec![a, b]);
    }

    #[test]
    fn sizing_accessors() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        let mut pile = Stack::pile([StackItem::new(a, Constraint::Weight(1))]);
        assert_eq!(pile.sizing(0), Some(Constraint::Weight(1)));
        assert!(pile.set_sizing(0, Constraint::FitContent));
        assert_eq!(pile.sizing(0), Some(Constraint::FitContent));
        assert!(!pile.set_sizing(3, Constraint::FitContent));
        assert_eq!(pile.sizing(3), None);
    }
}
