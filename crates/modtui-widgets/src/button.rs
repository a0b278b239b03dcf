#![forbid(unsafe_code)]

//! Clickable button.
//!
//! A button is drawn as `< label >`. Enter, Space or a left click inside its
//! area queues the button's action on the tree.

use std::fmt;
use std::rc::Rc;

use modtui_core::event::{Event, KeyCode};
use modtui_core::geometry::{Rect, Size};
use unicode_width::UnicodeWidthStr;

use crate::Widget;
use crate::style::Style;
use crate::text::clamp_u16;
use crate::tree::{Action, WidgetId, WidgetTree};

/// Width of the `< ` and ` >` decorations.
const DECORATION_WIDTH: usize = 4;

/// A selectable button that runs an [`Action`] when activated.
pub struct Button {
    label: String,
    action: Action,
    style: Style,
    focus_style: Style,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("action", &"<action>")
            .field("style", &self.style)
            .field("focus_style", &self.focus_style)
            .finish()
    }
}

impl Button {
    /// Create a button with a label and click action.
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            style: Style::default(),
            focus_style: Style::default(),
        }
    }

    /// Style when not focused.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style when focused.
    #[must_use]
    pub fn focus_style(mut self, style: Style) -> Self {
        self.focus_style = style;
        self
    }

    /// The label text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The style matching the focus state.
    #[must_use]
    pub const fn style_for(&self, focus: bool) -> Style {
        if focus { self.focus_style } else { self.style }
    }

    /// Queue this button's action, as a click would.
    pub fn press(&self, tree: &mut WidgetTree) {
        tree.defer(Rc::clone(&self.action));
    }
}

impl Widget for Button {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        _id: WidgetId,
        event: &Event,
        area: Rect,
        _focus: bool,
    ) -> bool {
        let activate = match event {
            Event::Key(_) => event
                .key_press()
                .is_some_and(|key| matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))),
            Event::Mouse(mouse) => mouse.is_left_click() && area.contains(mouse.x, mouse.y),
            _ => false,
        };
        if activate {
            self.press(tree);
        }
        activate
    }

    fn selectable(&self, _tree: &WidgetTree, _id: WidgetId) -> bool {
        true
    }

    fn measure(&self, _tree: &WidgetTree, _id: WidgetId, _available: Size) -> Size {
        Size::new(clamp_u16(self.label.width() + DECORATION_WIDTH), 1)
    }
}
