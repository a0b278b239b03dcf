#![forbid(unsafe_code)]

//! Horizontal rule (divider) widget.

use modtui_core::geometry::Size;

use crate::Widget;
use crate::style::Style;
use crate::tree::{WidgetId, WidgetTree};

/// A one-row horizontal line spanning whatever width it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rule {
    style: Style,
}

impl Rule {
    /// Create an unstyled rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The line style.
    #[must_use]
    pub const fn line_style(&self) -> Style {
        self.style
    }
}

impl Widget for Rule {
    fn measure(&self, _tree: &WidgetTree, _id: WidgetId, _available: Size) -> Size {
        Size::new(0, 1)
    }
}
