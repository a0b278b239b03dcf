#![forbid(unsafe_code)]

//! Static text label.

use modtui_core::geometry::Size;
use unicode_width::UnicodeWidthStr;

use crate::Widget;
use crate::tree::{WidgetId, WidgetTree};

/// Multi-line, non-selectable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    /// Create a label.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The label text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the label text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Widget for Text {
    fn measure(&self, _tree: &WidgetTree, _id: WidgetId, _available: Size) -> Size {
        let width = self
            .content
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let height = self.content.lines().count();
        Size::new(clamp_u16(width), clamp_u16(height))
    }
}

pub(crate) fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
