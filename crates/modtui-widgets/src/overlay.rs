#![forbid(unsafe_code)]

//! Two-layer compositing widget.
//!
//! The bottom layer fills the whole area. The top layer is sized with its own
//! width and height policies and aligned on each axis. Input is offered to
//! the top layer first.

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Size};
use modtui_layout::{Alignment, Constraint, place};

use crate::Widget;
use crate::tree::{WidgetId, WidgetTree};

/// A positioned top widget over a full-size bottom widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    top: WidgetId,
    bottom: WidgetId,
    h_align: Alignment,
    width: Constraint,
    v_align: Alignment,
    height: Constraint,
}

impl Overlay {
    pub const fn new(
        top: WidgetId,
        bottom: WidgetId,
        h_align: Alignment,
        width: Constraint,
        v_align: Alignment,
        height: Constraint,
    ) -> Self {
        Self {
            top,
            bottom,
            h_align,
            width,
            v_align,
            height,
        }
    }

    /// An overlay with the top layer centered on both axes.
    pub const fn centered(
        top: WidgetId,
        bottom: WidgetId,
        width: Constraint,
        height: Constraint,
    ) -> Self {
        Self::new(top, bottom, Alignment::Center, width, Alignment::Center, height)
    }

    #[must_use]
    pub const fn top(&self) -> WidgetId {
        self.top
    }

    #[must_use]
    pub const fn bottom(&self) -> WidgetId {
        self.bottom
    }

    #[must_use]
    pub const fn h_align(&self) -> Alignment {
        self.h_align
    }

    #[must_use]
    pub const fn v_align(&self) -> Alignment {
        self.v_align
    }

    #[must_use]
    pub const fn width(&self) -> Constraint {
        self.width
    }

    pub fn set_width(&mut self, width: Constraint) {
        self.width = width;
    }

    #[must_use]
    pub const fn height(&self) -> Constraint {
        self.height
    }

    pub fn set_height(&mut self, height: Constraint) {
        self.height = height;
    }

    /// Where the top layer is placed within `area`.
    #[must_use]
    pub fn top_area(&self, tree: &WidgetTree, area: Rect) -> Rect {
        let natural = tree.measure(self.top, area.size());
        let (x, width) = place(area.x, area.width, self.width, self.h_align, natural.width);
        let (y, height) = place(area.y, area.height, self.height, self.v_align, natural.height);
        Rect::new(x, y, width, height)
    }

    /// Paint order: bottom first, then top in its placed area.
    #[must_use]
    pub fn layers(&self, tree: &WidgetTree, area: Rect) -> [(WidgetId, Rect); 2] {
        [(self.bottom, area), (self.top, self.top_area(tree, area))]
    }
}

impl Widget for Overlay {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        _id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        let top_area = self.top_area(tree, area);
        let top_selectable = tree.selectable(self.top);
        if top_selectable && tree.user_input(self.top, event, top_area, focus) {
            return true;
        }
        tree.user_input_if_selectable(self.bottom, event, area, focus && !top_selectable)
    }

    fn selectable(&self, tree: &WidgetTree, _id: WidgetId) -> bool {
        tree.selectable(self.top) || tree.selectable(self.bottom)
    }

    fn measure(&self, tree: &WidgetTree, _id: WidgetId, available: Size) -> Size {
        tree.measure(self.bottom, available)
    }

    fn children(&self) -> Vec<WidgetId> {
        vec![self.bottom, self.top]
    }
}
