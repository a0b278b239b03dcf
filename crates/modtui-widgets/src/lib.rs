#![forbid(unsafe_code)]

//! Retained widget tree, overlays and modal dialogs.
//!
//! Widgets are stored in a [`WidgetTree`] arena and refer to each other by
//! [`WidgetId`]. The [`dialog`] module splices a floating dialog over any
//! container's child, captures input while it is open, and restores the
//! original child on close.

pub mod button;
pub mod callbacks;
pub mod dialog;
pub mod overlay;
pub mod padding;
pub mod rule;
pub mod slot;
pub mod stack;
pub mod style;
pub mod text;
pub mod tree;

pub use dialog::{ButtonSpec, Dialog, DialogContent, DialogEvent, DialogId, DialogOptions, Maximizer};
pub use tree::{Action, TreeError, WidgetId, WidgetTree};

use std::any::Any;

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Size};

/// Downcasting support for boxed widgets. Implemented for every `'static` type.
pub trait AsAny {
    /// Borrow as `Any`.
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A node behaviour in the retained tree.
///
/// Widgets don't paint; an external renderer walks the tree using
/// [`WidgetTree::children`] and the placement helpers of each widget. What a
/// widget owns is input handling, focusability and its natural size.
pub trait Widget: AsAny + 'static {
    /// Handle an event delivered to this widget.
    ///
    /// `id` is this widget's own node, `area` the space it occupies and
    /// `focus` whether it lies on the focus path. Returns whether the event
    /// was handled.
    fn user_input(
        &mut self,
        _tree: &mut WidgetTree,
        _id: WidgetId,
        _event: &Event,
        _area: Rect,
        _focus: bool,
    ) -> bool {
        false
    }

    /// Whether this widget can take keyboard focus.
    fn selectable(&self, _tree: &WidgetTree, _id: WidgetId) -> bool {
        false
    }

    /// Natural size given the space on offer.
    fn measure(&self, tree: &WidgetTree, id: WidgetId, available: Size) -> Size;

    /// Children held by this widget (slot children are reported by the tree).
    fn children(&self) -> Vec<WidgetId> {
        Vec::new()
    }

    /// Short type name for diagnostics.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Next selectable entry of `ids` strictly after (or before) `from`.
pub(crate) fn next_selectable(
    tree: &WidgetTree,
    ids: &[WidgetId],
    from: usize,
    forward: bool,
) -> Option<usize> {
    if forward {
        (from + 1..ids.len()).find(|&i| tree.selectable(ids[i]))
    } else {
        (0..from.min(ids.len())).rev().find(|&i| tree.selectable(ids[i]))
    }
}
