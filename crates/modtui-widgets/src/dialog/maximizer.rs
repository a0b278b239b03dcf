#![forbid(unsafe_code)]

//! Toggle an open dialog between its own size and the full area.

use modtui_layout::Constraint;

use super::DialogId;
use crate::tree::WidgetTree;

/// Remembers a dialog's size policies while it is maximized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Maximizer {
    saved: Option<(Constraint, Constraint)>,
}

impl Maximizer {
    pub const fn new() -> Self {
        Self { saved: None }
    }

    #[must_use]
    pub const fn is_maxed(&self) -> bool {
        self.saved.is_some()
    }

    /// Saved `(width, height)` while maximized.
    #[must_use]
    pub const fn saved(&self) -> Option<(Constraint, Constraint)> {
        self.saved
    }

    /// Grow the dialog to the whole area. Returns false if already maximized.
    ///
    /// # Panics
    ///
    /// If the dialog is not open.
    pub fn maximize(&mut self, tree: &mut WidgetTree, dialog: DialogId) -> bool {
        if self.saved.is_some() {
            return false;
        }
        self.saved = Some((dialog.width(tree), dialog.height(tree)));
        dialog.set_width(tree, Constraint::FULL);
        dialog.set_height(tree, Constraint::FULL);
        true
    }

    /// Restore the saved policies. Returns false if not maximized.
    ///
    /// # Panics
    ///
    /// If the dialog is not open.
    pub fn unmaximize(&mut self, tree: &mut WidgetTree, dialog: DialogId) -> bool {
        let Some((width, height)) = self.saved else {
            return false;
        };
        dialog.set_width(tree, width);
        dialog.set_height(tree, height);
        self.saved = None;
        true
    }
}
