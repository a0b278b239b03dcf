#![forbid(unsafe_code)]

//! Opening and closing dialogs.
//!
//! Opening splices an [`Overlay`] into a container's child slot with the
//! dialog on top and the previous child underneath. The dialog remembers the
//! container and the previous child, and closing writes that child back and
//! drops the overlay node.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use modtui_core::{debug, warn};
use modtui_layout::Constraint;

use super::{Dialog, DialogContent, DialogState, content_sizing_for};
use crate::overlay::Overlay;
use crate::stack::Stack;
use crate::tree::{Action, TreeError, WidgetId, WidgetTree};

/// Handle to a dialog living in a [`WidgetTree`].
///
/// Every operation takes the tree explicitly. Structural problems (unknown
/// ids, a container with an empty slot) come back as [`TreeError`]; misuse of
/// the open/close protocol panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DialogId(WidgetId);

impl From<DialogId> for WidgetId {
    fn from(dialog: DialogId) -> Self {
        dialog.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog {}", self.0)
    }
}

impl DialogId {
    pub(crate) const fn new(id: WidgetId) -> Self {
        Self(id)
    }

    /// The dialog's node id.
    #[must_use]
    pub const fn id(self) -> WidgetId {
        self.0
    }

    pub fn dialog(self, tree: &WidgetTree) -> Result<&Dialog, TreeError> {
        tree.get::<Dialog>(self.0)
    }

    pub fn dialog_mut(self, tree: &mut WidgetTree) -> Result<&mut Dialog, TreeError> {
        tree.get_mut::<Dialog>(self.0)
    }

    pub(crate) fn state(self, tree: &WidgetTree) -> Result<Rc<DialogState>, TreeError> {
        tree.state::<DialogState>(self.0)
    }

    /// Whether the dialog is open. Also answers while the dialog is handling
    /// input; `false` only for ids that are not dialogs.
    #[must_use]
    pub fn is_open(self, tree: &WidgetTree) -> bool {
        self.state(tree).is_ok_and(|state| state.is_open())
    }

    /// Open over `container`'s child with a natural height.
    pub fn open(
        self,
        tree: &mut WidgetTree,
        container: WidgetId,
        width: Constraint,
    ) -> Result<(), TreeError> {
        self.open_ext(tree, container, width, Constraint::FitContent)
    }

    /// Open over the tree's root slot.
    pub fn open_globally(self, tree: &mut WidgetTree, width: Constraint) -> Result<(), TreeError> {
        let root = tree.root();
        self.open(tree, root, width)
    }

    /// Open over `container`'s child with explicit width and height policies.
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Panics
    ///
    /// If the dialog is already open.
    pub fn open_ext(
        self,
        tree: &mut WidgetTree,
        container: WidgetId,
        width: Constraint,
        height: Constraint,
    ) -> Result<(), TreeError> {
        let state = self.state(tree)?;
        if state.is_open() {
            warn!(dialog = self.0.get(), "open called on an open dialog");
            panic!("{self} is already open");
        }
        let prior = tree.child(container)?.ok_or(TreeError::EmptySlot(container))?;

        tree.get_mut::<Stack>(state.body())?
            .set_sizing(DialogContent::CONTENT_ROW, content_sizing_for(width));
        let overlay = tree.insert(Overlay::centered(self.0, prior, width, height));

        state.set_saved_child(Some(prior));
        state.set_saved_container(Some(container));
        state.set_overlay(Some(overlay));
        tree.set_child(container, Some(overlay))?;
        state.set_open(true);

        debug!(
            dialog = self.0.get(),
            container = container.get(),
            overlay = overlay.get(),
            "dialog_open"
        );
        Ok(())
    }

    /// Put the saved child back into the saved container and drop the overlay.
    ///
    /// # Panics
    ///
    /// If the dialog has no saved splice point, i.e. it was not opened with
    /// [`open`](Self::open) or one of its variants.
    pub fn close(self, tree: &mut WidgetTree) -> Result<(), TreeError> {
        let state = self.state(tree)?;
        let (Some(container), Some(child)) = (state.saved_container(), state.saved_child())
        else {
            warn!(dialog = self.0.get(), "close called without a saved splice point");
            panic!("{self} has no saved splice point");
        };

        let displaced = tree.set_child(container, Some(child))?;
        state.set_saved_child(None);
        state.set_saved_container(None);
        state.set_open(false);

        // Only drop the overlay if the slot still held ours.
        let overlay = state.overlay();
        state.set_overlay(None);
        if let Some(overlay) = overlay.filter(|&overlay| displaced == Some(overlay)) {
            tree.remove(overlay);
        }

        debug!(
            dialog = self.0.get(),
            container = container.get(),
            "dialog_close"
        );
        Ok(())
    }

    /// Set the open flag without splicing.
    pub fn set_open(self, tree: &mut WidgetTree, open: bool) -> Result<(), TreeError> {
        self.state(tree)?.set_open(open);
        Ok(())
    }

    /// Close action for this dialog, as run by Escape and default buttons.
    pub fn no_function(self, tree: &WidgetTree) -> Result<Action, TreeError> {
        Ok(self.state(tree)?.no_function())
    }

    /// Width policy of the open dialog.
    ///
    /// # Panics
    ///
    /// If the dialog is closed or its container no longer holds its overlay.
    #[must_use]
    pub fn width(self, tree: &WidgetTree) -> Constraint {
        self.overlay(tree).width()
    }

    /// # Panics
    ///
    /// As [`width`](Self::width).
    pub fn set_width(self, tree: &mut WidgetTree, width: Constraint) {
        self.overlay_mut(tree).set_width(width);
    }

    /// Height policy of the open dialog.
    ///
    /// # Panics
    ///
    /// As [`width`](Self::width).
    #[must_use]
    pub fn height(self, tree: &WidgetTree) -> Constraint {
        self.overlay(tree).height()
    }

    /// # Panics
    ///
    /// As [`width`](Self::width).
    pub fn set_height(self, tree: &mut WidgetTree, height: Constraint) {
        self.overlay_mut(tree).set_height(height);
    }

    /// Set the size policy of the content row inside the body.
    pub fn set_content_width(self, tree: &mut WidgetTree, sizing: Constraint) -> Result<(), TreeError> {
        let body = self.state(tree)?.body();
        tree.get_mut::<Stack>(body)?
            .set_sizing(DialogContent::CONTENT_ROW, sizing);
        Ok(())
    }

    /// Size policy of the content row.
    #[must_use]
    pub fn content_width(self, tree: &WidgetTree) -> Option<Constraint> {
        let body = self.state(tree).ok()?.body();
        tree.get::<Stack>(body).ok()?.sizing(DialogContent::CONTENT_ROW)
    }

    fn overlay_id(self, tree: &WidgetTree) -> WidgetId {
        let container = match self.state(tree) {
            Ok(state) => state.saved_container(),
            Err(err) => panic!("{self}: {err}"),
        };
        let Some(container) = container else {
            warn!(dialog = self.0.get(), "size accessor used on a closed dialog");
            panic!("{self} is not open");
        };
        match tree.child(container) {
            Ok(Some(overlay)) if tree.get::<Overlay>(overlay).is_ok() => overlay,
            _ => {
                warn!(dialog = self.0.get(), "container no longer holds the overlay");
                panic!("container {container} of {self} does not hold an overlay");
            }
        }
    }

    fn overlay(self, tree: &WidgetTree) -> &Overlay {
        let id = self.overlay_id(tree);
        match tree.get::<Overlay>(id) {
            Ok(overlay) => overlay,
            Err(err) => panic!("{self}: {err}"),
        }
    }

    fn overlay_mut(self, tree: &mut WidgetTree) -> &mut Overlay {
        let id = self.overlay_id(tree);
        match tree.get_mut::<Overlay>(id) {
            Ok(overlay) => overlay,
            Err(err) => panic!("{self}: {err}"),
        }
    }
}

/// Close the dialog whose id is in `dialog`, if it is open.
///
/// Escape and a click can both queue a close in one batch; the second one
/// finds the dialog closed and does nothing.
pub(crate) fn close_action(dialog: Rc<OnceCell<WidgetId>>) -> Action {
    Rc::new(move |tree: &mut WidgetTree| {
        let Some(&id) = dialog.get() else {
            warn!("close action ran before its dialog was built");
            return;
        };
        let dialog = DialogId::new(id);
        if !dialog.is_open(tree) {
            warn!(dialog = id.get(), "close action on a closed dialog ignored");
            return;
        }
        if dialog.close(tree).is_err() {
            warn!(dialog = id.get(), "close action failed");
        }
    })
}
