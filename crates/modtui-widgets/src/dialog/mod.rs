#![forbid(unsafe_code)]

//! Modal dialogs.
//!
//! A [`Dialog`] is a framed body (caller content, a divider and a row of
//! buttons) that can be spliced over the child of any container node. While
//! open it captures all input; closing puts the container's original child
//! back, by id, exactly as it was.
//!
//! ```
//! use modtui_layout::Constraint;
//! use modtui_widgets::text::Text;
//! use modtui_widgets::{ButtonSpec, Dialog, DialogOptions, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let app = tree.insert(Text::new("main screen"));
//! tree.set_child(tree.root(), Some(app)).unwrap();
//!
//! let message = tree.insert(Text::new("Save changes?"));
//! let options = DialogOptions::new().with_buttons(ButtonSpec::ok_cancel());
//! let dialog = Dialog::build(&mut tree, message, options);
//!
//! dialog.open_globally(&mut tree, Constraint::FitContent).unwrap();
//! assert!(dialog.is_open(&tree));
//! dialog.close(&mut tree).unwrap();
//! assert_eq!(tree.child(tree.root()), Ok(Some(app)));
//! ```

mod content;
mod maximizer;
mod splice;

pub use content::DialogContent;
pub use maximizer::Maximizer;
pub use splice::DialogId;

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Sides, Size};
use modtui_layout::Constraint;

use crate::Widget;
use crate::callbacks::{CallbackId, Callbacks};
use crate::style::{self, Style};
use crate::tree::{Action, WidgetId, WidgetTree};

/// Observable dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DialogEvent {
    /// The open flag changed.
    OpenClose,
    /// The saved child was assigned.
    SavedChild,
    /// The saved container was assigned.
    SavedContainer,
}

/// One button of the dialog's button row.
#[derive(Clone)]
pub struct ButtonSpec {
    label: String,
    action: Option<Action>,
}

impl fmt::Debug for ButtonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSpec")
            .field("label", &self.label)
            .field("action", &self.action.as_ref().map(|_| "<action>"))
            .finish()
    }
}

impl ButtonSpec {
    /// A button that closes its dialog.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }

    /// Run `action` on click instead of closing.
    #[must_use]
    pub fn with_action(mut self, action: impl Fn(&mut WidgetTree) + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The click action, `None` meaning "close the dialog".
    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// "Quit": asks the application to stop.
    pub fn quit() -> Self {
        Self::new("Quit").with_action(WidgetTree::request_quit)
    }

    /// "Exit": asks the application to stop.
    pub fn exit() -> Self {
        Self::new("Exit").with_action(WidgetTree::request_quit)
    }

    /// "Close": closes the dialog.
    pub fn close() -> Self {
        Self::new("Close")
    }

    /// "Cancel": closes the dialog.
    pub fn cancel() -> Self {
        Self::new("Cancel")
    }

    /// "Ok" (quits) and "Cancel".
    pub fn ok_cancel() -> Vec<Self> {
        vec![
            Self::new("Ok").with_action(WidgetTree::request_quit),
            Self::cancel(),
        ]
    }

    /// "Exit" and "Cancel".
    pub fn exit_cancel() -> Vec<Self> {
        vec![Self::exit(), Self::cancel()]
    }

    /// A lone "Close".
    pub fn close_only() -> Vec<Self> {
        vec![Self::close()]
    }

    /// No button row at all.
    pub fn no_buttons() -> Vec<Self> {
        Vec::new()
    }
}

/// Construction options. Immutable once the dialog is built.
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    buttons: Vec<ButtonSpec>,
    no_shadow: bool,
    no_escape_close: bool,
    button_style: Option<Style>,
    background_style: Option<Style>,
}

impl DialogOptions {
    /// No buttons, shadow on, Escape closes, default palette.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = ButtonSpec>) -> Self {
        self.buttons = buttons.into_iter().collect();
        self
    }

    /// Drop the one-cell shadow.
    #[must_use]
    pub fn no_shadow(mut self) -> Self {
        self.no_shadow = true;
        self
    }

    /// Let Escape and Ctrl+C reach the body instead of closing.
    #[must_use]
    pub fn no_escape_close(mut self) -> Self {
        self.no_escape_close = true;
        self
    }

    /// Style of the focused button.
    #[must_use]
    pub fn button_style(mut self, style: Style) -> Self {
        self.button_style = Some(style);
        self
    }

    /// Style of the dialog background. Also used for the frame when set.
    #[must_use]
    pub fn background_style(mut self, style: Style) -> Self {
        self.background_style = Some(style);
        self
    }

    #[must_use]
    pub fn buttons(&self) -> &[ButtonSpec] {
        &self.buttons
    }

    #[must_use]
    pub const fn shadow(&self) -> bool {
        !self.no_shadow
    }

    #[must_use]
    pub const fn escape_closes(&self) -> bool {
        !self.no_escape_close
    }

    #[must_use]
    pub fn resolved_button_style(&self) -> Style {
        self.button_style.unwrap_or_else(style::default_button_style)
    }

    #[must_use]
    pub fn resolved_background_style(&self) -> Style {
        self.background_style
            .unwrap_or_else(style::default_background_style)
    }

    #[must_use]
    pub fn resolved_border_style(&self) -> Style {
        self.background_style
            .unwrap_or_else(style::default_border_style)
    }
}

const BORDER: Sides = Sides::all(1);
const SHADOW: Sides = Sides::new(0, 1, 1, 0);

/// Open flag, splice bookkeeping and observers of one dialog.
///
/// Attached to the dialog's node so that [`DialogId`] can read and update it
/// while the dialog widget itself is out handling input.
pub(crate) struct DialogState {
    self_id: Rc<OnceCell<WidgetId>>,
    body: WidgetId,
    open: Cell<bool>,
    saved_child: Cell<Option<WidgetId>>,
    saved_container: Cell<Option<WidgetId>>,
    overlay: Cell<Option<WidgetId>>,
    callbacks: RefCell<Callbacks<DialogEvent>>,
}

impl DialogState {
    fn new(self_id: Rc<OnceCell<WidgetId>>, body: WidgetId) -> Self {
        Self {
            self_id,
            body,
            open: Cell::new(false),
            saved_child: Cell::new(None),
            saved_container: Cell::new(None),
            overlay: Cell::new(None),
            callbacks: RefCell::new(Callbacks::new()),
        }
    }

    pub(crate) fn body(&self) -> WidgetId {
        self.body
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.get()
    }

    pub(crate) fn saved_child(&self) -> Option<WidgetId> {
        self.saved_child.get()
    }

    pub(crate) fn saved_container(&self) -> Option<WidgetId> {
        self.saved_container.get()
    }

    /// The overlay node inserted by the last open.
    pub(crate) fn overlay(&self) -> Option<WidgetId> {
        self.overlay.get()
    }

    pub(crate) fn set_overlay(&self, overlay: Option<WidgetId>) {
        self.overlay.set(overlay);
    }

    pub(crate) fn set_open(&self, open: bool) {
        if self.open.replace(open) != open {
            self.fire(DialogEvent::OpenClose);
        }
    }

    pub(crate) fn set_saved_child(&self, child: Option<WidgetId>) {
        self.saved_child.set(child);
        self.fire(DialogEvent::SavedChild);
    }

    pub(crate) fn set_saved_container(&self, container: Option<WidgetId>) {
        self.saved_container.set(container);
        self.fire(DialogEvent::SavedContainer);
    }

    pub(crate) fn no_function(&self) -> Action {
        splice::close_action(Rc::clone(&self.self_id))
    }

    fn fire(&self, event: DialogEvent) {
        let Some(&id) = self.self_id.get() else {
            return;
        };
        let listeners = self.callbacks.borrow().listeners(event);
        for callback in listeners {
            callback(id);
        }
    }
}

/// The dialog widget.
///
/// Holds the body subtree built at construction. The open flag and the splice
/// bookkeeping needed to undo an open live in state attached to the dialog's
/// node. Use the [`DialogId`] returned by [`Dialog::build`] to open and close
/// it.
pub struct Dialog {
    content: DialogContent,
    options: DialogOptions,
    state: Rc<DialogState>,
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.state.self_id.get())
            .field("content", &self.content)
            .field("open", &self.is_open())
            .field("saved_child", &self.saved_child())
            .field("saved_container", &self.saved_container())
            .field("callbacks", &self.state.callbacks.borrow())
            .finish()
    }
}

impl Dialog {
    /// Build the body around `content` and insert the dialog into `tree`.
    pub fn build(tree: &mut WidgetTree, content: WidgetId, options: DialogOptions) -> DialogId {
        let self_id = Rc::new(OnceCell::new());
        let content = DialogContent::build(tree, content, &options, &self_id);
        let state = Rc::new(DialogState::new(Rc::clone(&self_id), content.body));
        let dialog = Self {
            content,
            options,
            state: Rc::clone(&state),
        };
        let id = tree.insert_with_state(dialog, state);
        if self_id.set(id).is_err() {
            unreachable!("dialog id cell filled before insertion");
        }
        DialogId::new(id)
    }

    /// Ids of the body parts.
    #[must_use]
    pub fn content(&self) -> &DialogContent {
        &self.content
    }

    #[must_use]
    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The child the open replaced. `None` while closed.
    #[must_use]
    pub fn saved_child(&self) -> Option<WidgetId> {
        self.state.saved_child()
    }

    /// The container the dialog is spliced into. `None` while closed.
    #[must_use]
    pub fn saved_container(&self) -> Option<WidgetId> {
        self.state.saved_container()
    }

    /// Whether Escape and Ctrl+C close the dialog.
    #[must_use]
    pub const fn escape_closes(&self) -> bool {
        self.options.escape_closes()
    }

    /// The action run on cancel: close this dialog.
    #[must_use]
    pub fn no_function(&self) -> Action {
        self.state.no_function()
    }

    /// Set the open flag. Observers fire only on a change.
    pub fn set_open(&mut self, open: bool) {
        self.state.set_open(open);
    }

    pub fn set_saved_child(&mut self, child: Option<WidgetId>) {
        self.state.set_saved_child(child);
    }

    pub fn set_saved_container(&mut self, container: Option<WidgetId>) {
        self.state.set_saved_container(container);
    }

    pub fn on_open_close(
        &mut self,
        id: impl Into<CallbackId>,
        callback: impl Fn(WidgetId) + 'static,
    ) {
        self.add_callback(DialogEvent::OpenClose, id.into(), callback);
    }

    pub fn remove_on_open_close(&mut self, id: impl Into<CallbackId>) -> bool {
        self.remove_callback(DialogEvent::OpenClose, &id.into())
    }

    pub fn on_saved_child(
        &mut self,
        id: impl Into<CallbackId>,
        callback: impl Fn(WidgetId) + 'static,
    ) {
        self.add_callback(DialogEvent::SavedChild, id.into(), callback);
    }

    pub fn remove_on_saved_child(&mut self, id: impl Into<CallbackId>) -> bool {
        self.remove_callback(DialogEvent::SavedChild, &id.into())
    }

    pub fn on_saved_container(
        &mut self,
        id: impl Into<CallbackId>,
        callback: impl Fn(WidgetId) + 'static,
    ) {
        self.add_callback(DialogEvent::SavedContainer, id.into(), callback);
    }

    pub fn remove_on_saved_container(&mut self, id: impl Into<CallbackId>) -> bool {
        self.remove_callback(DialogEvent::SavedContainer, &id.into())
    }

    fn add_callback(
        &self,
        event: DialogEvent,
        id: CallbackId,
        callback: impl Fn(WidgetId) + 'static,
    ) {
        self.state.callbacks.borrow_mut().add(event, id, callback);
    }

    fn remove_callback(&self, event: DialogEvent, id: &CallbackId) -> bool {
        self.state.callbacks.borrow_mut().remove(event, id)
    }

    /// Cells taken by the border and, if enabled, the shadow.
    #[must_use]
    pub fn frame(&self) -> Sides {
        if self.options.shadow() {
            BORDER.add(SHADOW)
        } else {
            BORDER
        }
    }

    /// Area left for the body inside the frame.
    #[must_use]
    pub fn body_area(&self, area: Rect) -> Rect {
        area.inner(self.frame())
    }
}

impl Widget for Dialog {
    fn user_input(
        &mut self,
        tree: &mut WidgetTree,
        _id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        let body = self.content.body;
        let body_area = self.body_area(area);
        if !self.is_open() {
            return tree.user_input_if_selectable(body, event, body_area, focus);
        }
        if event.is_cancel() && self.escape_closes() {
            tree.defer(self.no_function());
        } else {
            tree.user_input_if_selectable(body, event, body_area, focus);
        }
        true
    }

    fn selectable(&self, tree: &WidgetTree, _id: WidgetId) -> bool {
        self.is_open() || tree.selectable(self.content.body)
    }

    fn measure(&self, tree: &WidgetTree, _id: WidgetId, available: Size) -> Size {
        let frame = self.frame();
        let inner = Size::new(
            available.width.saturating_sub(frame.horizontal_sum()),
            available.height.saturating_sub(frame.vertical_sum()),
        );
        tree.measure(self.content.body, inner).expand(frame)
    }

    fn children(&self) -> Vec<WidgetId> {
        vec![self.content.body]
    }
}

/// Size policy of the content row for a dialog opened with `width`.
pub(crate) fn content_sizing_for(width: Constraint) -> Constraint {
    if width.is_fit_content() {
        Constraint::FitContent
    } else {
        Constraint::Weight(1)
    }
}
