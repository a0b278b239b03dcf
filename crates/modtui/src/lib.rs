#![forbid(unsafe_code)]

//! modtui public facade crate.
//!
//! Re-exports the event, layout and widget types needed to build a widget
//! tree and drive modal dialogs over it, plus a prelude for everyday use.
//!
//! ```
//! use modtui::prelude::*;
//!
//! let mut tree = WidgetTree::new();
//! let app = tree.insert(Text::new("editor"));
//! tree.set_child(tree.root(), Some(app))?;
//!
//! let prompt = tree.insert(Text::new("Quit without saving?"));
//! let dialog = Dialog::build(
//!     &mut tree,
//!     prompt,
//!     DialogOptions::new().with_buttons(ButtonSpec::exit_cancel()),
//! );
//! dialog.open_globally(&mut tree, Constraint::Percentage(50.0))?;
//!
//! let root = tree.root();
//! tree.user_input(root, &Event::key(KeyCode::Escape), Rect::new(0, 0, 80, 24), true);
//! assert!(!dialog.is_open(&tree));
//! # Ok::<(), modtui::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use modtui_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    PasteEvent,
};
pub use modtui_core::geometry::{Rect, Sides, Size};

// --- Layout re-exports -----------------------------------------------------

pub use modtui_layout::{Alignment, Constraint, Direction, Flex};

// --- Widget re-exports -----------------------------------------------------

pub use modtui_widgets::button::Button;
pub use modtui_widgets::callbacks::CallbackId;
pub use modtui_widgets::overlay::Overlay;
pub use modtui_widgets::padding::Padding;
pub use modtui_widgets::rule::Rule;
pub use modtui_widgets::slot::Slot;
pub use modtui_widgets::stack::{Stack, StackItem};
pub use modtui_widgets::style::{Color, Style};
pub use modtui_widgets::text::Text;
pub use modtui_widgets::{
    Action, ButtonSpec, Dialog, DialogContent, DialogEvent, DialogId, DialogOptions, Maximizer,
    Widget, WidgetId, WidgetTree,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type: structural failures of tree operations.
pub use modtui_widgets::TreeError as Error;

/// Standard result type for modtui APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, ButtonSpec, Constraint, Dialog, DialogId, DialogOptions, Error, Event,
        KeyCode, Maximizer, Rect, Result, Size, Stack, StackItem, Text, Widget, WidgetId,
        WidgetTree,
    };

    pub use crate::{core, layout, widgets};
}

pub use modtui_core as core;
pub use modtui_layout as layout;
pub use modtui_widgets as widgets;
