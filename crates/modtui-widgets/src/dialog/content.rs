#![forbid(unsafe_code)]

//! Dialog body: content, divider and button row stacked in a pile.

use std::cell::OnceCell;
use std::rc::Rc;

use modtui_layout::{Alignment, Constraint};

use super::DialogOptions;
use super::splice::close_action;
use crate::button::Button;
use crate::padding::Padding;
use crate::rule::Rule;
use crate::stack::{Stack, StackItem};
use crate::tree::{WidgetId, WidgetTree};

/// Ids of the widgets making up a dialog body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogContent {
    /// The pile holding everything below.
    pub body: WidgetId,
    /// The caller's content, item 0 of the pile.
    pub content: WidgetId,
    pub divider: Option<WidgetId>,
    pub button_row: Option<WidgetId>,
    /// One [`Button`] per [`ButtonSpec`](super::ButtonSpec), in order.
    pub buttons: Vec<WidgetId>,
}

impl DialogContent {
    /// Index of the content row in the body pile.
    pub const CONTENT_ROW: usize = 0;

    /// Build the body for `content`.
    ///
    /// Buttons without an action close the dialog whose id ends up in
    /// `dialog`. The cell must be filled before the body receives input.
    pub fn build(
        tree: &mut WidgetTree,
        content: WidgetId,
        options: &DialogOptions,
        dialog: &Rc<OnceCell<WidgetId>>,
    ) -> Self {
        let mut rows = vec![StackItem::new(content, Constraint::Weight(1))];
        let mut divider = None;
        let mut button_row = None;
        let mut buttons = Vec::with_capacity(options.buttons().len());

        if !options.buttons().is_empty() {
            let mut cells = Vec::with_capacity(options.buttons().len());
            for spec in options.buttons() {
                let action = spec
                    .action()
                    .cloned()
                    .unwrap_or_else(|| close_action(Rc::clone(dialog)));
                let button = tree.insert(
                    Button::new(spec.label(), action)
                        .style(options.resolved_background_style())
                        .focus_style(options.resolved_button_style()),
                );
                buttons.push(button);
                let padded = Padding::wrap(tree, button, Alignment::Center, Constraint::FitContent);
                cells.push(StackItem::new(padded, Constraint::Weight(1)));
            }

            let rule = tree.insert(Rule::new().style(options.resolved_border_style()));
            let row = tree.insert(Stack::columns(cells));
            rows.push(StackItem::new(rule, Constraint::Fixed(1)));
            rows.push(StackItem::new(row, Constraint::FitContent));
            divider = Some(rule);
            button_row = Some(row);
        }

        let body = tree.insert(Stack::pile(rows));
        Self {
            body,
            content,
            divider,
            button_row,
            buttons,
        }
    }

    /// Every node the builder created (not the caller's content).
    #[must_use]
    pub fn created(&self, tree: &WidgetTree) -> Vec<WidgetId> {
        let mut out = vec![self.body];
        out.extend(self.divider);
        if let Some(row) = self.button_row {
            out.push(row);
            out.extend(tree.children(row));
        }
        out.extend(self.buttons.iter().copied());
        out
    }
}
