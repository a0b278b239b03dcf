#![forbid(unsafe_code)]

//! Widget arena.
//!
//! Widgets live in a single-owner arena keyed by [`WidgetId`]. Composite
//! widgets refer to their children by id, never by reference, so any node can
//! be re-pointed in O(1) and restored later by remembering the previous id.
//!
//! Container nodes carry a *child slot* outside the widget itself. The slot
//! stays writable while the widget is moved out of its node for dispatch,
//! which is what lets a dialog deep in the tree rewrite the slot of an
//! ancestor that is still on the call stack. Shared state attached with
//! [`WidgetTree::insert_with_state`] lives next to the slot and is reachable
//! the same way.
//!
//! # Dispatch
//!
//! [`WidgetTree::user_input`] moves the target widget out of its node for the
//! duration of the call (a busy node answers [`TreeError::Busy`]). Effects that
//! need exclusive access to arbitrary widgets are queued with
//! [`WidgetTree::defer`] and run once the outermost dispatch returns, so they
//! are always visible to the caller of `user_input`.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use modtui_core::event::Event;
use modtui_core::geometry::{Rect, Size};
use modtui_core::{debug_span, trace};

use crate::Widget;
use crate::slot::Slot;

/// Stable identifier for arena nodes.
///
/// `0` is never handed out; ids are allocated monotonically and not reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A queued effect run against the whole tree.
pub type Action = Rc<dyn Fn(&mut WidgetTree)>;

/// Structural failures of tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node with this id.
    UnknownWidget(WidgetId),
    /// The node has no child slot.
    NotAContainer(WidgetId),
    /// The node's child slot is empty.
    EmptySlot(WidgetId),
    /// The node holds a different widget type.
    TypeMismatch {
        id: WidgetId,
        expected: &'static str,
        found: &'static str,
    },
    /// The widget is moved out for dispatch.
    Busy(WidgetId),
    /// The node carries no attached state of the requested type.
    NoState {
        id: WidgetId,
        expected: &'static str,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWidget(id) => write!(f, "no widget with id {id}"),
            Self::NotAContainer(id) => write!(f, "widget {id} has no child slot"),
            Self::EmptySlot(id) => write!(f, "child slot of widget {id} is empty"),
            Self::TypeMismatch {
                id,
                expected,
                found,
            } => write!(f, "widget {id} is a {found}, expected {expected}"),
            Self::Busy(id) => write!(f, "widget {id} is handling input"),
            Self::NoState { id, expected } => {
                write!(f, "widget {id} carries no {expected} state")
            }
        }
    }
}

impl std::error::Error for TreeError {}

struct Node {
    widget: Option<Box<dyn Widget>>,
    name: &'static str,
    container: bool,
    child: Option<WidgetId>,
    state: Option<Rc<dyn Any>>,
}

/// Single-owner arena of widgets with a built-in root slot.
pub struct WidgetTree {
    nodes: BTreeMap<WidgetId, Node>,
    next_id: u64,
    root: WidgetId,
    pending: VecDeque<Action>,
    depth: usize,
    quit: bool,
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("pending", &self.pending.len())
            .field("depth", &self.depth)
            .field("quit", &self.quit)
            .finish()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create a tree holding only an empty root slot.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            root: WidgetId(0),
            pending: VecDeque::new(),
            depth: 0,
            quit: false,
        };
        tree.root = tree.insert_node(Box::new(Slot::new()), true, None, None);
        tree
    }

    /// The root slot. Dialogs opened "globally" splice into it.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        self.root
    }

    /// Number of live nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a leaf or composite widget.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.insert_node(Box::new(widget), false, None, None)
    }

    /// Add a widget that owns a settable child slot.
    pub fn insert_container<W: Widget>(&mut self, widget: W, child: Option<WidgetId>) -> WidgetId {
        self.insert_node(Box::new(widget), true, child, None)
    }

    /// Add a widget together with shared state that stays readable, via
    /// [`state`](Self::state), while the widget is handling input.
    pub fn insert_with_state<W: Widget, S: Any>(&mut self, widget: W, state: Rc<S>) -> WidgetId {
        let state: Rc<dyn Any> = state;
        self.insert_node(Box::new(widget), false, None, Some(state))
    }

    fn insert_node(
        &mut self,
        widget: Box<dyn Widget>,
        container: bool,
        child: Option<WidgetId>,
        state: Option<Rc<dyn Any>>,
    ) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        let name = widget.name();
        self.nodes.insert(
            id,
            Node {
                widget: Some(widget),
                name,
                container,
                child,
                state,
            },
        );
        id
    }

    /// Remove a single node (not its children). The root cannot be removed.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        if id == self.root {
            return None;
        }
        self.nodes.remove(&id).and_then(|node| node.widget)
    }

    /// Whether a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Short type name of the widget at `id`.
    #[must_use]
    pub fn name(&self, id: WidgetId) -> Option<&'static str> {
        self.nodes.get(&id).map(|node| node.name)
    }

    /// Whether the node at `id` has a child slot.
    #[must_use]
    pub fn is_container(&self, id: WidgetId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.container)
    }

    /// Read a container's child slot.
    pub fn child(&self, id: WidgetId) -> Result<Option<WidgetId>, TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::UnknownWidget(id))?;
        if !node.container {
            return Err(TreeError::NotAContainer(id));
        }
        Ok(node.child)
    }

    /// Overwrite a container's child slot, returning the previous occupant.
    ///
    /// Works while the container itself is busy handling input.
    pub fn set_child(
        &mut self,
        id: WidgetId,
        child: Option<WidgetId>,
    ) -> Result<Option<WidgetId>, TreeError> {
        let node = self.nodes.get_mut(&id).ok_or(TreeError::UnknownWidget(id))?;
        if !node.container {
            return Err(TreeError::NotAContainer(id));
        }
        trace!(container = id.get(), "child slot rewritten");
        Ok(std::mem::replace(&mut node.child, child))
    }

    /// State attached by [`insert_with_state`](Self::insert_with_state).
    ///
    /// Unlike [`get`](Self::get) this never answers [`TreeError::Busy`].
    pub fn state<S: Any>(&self, id: WidgetId) -> Result<Rc<S>, TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::UnknownWidget(id))?;
        node.state
            .clone()
            .and_then(|state| state.downcast::<S>().ok())
            .ok_or(TreeError::NoState {
                id,
                expected: crate::short_type_name::<S>(),
            })
    }

    /// Borrow a widget as its concrete type.
    pub fn get<T: Widget>(&self, id: WidgetId) -> Result<&T, TreeError> {
        let node = self.nodes.get(&id).ok_or(TreeError::UnknownWidget(id))?;
        let widget = node.widget.as_deref().ok_or(TreeError::Busy(id))?;
        widget
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(id, node.name))
    }

    /// Mutably borrow a widget as its concrete type.
    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Result<&mut T, TreeError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(TreeError::UnknownWidget(id))?;
        let name = node.name;
        let widget = node.widget.as_deref_mut().ok_or(TreeError::Busy(id))?;
        widget
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(id, name))
    }

    /// Direct children: the widget's own children followed by the slot child.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut out = node
            .widget
            .as_deref()
            .map(|widget| widget.children())
            .unwrap_or_default();
        out.extend(node.child);
        out
    }

    /// Whether the widget can take focus right now. Busy widgets can't.
    #[must_use]
    pub fn selectable(&self, id: WidgetId) -> bool {
        self.nodes
            .get(&id)
            .and_then(|node| node.widget.as_deref())
            .is_some_and(|widget| widget.selectable(self, id))
    }

    /// Natural size of a widget, clamped to `available`.
    #[must_use]
    pub fn measure(&self, id: WidgetId, available: Size) -> Size {
        self.nodes
            .get(&id)
            .and_then(|node| node.widget.as_deref())
            .map_or(Size::ZERO, |widget| {
                widget.measure(self, id, available).clamp_max(available)
            })
    }

    /// Dispatch an event to a widget. Returns whether it was handled.
    ///
    /// Queued actions run before the outermost call returns.
    pub fn user_input(&mut self, id: WidgetId, event: &Event, area: Rect, focus: bool) -> bool {
        let Some(mut widget) = self.nodes.get_mut(&id).and_then(|node| node.widget.take()) else {
            return false;
        };

        self.depth += 1;
        let handled = {
            let _span = debug_span!("widget_input", widget = widget.name(), id = id.get()).entered();
            widget.user_input(self, id, event, area, focus)
        };
        self.depth -= 1;

        // The node may have been removed while its widget was out.
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = Some(widget);
        }

        if self.depth == 0 {
            self.run_pending();
        }
        handled
    }

    /// Dispatch only if the widget can accept focus.
    pub fn user_input_if_selectable(
        &mut self,
        id: WidgetId,
        event: &Event,
        area: Rect,
        focus: bool,
    ) -> bool {
        self.selectable(id) && self.user_input(id, event, area, focus)
    }

    /// Queue an action. Outside of dispatch it runs immediately.
    pub fn defer(&mut self, action: Action) {
        self.pending.push_back(action);
        if self.depth == 0 {
            self.run_pending();
        }
    }

    fn run_pending(&mut self) {
        while let Some(action) = self.pending.pop_front() {
            action(self);
        }
    }

    /// Ask the host loop to stop.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether [`request_quit`](Self::request_quit) was called.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit
    }
}

fn mismatch<T: Widget>(id: WidgetId, found: &'static str) -> TreeError {
    TreeError::TypeMismatch {
        id,
        expected: crate::short_type_name::<T>(),
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Text;
    use modtui_core::event::KeyCode;
    use std::cell::Cell;

    #[test]
    fn new_tree_has_empty_root_slot() {
        let tree = WidgetTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.is_container(tree.root()));
        assert_eq!(tree.child(tree.root()), Ok(None));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        tree.remove(a);
        let b = tree.insert(Text::new("b"));
        assert_ne!(a, b);
        assert!(!tree.contains(a));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        assert!(tree.remove(root).is_none());
        assert!(tree.contains(root));
    }

    #[test]
    fn set_child_returns_previous() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        let b = tree.insert(Text::new("b"));
        let root = tree.root();
        assert_eq!(tree.set_child(root, Some(a)), Ok(None));
        assert_eq!(tree.set_child(root, Some(b)), Ok(Some(a)));
        assert_eq!(tree.child(root), Ok(Some(b)));
        assert_eq!(tree.children(root), vec![b]);
    }

    #[test]
    fn leaf_has_no_slot() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        assert_eq!(tree.child(a), Err(TreeError::NotAContainer(a)));
        assert_eq!(tree.set_child(a, None), Err(TreeError::NotAContainer(a)));
    }

    #[test]
    fn downcast_reports_type_names() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        assert!(tree.get::<Text>(a).is_ok());
        let err = tree.get::<Slot>(a).unwrap_err();
        assert_eq!(
            err,
            TreeError::TypeMismatch {
                id: a,
                expected: "Slot",
                found: "Text",
            }
        );
        assert_eq!(err.to_string(), format!("widget {a} is a Text, expected Slot"));
    }

    #[test]
    fn unknown_ids_error() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Text::new("a"));
        tree.remove(a);
        assert_eq!(tree.get::<Text>(a).unwrap_err(), TreeError::UnknownWidget(a));
        assert!(!tree.user_input(a, &Event::key(KeyCode::Enter), Rect::default(), true));
    }

    #[derive(Debug)]
    struct Tally;

    impl Widget for Tally {
        fn user_input(
            &mut self,
            tree: &mut WidgetTree,
            id: WidgetId,
            _event: &Event,
            _area: Rect,
            _focus: bool,
        ) -> bool {
            assert_eq!(tree.get::<Tally>(id).unwrap_err(), TreeError::Busy(id));
            match tree.state::<Cell<u32>>(id) {
                Ok(count) => {
                    count.set(count.get() + 1);
                    true
                }
                Err(_) => false,
            }
        }

        fn measure(&self, _tree: &WidgetTree, _id: WidgetId, _available: Size) -> Size {
            Size::ZERO
        }
    }

    #[test]
    fn attached_state_is_reachable_during_dispatch() {
        let mut tree = WidgetTree::new();
        let count = Rc::new(Cell::new(0u32));
        let id = tree.insert_with_state(Tally, Rc::clone(&count));
        assert!(tree.user_input(id, &Event::key(KeyCode::Enter), Rect::default(), true));
        assert!(tree.user_input(id, &Event::key(KeyCode::Enter), Rect::default(), true));
        assert_eq!(count.get(), 2);
        assert!(Rc::ptr_eq(&tree.state::<Cell<u32>>(id).unwrap(), &count));
    }

    #[test]
    fn state_of_wrong_type_or_missing() {
        let mut tree = WidgetTree::new();
        let plain = tree.insert(Text::new("a"));
        let tagged = tree.insert_with_state(Text::new("b"), Rc::new(Cell::new(1u32)));
        assert_eq!(
            tree.state::<Cell<u32>>(plain).unwrap_err(),
            TreeError::NoState {
                id: plain,
                expected: "Cell<u32>",
            }
        );
        assert!(tree.state::<String>(tagged).is_err());
        assert!(tree.state::<Cell<u32>>(tagged).is_ok());
    }

    #[test]
    fn defer_outside_dispatch_runs_immediately() {
        let mut tree = WidgetTree::new();
        let ran = Rc::new(Cell::new(0));
        let seen = Rc::clone(&ran);
        tree.defer(Rc::new(move |_tree: &mut WidgetTree| seen.set(seen.get() + 1)));
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn quit_flag() {
        let mut tree = WidgetTree::new();
        assert!(!tree.quit_requested());
        tree.request_quit();
        assert!(tree.quit_requested());
    }
}
