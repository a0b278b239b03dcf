#![forbid(unsafe_code)]

//! Observer registries keyed by event.
//!
//! Each key maps to an ordered list of named callbacks. Firing runs every
//! callback for the key synchronously, in registration order.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::tree::WidgetId;

/// Name of a registered callback, used to remove it again.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(Cow<'static, str>);

impl CallbackId {
    /// The callback's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for CallbackId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for CallbackId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An observer. Receives the id of the widget whose state changed.
pub type Callback = Rc<dyn Fn(WidgetId)>;

/// Registry of callbacks grouped by key.
pub struct Callbacks<K> {
    entries: BTreeMap<K, Vec<(CallbackId, Callback)>>,
}

impl<K: fmt::Debug> fmt::Debug for Callbacks<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, list)| {
                let names: Vec<&str> = list.iter().map(|(id, _)| id.as_str()).collect();
                (key, names)
            }))
            .finish()
    }
}

impl<K> Default for Callbacks<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Callbacks<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `key`. Duplicate names are allowed.
    pub fn add(&mut self, key: K, id: impl Into<CallbackId>, callback: impl Fn(WidgetId) + 'static) {
        self.entries
            .entry(key)
            .or_default()
            .push((id.into(), Rc::new(callback)));
    }

    /// Remove every callback named `id` under `key`. Returns whether any was removed.
    pub fn remove(&mut self, key: K, id: &CallbackId) -> bool {
        let Some(list) = self.entries.get_mut(&key) else {
            return false;
        };
        let before = list.len();
        list.retain(|(name, _)| name != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.entries.remove(&key);
        }
        removed
    }

    /// Number of callbacks registered under `key`.
    #[must_use]
    pub fn count(&self, key: K) -> usize {
        self.entries.get(&key).map_or(0, Vec::len)
    }

    /// Run every callback for `key`, in registration order.
    pub fn fire(&self, key: K, widget: WidgetId) {
        for callback in self.listeners(key) {
            callback(widget);
        }
    }

    /// Snapshot of the callbacks under `key`, in registration order.
    ///
    /// Firing from the snapshot lets callbacks edit the registry.
    #[must_use]
    pub fn listeners(&self, key: K) -> Vec<Callback> {
        self.entries
            .get(&key)
            .map(|list| list.iter().map(|(_, callback)| Rc::clone(callback)).collect())
            .unwrap_or_default()
    }
}
