// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered plugin registry and its dispatch walk.

use alloc::vec::Vec;

/// Identifier of a registered plugin.
///
/// Plugin ids are static strings by convention (`"inertia"`,
/// `"core/interactions"`); they only need to be unique within one registry.
pub type PluginId = &'static str;

/// Outcome of one handler call during a dispatch walk.
///
/// Returning [`Propagation::Stop`] ends the walk immediately. The scope uses
/// this as the veto channel for default behavior: a `Stop` observed while
/// firing a `before-action-end` signal suppresses the default end of the
/// action (inertia replaces it with a glide, reflow defers it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Keep walking the remaining entries.
    #[default]
    Continue,
    /// End the walk; remaining entries do not observe this firing.
    Stop,
}

impl Propagation {
    /// Returns `true` for [`Propagation::Stop`].
    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// One registered plugin: an id, ordering constraints, and the payload.
#[derive(Clone, Debug)]
pub struct PluginEntry<P> {
    /// Unique id within the registry.
    pub id: PluginId,
    /// Ids of plugins that must observe signals after this one.
    pub before: &'static [PluginId],
    /// The plugin payload; typically a shared handle to a listener object.
    pub plugin: P,
}

impl<P> PluginEntry<P> {
    /// Creates an entry with no ordering constraints.
    pub fn new(id: PluginId, plugin: P) -> Self {
        Self {
            id,
            before: &[],
            plugin,
        }
    }

    /// Requires every id in `before` to fire after this plugin.
    #[must_use]
    pub fn before(mut self, before: &'static [PluginId]) -> Self {
        self.before = before;
        self
    }
}

/// Ordered collection of plugins.
///
/// Iteration order is firing order. See the crate docs for the insertion
/// rules.
#[derive(Clone, Debug)]
pub struct Registry<P> {
    entries: Vec<PluginEntry<P>>,
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registry<P> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns `true` if a plugin with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: PluginId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a plugin, honoring its `before` constraints.
    ///
    /// The entry is placed before the earliest registered plugin whose id
    /// appears in the entry's `before` list; with no such plugin it appends.
    /// Returns `false` (and keeps the registry unchanged) if the id is
    /// already registered.
    pub fn use_plugin(&mut self, entry: PluginEntry<P>) -> bool {
        if self.contains(entry.id) {
            return false;
        }

        let index = self
            .entries
            .iter()
            .position(|e| entry.before.contains(&e.id))
            .unwrap_or(self.entries.len());

        self.entries.insert(index, entry);
        true
    }

    /// Iterates entries in firing order.
    pub fn iter(&self) -> core::slice::Iter<'_, PluginEntry<P>> {
        self.entries.iter()
    }

    /// Ids in firing order. Mostly useful in tests and diagnostics.
    pub fn ids(&self) -> impl Iterator<Item = PluginId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Walks entries in order, stopping when a handler returns
    /// [`Propagation::Stop`].
    ///
    /// Returns the outcome of the walk: `Stop` if any handler
    /// short-circuited, `Continue` otherwise. The registry cannot be
    /// reordered during the walk (it is borrowed for the duration), which
    /// upholds the bus contract that no listener may reorder the list while
    /// a signal fires.
    pub fn dispatch<A>(
        &self,
        arg: &mut A,
        mut handler: impl FnMut(&PluginEntry<P>, &mut A) -> Propagation,
    ) -> Propagation {
        for entry in &self.entries {
            if handler(entry, arg).is_stop() {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }
}
