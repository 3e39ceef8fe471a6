// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Signals: an ordered plugin registry with short-circuiting dispatch.
//!
//! ## Overview
//!
//! Cross-cutting features of an interaction toolkit (inertia, reflow,
//! auto-start policies, dev tooling) hook into the core through named signals.
//! The order in which plugins observe a signal is semantic: a plugin that
//! replaces the default end-of-action behavior must run before the plugin
//! that would apply it. This crate provides the registry that maintains that
//! order and the dispatch walk that honors short-circuiting.
//!
//! The registry is generic over the plugin payload `P`. It knows nothing
//! about signal names or payload shapes — the owning scope defines those and
//! drives dispatch. This keeps the crate `no_std` and dependency-free.
//!
//! ## Ordering
//!
//! Each plugin is registered with an id and an optional `before` list of
//! plugin ids. Insertion places the new plugin before the earliest already
//! registered plugin named in its `before` list, so every id it names ends up
//! firing after it. Plugins with no constraints append, preserving
//! registration order. Duplicate ids are rejected.
//!
//! ## Dispatch
//!
//! [`Registry::dispatch`] walks the entries in order, passing a mutable
//! payload to a caller-supplied handler. A handler returning
//! [`Propagation::Stop`] ends the walk immediately; the return value tells
//! the caller whether the firing was short-circuited. Callers that need to
//! mutate their own state while dispatching (the common case for a scope that
//! owns the registry) should iterate a snapshot of shared handles instead —
//! see [`Registry::iter`].
//!
//! ## Minimal example
//!
//! ```
//! use tactile_signals::{PluginEntry, Propagation, Registry};
//!
//! let mut registry: Registry<u32> = Registry::new();
//! registry.use_plugin(PluginEntry::new("one", 1));
//! registry.use_plugin(PluginEntry::new("two", 2));
//! registry.use_plugin(PluginEntry::new("three", 3).before(&["two"]));
//!
//! let order: Vec<u32> = registry.iter().map(|e| e.plugin).collect();
//! assert_eq!(order, [1, 3, 2]);
//!
//! // Dispatch stops as soon as a handler reports `Stop`.
//! let mut seen = Vec::new();
//! let outcome = registry.dispatch(&mut seen, |entry, seen| {
//!     seen.push(entry.plugin);
//!     if entry.id == "three" { Propagation::Stop } else { Propagation::Continue }
//! });
//! assert!(outcome.is_stop());
//! assert_eq!(seen, [1, 3]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod registry;

pub use registry::{PluginEntry, PluginId, Propagation, Registry};
