// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host environment: element queries and the clock.
//!
//! The toolkit never touches a real document tree. The host hands every
//! operation a [`DomQuery`] implementation, and the scope holds a [`Clock`]
//! for timestamps, so the core stays testable and host-agnostic.

use kurbo::Rect;

/// Opaque handle to a host element.
///
/// The toolkit only ever compares these for identity and passes them back to
/// the host's [`DomQuery`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Element queries answered by the host.
pub trait DomQuery {
    /// Whether `element` matches the given selector string.
    fn matches_selector(&self, element: ElementId, selector: &str) -> bool;

    /// Whether `node` is `ancestor` or a descendant of it.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// The parent of `element`, if any.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// The element's current rectangle in page coordinates.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    /// All elements under `context` matching the selector, in tree order.
    fn select_all(&self, context: ElementId, selector: &str) -> Vec<ElementId>;
}

/// Monotonic time source, in milliseconds.
pub trait Clock {
    /// The current timestamp.
    fn now(&self) -> f64;
}
