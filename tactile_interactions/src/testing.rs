// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles: a manually-advanced clock and an in-memory element tree.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::Rect;

use crate::dom::{Clock, DomQuery, ElementId};

/// A [`Clock`] whose time only moves when a test says so.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock reading `now` milliseconds.
    #[must_use]
    pub fn at(now: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// A shareable handle for [`crate::scope::Scope::new`]; it observes
    /// later `advance`/`set` calls on this clock.
    #[must_use]
    pub fn handle(&self) -> Rc<dyn Clock> {
        Rc::new(self.clone())
    }

    /// Moves time forward by `by` milliseconds.
    pub fn advance(&self, by: f64) {
        self.now.set(self.now.get() + by);
    }

    /// Jumps time to `now` milliseconds.
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<ElementId>,
    rect: Option<Rect>,
    tags: Vec<String>,
}

/// An in-memory element tree implementing [`DomQuery`].
///
/// Selectors are opaque tags: an element matches a selector iff it was
/// tagged with that exact string.
#[derive(Debug)]
pub struct TestDom {
    nodes: Vec<Node>,
}

impl Default for TestDom {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDom {
    /// Creates a tree holding only the root element.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                rect: None,
                tags: Vec::new(),
            }],
        }
    }

    /// The root element's id.
    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Adds a child of `parent` with the given rect.
    pub fn add_element(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        debug_assert!(
            self.node(parent).is_some(),
            "parent must already exist"
        );
        let id = ElementId(self.nodes.len() as u64);
        self.nodes.push(Node {
            parent: Some(parent),
            rect: Some(rect),
            tags: Vec::new(),
        });
        id
    }

    /// Tags `element` so it matches `selector`.
    pub fn tag(&mut self, element: ElementId, selector: &str) {
        if let Some(node) = self.node_mut(element) {
            node.tags.push(selector.to_owned());
        }
    }

    /// Replaces the element's rect.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.node_mut(element) {
            node.rect = Some(rect);
        }
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(usize::try_from(element.0).ok()?)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(usize::try_from(element.0).ok()?)
    }
}

impl DomQuery for TestDom {
    fn matches_selector(&self, element: ElementId, selector: &str) -> bool {
        self.node(element)
            .is_some_and(|node| node.tags.iter().any(|tag| tag == selector))
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.node(element)?.rect
    }

    fn select_all(&self, context: ElementId, selector: &str) -> Vec<ElementId> {
        (0..self.nodes.len())
            .map(|index| ElementId(index as u64))
            .filter(|&id| self.matches_selector(id, selector) && self.contains(context, id))
            .collect()
    }
}
