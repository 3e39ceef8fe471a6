// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamp the active edges of a resize between inner and outer bounds.

use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};

use crate::pipeline::{Modifier, ModifierArg, ModifierFlags};

/// Per-side bounds for edge restriction.
///
/// Unlike a [`Rect`], the sides are independent: a missing side is expressed
/// with an infinity that makes its clamp a no-op, so partially-specified
/// bounds restrict only the sides they name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeBounds {
    /// Bound for the top edge's y.
    pub top: f64,
    /// Bound for the left edge's x.
    pub left: f64,
    /// Bound for the bottom edge's y.
    pub bottom: f64,
    /// Bound for the right edge's x.
    pub right: f64,
}

impl EdgeBounds {
    /// The inner bounds that never constrain anything.
    pub const NO_INNER: Self = Self {
        top: f64::INFINITY,
        left: f64::INFINITY,
        bottom: f64::NEG_INFINITY,
        right: f64::NEG_INFINITY,
    };

    /// The outer bounds that never constrain anything.
    pub const NO_OUTER: Self = Self {
        top: f64::NEG_INFINITY,
        left: f64::NEG_INFINITY,
        bottom: f64::INFINITY,
        right: f64::INFINITY,
    };

    /// Bounds taken from a rectangle's sides.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top: rect.y0,
            left: rect.x0,
            bottom: rect.y1,
            right: rect.x1,
        }
    }
}

/// A restriction boundary: fixed bounds or a function of the pointer.
#[derive(Clone)]
pub enum RestrictBounds {
    /// Fixed bounds.
    Fixed(EdgeBounds),
    /// Resolved on every move from the candidate position; `None` means
    /// unrestricted for this move.
    Func(Rc<dyn Fn(Point) -> Option<EdgeBounds>>),
}

impl RestrictBounds {
    /// Fixed bounds from a rectangle.
    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self::Fixed(EdgeBounds::from_rect(rect))
    }

    fn resolve(&self, page: Point) -> Option<EdgeBounds> {
        match self {
            Self::Fixed(bounds) => Some(*bounds),
            Self::Func(func) => func(page),
        }
    }
}

impl std::fmt::Debug for RestrictBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(bounds) => f.debug_tuple("Fixed").field(bounds).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Configuration for the [`RestrictEdges`] modifier.
#[derive(Clone, Debug, Default)]
pub struct RestrictEdgesOptions {
    /// Edges may not move past these bounds from the inside.
    pub inner: Option<RestrictBounds>,
    /// Edges may not move past these bounds from the outside.
    pub outer: Option<RestrictBounds>,
    /// Shift applied to both boundaries.
    pub offset: Vec2,
    /// Whether the modifier runs at all.
    pub enabled: bool,
    /// Run only during the release-time passes.
    pub end_only: bool,
}

impl RestrictEdgesOptions {
    /// Default options: unrestricted, zero offset, disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inner bounds.
    #[must_use]
    pub fn inner(mut self, inner: RestrictBounds) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Sets the outer bounds.
    #[must_use]
    pub fn outer(mut self, outer: RestrictBounds) -> Self {
        self.outer = Some(outer);
        self
    }

    /// Sets the boundary offset.
    #[must_use]
    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Enables or disables the modifier.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Restricts the modifier to the release-time passes.
    #[must_use]
    pub fn end_only(mut self, end_only: bool) -> Self {
        self.end_only = end_only;
        self
    }
}

/// The edge-restriction modifier. Built per action from
/// [`RestrictEdgesOptions`].
///
/// Only the axes with an active edge are clamped; top/bottom and left/right
/// are mutually exclusive per axis, with top and left taking precedence.
/// The clamp preserves where inside the element the pointer went down, so
/// each bound is shifted per side by the grip's distance to that side,
/// captured once at the start of the action.
#[derive(Debug)]
pub struct RestrictEdges {
    options: RestrictEdgesOptions,
    offsets: EdgeBounds,
}

impl RestrictEdges {
    /// Creates the modifier.
    #[must_use]
    pub fn new(options: RestrictEdgesOptions) -> Self {
        Self {
            options,
            offsets: EdgeBounds {
                top: 0.0,
                left: 0.0,
                bottom: 0.0,
                right: 0.0,
            },
        }
    }
}

impl Modifier for RestrictEdges {
    fn flags(&self) -> ModifierFlags {
        ModifierFlags {
            enabled: self.options.enabled,
            end_only: self.options.end_only,
        }
    }

    fn start(&mut self, arg: &ModifierArg) {
        // Fold the configured shift together with the pointer's distance to
        // each side of the element, so a grip away from an edge stays that
        // far away from the bounds.
        let offset = self.options.offset;
        self.offsets = EdgeBounds {
            top: offset.y + arg.start_offsets.top,
            left: offset.x + arg.start_offsets.left,
            bottom: offset.y - arg.start_offsets.bottom,
            right: offset.x - arg.start_offsets.right,
        };
    }

    fn set(&mut self, arg: &mut ModifierArg) {
        if !arg.edges.any() {
            return;
        }

        let page = arg.coords;
        let inner = self
            .options
            .inner
            .as_ref()
            .and_then(|bounds| bounds.resolve(page))
            .unwrap_or(EdgeBounds::NO_INNER);
        let outer = self
            .options
            .outer
            .as_ref()
            .and_then(|bounds| bounds.resolve(page))
            .unwrap_or(EdgeBounds::NO_OUTER);
        let offsets = self.offsets;

        if arg.edges.top {
            arg.coords.y = (outer.top + offsets.top)
                .max(page.y)
                .min(inner.top + offsets.top);
        } else if arg.edges.bottom {
            arg.coords.y = (outer.bottom + offsets.bottom)
                .min(page.y)
                .max(inner.bottom + offsets.bottom);
        }

        if arg.edges.left {
            arg.coords.x = (outer.left + offsets.left)
                .max(page.x)
                .min(inner.left + offsets.left);
        } else if arg.edges.right {
            arg.coords.x = (outer.right + offsets.right)
                .min(page.x)
                .max(inner.right + offsets.right);
        }
    }

    fn stop(&mut self, _arg: &ModifierArg) {}
}
