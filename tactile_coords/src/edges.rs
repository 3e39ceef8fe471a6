// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-edge flags and point-to-rect side offsets.

use kurbo::{Point, Rect};

/// Which edges of a target's rectangle an action is operating on.
///
/// A resize action flags the grabbed edges; modifiers constrain only the
/// flagged axes. Top/bottom and left/right are mutually exclusive per axis
/// for the restriction math — callers are expected to flag at most one edge
/// per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Edges {
    /// The top edge is being moved.
    pub top: bool,
    /// The left edge is being moved.
    pub left: bool,
    /// The bottom edge is being moved.
    pub bottom: bool,
    /// The right edge is being moved.
    pub right: bool,
}

impl Edges {
    /// No active edges (drag/gesture actions).
    pub const NONE: Self = Self {
        top: false,
        left: false,
        bottom: false,
        right: false,
    };

    /// All four edges (used by reflow to exercise every constraint).
    pub const ALL: Self = Self {
        top: true,
        left: true,
        bottom: true,
        right: true,
    };

    /// Returns `true` if any edge is active.
    #[must_use]
    pub fn any(self) -> bool {
        self.top || self.left || self.bottom || self.right
    }
}

/// Signed distances from a point to each side of a rectangle.
///
/// Captured at action start, these offsets let restriction preserve the
/// pointer's initial grip on the target: clamping happens relative to where
/// the pointer grabbed the rect, not its corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectOffsets {
    /// `point.y - rect.top`.
    pub top: f64,
    /// `point.x - rect.left`.
    pub left: f64,
    /// `rect.bottom - point.y`.
    pub bottom: f64,
    /// `rect.right - point.x`.
    pub right: f64,
}

impl RectOffsets {
    /// Measures the offsets of `point` within `rect`.
    #[must_use]
    pub fn measure(rect: Rect, point: Point) -> Self {
        Self {
            top: point.y - rect.y0,
            left: point.x - rect.x0,
            bottom: rect.y1 - point.y,
            right: rect.x1 - point.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_any() {
        assert!(!Edges::NONE.any());
        assert!(Edges { top: true, ..Edges::NONE }.any());
        assert!(Edges::ALL.any());
    }

    #[test]
    fn measure_offsets_inside_rect() {
        let rect = Rect::new(10.0, 20.0, 110.0, 220.0);
        let offsets = RectOffsets::measure(rect, Point::new(30.0, 50.0));

        assert_eq!(offsets.left, 20.0);
        assert_eq!(offsets.top, 30.0);
        assert_eq!(offsets.right, 80.0);
        assert_eq!(offsets.bottom, 170.0);
    }

    #[test]
    fn measure_offsets_outside_rect_are_signed() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let offsets = RectOffsets::measure(rect, Point::new(-10.0, 120.0));

        assert_eq!(offsets.left, -10.0);
        assert_eq!(offsets.bottom, -20.0);
    }
}
