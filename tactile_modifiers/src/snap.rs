// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap the candidate coordinate to the closest configured target.

use std::rc::Rc;

use kurbo::{Point, Vec2};

use crate::pipeline::{Modifier, ModifierArg, ModifierFlags};

/// One snap position, with optional per-axis values and range override.
///
/// An omitted axis leaves that axis of the candidate untouched, so a target
/// with only `y` set snaps vertically while following the pointer
/// horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapPosition {
    /// Target x, relative to the snap offset anchor.
    pub x: Option<f64>,
    /// Target y, relative to the snap offset anchor.
    pub y: Option<f64>,
    /// Overrides [`SnapOptions::range`] for this target.
    pub range: Option<f64>,
}

impl SnapPosition {
    /// A position with both axes set.
    #[must_use]
    pub fn point(point: Point) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
            range: None,
        }
    }

    /// Sets the per-target range.
    #[must_use]
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }
}

/// A snap target: a literal position or a function of the pointer position.
///
/// Function targets receive the pointer position relative to the current
/// offset anchor and may decline by returning `None`.
#[derive(Clone)]
pub enum SnapTarget {
    /// A fixed position.
    Position(SnapPosition),
    /// Computed per move from the anchor-relative pointer position.
    Func(Rc<dyn Fn(Point) -> Option<SnapPosition>>),
}

impl SnapTarget {
    /// A literal point target.
    #[must_use]
    pub fn point(point: Point) -> Self {
        Self::Position(SnapPosition::point(point))
    }

    fn resolve(&self, relative: Point) -> Option<SnapPosition> {
        match self {
            Self::Position(position) => Some(*position),
            Self::Func(func) => func(relative),
        }
    }
}

impl std::fmt::Debug for SnapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(position) => f.debug_tuple("Position").field(position).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// How the snap anchor offset is derived at action start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SnapOffset {
    /// Targets are absolute page positions.
    #[default]
    None,
    /// Targets are relative to the action's start coordinates.
    StartCoords,
    /// Targets are relative to a fixed offset.
    Fixed(Vec2),
}

/// Configuration for the [`Snap`] modifier.
#[derive(Clone, Debug)]
pub struct SnapOptions {
    /// Candidate targets, tried in order on every move.
    pub targets: Vec<SnapTarget>,
    /// Default snap range; a target within range captures the coordinate.
    pub range: f64,
    /// Points of the target's start rect (in unit coordinates, `(0, 0)` =
    /// top left) that snap to the targets instead of the pointer itself.
    /// Empty means the pointer position snaps directly.
    pub relative_points: Vec<Point>,
    /// Anchor offset applied to every target.
    pub offset: SnapOffset,
    /// Whether the modifier runs at all.
    pub enabled: bool,
    /// Run only during the release-time passes.
    pub end_only: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            range: f64::INFINITY,
            relative_points: Vec::new(),
            offset: SnapOffset::None,
            enabled: false,
            end_only: false,
        }
    }
}

impl SnapOptions {
    /// Default options: no targets, infinite range, disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a target.
    #[must_use]
    pub fn target(mut self, target: SnapTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Sets the default range.
    #[must_use]
    pub fn range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    /// Appends a relative point.
    #[must_use]
    pub fn relative_point(mut self, point: Point) -> Self {
        self.relative_points.push(point);
        self
    }

    /// Sets the anchor offset mode.
    #[must_use]
    pub fn offset(mut self, offset: SnapOffset) -> Self {
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

#[derive(Clone, Copy, Debug)]
struct Closest {
    point: Point,
    distance: f64,
    range: f64,
    in_range: bool,
}

/// The snap modifier. Built per action from [`SnapOptions`].
#[derive(Debug)]
pub struct Snap {
    options: SnapOptions,
    offsets: Vec<Vec2>,
}

impl Snap {
    /// Creates the modifier with empty per-action state.
    #[must_use]
    pub fn new(options: SnapOptions) -> Self {
        Self {
            options,
            offsets: Vec::new(),
        }
    }
}

impl Modifier for Snap {
    fn flags(&self) -> ModifierFlags {
        ModifierFlags {
            enabled: self.options.enabled,
            end_only: self.options.end_only,
        }
    }

    fn start(&mut self, arg: &ModifierArg) {
        let anchor = match self.options.offset {
            SnapOffset::None => Vec2::ZERO,
            SnapOffset::StartCoords => arg.start_coords.to_vec2(),
            SnapOffset::Fixed(offset) => offset,
        };

        // With relative points and a known rect, each unit point of the rect
        // becomes its own anchor; the rect's point (not the pointer) snaps to
        // the targets. Otherwise the single anchor is the offset itself.
        self.offsets = match arg.rect {
            Some(rect) if !self.options.relative_points.is_empty() => self
                .options
                .relative_points
                .iter()
                .map(|relative| {
                    Vec2::new(
                        arg.start_offsets.left - rect.width() * relative.x + anchor.x,
                        arg.start_offsets.top - rect.height() * relative.y + anchor.y,
                    )
                })
                .collect(),
            _ => vec![anchor],
        };
    }

    fn set(&mut self, arg: &mut ModifierArg) {
        let page = arg.coords;
        let mut candidates: Vec<(Point, f64)> = Vec::new();

        for &offset in &self.offsets {
            let relative = page - offset;
            for target in &self.options.targets {
                let Some(position) = target.resolve(relative) else {
                    continue;
                };
                candidates.push((
                    Point::new(
                        position.x.unwrap_or(relative.x) + offset.x,
                        position.y.unwrap_or(relative.y) + offset.y,
                    ),
                    position.range.unwrap_or(self.options.range),
                ));
            }
        }

        let mut closest: Option<Closest> = None;

        for (point, range) in candidates {
            let distance = (point - page).hypot();
            let mut in_range = distance <= range;

            // An infinite-range target counts as out of range against an
            // in-range competitor with a finite range.
            if range.is_infinite()
                && closest.is_some_and(|c| c.in_range && c.range.is_finite())
            {
                in_range = false;
            }

            let better = match closest {
                None => true,
                Some(c) => {
                    if in_range && c.in_range {
                        // Both in range: the pointer is relatively deeper
                        // in this target.
                        distance / range < c.distance / c.range
                    } else if in_range {
                        // An in-range target always beats an out-of-range
                        // one, however far away it is.
                        true
                    } else {
                        // Neither in range: plain distance.
                        !c.in_range && distance < c.distance
                    }
                }
            };

            if better {
                closest = Some(Closest {
                    point,
                    distance,
                    range,
                    in_range,
                });
            }
        }

        if let Some(c) = closest
            && c.in_range
        {
            arg.coords = c.point;
        }
    }

    fn stop(&mut self, _arg: &ModifierArg) {
        self.offsets.clear();
    }
}
