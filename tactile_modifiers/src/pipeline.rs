// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `Modifier` trait, the shared argument bundle, and the pipeline driver.

use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use tactile_coords::{Edges, RectOffsets};

use crate::restrict::RestrictEdgesOptions;
use crate::snap::SnapOptions;

/// Shared argument bundle passed to every modifier operation.
///
/// `coords` is the candidate page coordinate; `set` implementations mutate it
/// in place, and modifiers later in the pipeline see the mutated value. The
/// remaining fields are read-only context captured by the interaction.
#[derive(Clone, Debug)]
pub struct ModifierArg {
    /// Candidate page coordinate, adjusted in place by each modifier.
    pub coords: Point,
    /// Page coordinate captured at action start.
    pub start_coords: Point,
    /// The target element's rectangle at action start, if known.
    pub rect: Option<Rect>,
    /// Active edges for resize actions; `Edges::NONE` otherwise.
    pub edges: Edges,
    /// Signed distances from `start_coords` to the sides of `rect`.
    pub start_offsets: RectOffsets,
    /// `true` for the final re-evaluation passes at release time.
    pub pre_end: bool,
    /// Restricts the pass to end-only modifiers (inertia's projected-end
    /// pass); non-end-only modifiers are skipped while this is set.
    pub require_end_only: bool,
}

impl ModifierArg {
    /// Creates an argument bundle for a plain move with no rect context.
    #[must_use]
    pub fn new(start_coords: Point) -> Self {
        Self {
            coords: start_coords,
            start_coords,
            rect: None,
            edges: Edges::NONE,
            start_offsets: RectOffsets::default(),
            pre_end: false,
            require_end_only: false,
        }
    }

    /// Attaches the target rect and measures the start offsets from it.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.start_offsets = RectOffsets::measure(rect, self.start_coords);
        self.rect = Some(rect);
        self
    }

    /// Sets the active edges.
    #[must_use]
    pub fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }
}

/// Enablement flags common to every modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierFlags {
    /// Disabled modifiers stay in the pipeline but never run.
    pub enabled: bool,
    /// End-only modifiers run only during the release-time passes.
    pub end_only: bool,
}

impl ModifierFlags {
    fn should_run(self, arg: &ModifierArg) -> bool {
        self.enabled
            && (self.end_only || !arg.require_end_only)
            && (!self.end_only || arg.pre_end || arg.require_end_only)
    }
}

/// One geometric transform with per-action lifetime.
///
/// Implementations own both their options and their scratch state; the
/// pipeline constructs a fresh value per action via [`ModifierSpec`].
pub trait Modifier {
    /// Enablement flags consulted before each operation.
    fn flags(&self) -> ModifierFlags;

    /// Runs once when the action begins; captures baseline offsets.
    fn start(&mut self, arg: &ModifierArg);

    /// Runs on every move; adjusts `arg.coords` in place.
    fn set(&mut self, arg: &mut ModifierArg);

    /// Runs once at action end; releases per-action scratch state.
    fn stop(&mut self, arg: &ModifierArg);
}

/// Builds custom [`Modifier`] values for [`ModifierSpec::Custom`].
pub trait ModifierFactory {
    /// Creates a fresh modifier instance for one action.
    fn build(&self) -> Box<dyn Modifier>;
}

/// Cloneable description of one pipeline entry.
///
/// Specs live in an interactable's per-action options; a [`Pipeline`] built
/// from them owns independent state, so concurrent interactions on the same
/// interactable never share modifier scratch data.
#[derive(Clone)]
pub enum ModifierSpec {
    /// Snap the candidate coordinate to the closest configured target.
    Snap(SnapOptions),
    /// Clamp active edges between inner and outer rectangles.
    RestrictEdges(RestrictEdgesOptions),
    /// A caller-supplied modifier.
    Custom(Rc<dyn ModifierFactory>),
}

impl std::fmt::Debug for ModifierSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snap(options) => f.debug_tuple("Snap").field(options).finish(),
            Self::RestrictEdges(options) => f.debug_tuple("RestrictEdges").field(options).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ModifierSpec {
    fn build(&self) -> Box<dyn Modifier> {
        match self {
            Self::Snap(options) => Box::new(crate::snap::Snap::new(options.clone())),
            Self::RestrictEdges(options) => {
                Box::new(crate::restrict::RestrictEdges::new(options.clone()))
            }
            Self::Custom(factory) => factory.build(),
        }
    }
}

/// Result of one full `set_all` pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModifierResult {
    /// The adjusted coordinate after every modifier ran.
    pub coords: Point,
    /// `coords - candidate` for the whole pass.
    pub delta: Vec2,
    /// `true` if any modifier changed the candidate.
    pub changed: bool,
}

/// Ordered chain of modifiers with per-action state.
#[derive(Default)]
pub struct Pipeline {
    entries: Vec<Box<dyn Modifier>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Pipeline {
    /// Builds a pipeline with fresh state from the given specs, in order.
    #[must_use]
    pub fn from_specs(specs: &[ModifierSpec]) -> Self {
        Self {
            entries: specs.iter().map(ModifierSpec::build).collect(),
        }
    }

    /// Returns `true` if the pipeline has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every enabled modifier's `start`.
    pub fn start(&mut self, arg: &ModifierArg) {
        for modifier in &mut self.entries {
            if modifier.flags().enabled {
                modifier.start(arg);
            }
        }
    }

    /// Runs the `set` chain over `arg.coords`, strictly in order.
    ///
    /// Each modifier sees the previous modifier's output. The returned result
    /// reports the final coordinate and whether the candidate changed;
    /// `arg.coords` holds the adjusted value afterwards.
    pub fn set_all(&mut self, arg: &mut ModifierArg) -> ModifierResult {
        let candidate = arg.coords;

        for modifier in &mut self.entries {
            if modifier.flags().should_run(arg) {
                modifier.set(arg);
            }
        }

        ModifierResult {
            coords: arg.coords,
            delta: arg.coords - candidate,
            changed: arg.coords != candidate,
        }
    }

    /// Runs every enabled modifier's `stop`.
    pub fn stop(&mut self, arg: &ModifierArg) {
        for modifier in &mut self.entries {
            if modifier.flags().enabled {
                modifier.stop(arg);
            }
        }
    }
}
