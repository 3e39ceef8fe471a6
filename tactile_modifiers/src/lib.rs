// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Modifiers: geometric transforms applied to candidate coordinates.
//!
//! ## Overview
//!
//! While an action runs, every pointer update produces a candidate
//! coordinate. Before that candidate becomes the authoritative event
//! coordinate, it passes through an ordered pipeline of *modifiers* — small
//! stateful transforms such as snap-to-grid or restrict-to-rect. Each
//! modifier sees the previous modifier's output and mutates the candidate in
//! place.
//!
//! A modifier has exactly three operations ([`Modifier`]):
//!
//! - `start` runs once when the action begins and captures baselines
//!   (snap anchors, signed distances to the target's initial box);
//! - `set` runs on every move and adjusts the candidate coordinate;
//! - `stop` runs once at action end and releases per-action scratch state.
//!
//! The pipeline ([`Pipeline`]) is built from cloneable [`ModifierSpec`]s held
//! in an interactable's per-action options, so each interaction gets fresh
//! modifier state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tactile_modifiers::{ModifierArg, Pipeline, ModifierSpec};
//! use tactile_modifiers::snap::{SnapOptions, SnapTarget};
//!
//! let options = SnapOptions::new()
//!     .target(SnapTarget::point(Point::new(50.0, 100.0)))
//!     .enabled(true);
//! let mut pipeline = Pipeline::from_specs(&[ModifierSpec::Snap(options)]);
//!
//! let mut arg = ModifierArg::new(Point::new(0.0, 0.0));
//! pipeline.start(&arg);
//!
//! arg.coords = Point::new(10.0, 20.0);
//! let result = pipeline.set_all(&mut arg);
//! assert!(result.changed);
//! assert_eq!(result.coords, Point::new(50.0, 100.0));
//! ```

pub mod pipeline;
pub mod restrict;
pub mod snap;

pub use pipeline::{
    Modifier, ModifierArg, ModifierFactory, ModifierFlags, ModifierResult, ModifierSpec, Pipeline,
};
