// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Coords: uniform pointer coordinate records.
//!
//! ## Overview
//!
//! Raw pointer, touch, and mouse input arrives in many shapes. This crate
//! defines the normalized records the rest of Tactile operates on:
//!
//! - [`PointerSample`]: one pointer's identity, type, page/client position,
//!   and timestamp — a small `Copy` value safe to carry in signal payloads.
//! - [`CoordsInfo`]: one named coordinate record (page point, client point,
//!   timestamp).
//! - [`CoordsSet`]: the five records an interaction tracks — `start`, `cur`,
//!   `prev`, `delta`, `velocity` — with the derivation rules between them.
//! - [`Edges`] and [`RectOffsets`]: active-edge flags for resize actions and
//!   signed distances from a point to a rectangle's sides.
//!
//! Multi-pointer input is reduced to a single coordinate by averaging the
//! tracked samples, so a two-finger gesture moves its coordinate record by
//! the centroid of the touches.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tactile_coords::{CoordsSet, PointerId, PointerSample, PointerType};
//!
//! let mut coords = CoordsSet::default();
//! let down = PointerSample::new(PointerId(1), PointerType::Mouse)
//!     .at(Point::new(10.0, 20.0), Point::new(10.0, 20.0), 1000.0);
//!
//! // Pointer down fixes `start` and zeroes the derived records.
//! coords.rebase(&[down], 1000.0);
//! assert_eq!(coords.start.page, Point::new(10.0, 20.0));
//!
//! // A move 100ms later updates `cur` and derives delta and velocity.
//! let moved = down.at(Point::new(30.0, 20.0), Point::new(30.0, 20.0), 1100.0);
//! coords.set_cur(&[moved], 1100.0);
//! coords.recompute_deltas();
//! assert_eq!(coords.delta.page.x, 20.0);
//! assert_eq!(coords.velocity.page.x, 200.0); // px per second
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

mod coords;
mod edges;
mod pointer;

pub use coords::{CoordsInfo, CoordsSet, points_within_tolerance};
pub use edges::{Edges, RectOffsets};
pub use pointer::{PointerId, PointerSample, PointerType};
