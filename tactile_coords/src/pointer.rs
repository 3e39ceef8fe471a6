// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized pointer identity and samples.

use kurbo::Point;

/// Stable identifier of one physical pointer.
///
/// For pointer events this is the device's pointer id; for touch events the
/// touch identifier; mouse input conventionally uses a fixed id. Ids may be
/// negative on some platforms, hence the signed representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i64);

/// The kind of device a pointer sample came from.
///
/// The interaction finder never mixes pointer types within one interaction,
/// and mouse samples may be suppressed while touch input is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Mouse input.
    Mouse,
    /// Stylus input.
    Pen,
    /// Touch contact.
    Touch,
    /// Synthetic pointer driven by a reflow replay, never by real input.
    Reflow,
}

/// One normalized input sample: who, where, and when.
///
/// `page` is the position in document coordinates, `client` in viewport
/// coordinates; both are carried because consumers choose their delta source.
/// `time` is a monotonic timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// The pointer this sample belongs to.
    pub id: PointerId,
    /// The originating device kind.
    pub pointer_type: PointerType,
    /// Position in page (document) coordinates.
    pub page: Point,
    /// Position in client (viewport) coordinates.
    pub client: Point,
    /// Monotonic timestamp in milliseconds.
    pub time: f64,
}

impl PointerSample {
    /// Creates a sample at the origin with a zero timestamp.
    #[must_use]
    pub fn new(id: PointerId, pointer_type: PointerType) -> Self {
        Self {
            id,
            pointer_type,
            page: Point::ZERO,
            client: Point::ZERO,
            time: 0.0,
        }
    }

    /// Returns a copy of this sample moved to the given positions and time.
    #[must_use]
    pub fn at(mut self, page: Point, client: Point, time: f64) -> Self {
        self.page = page;
        self.client = client;
        self.time = time;
        self
    }
}
