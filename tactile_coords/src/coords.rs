// Copyright 2026 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate records and the derivation rules between them.

use kurbo::{Point, Vec2};

use crate::pointer::PointerSample;

/// Minimum time step, in seconds, used when deriving velocity.
///
/// Guards against a zero or negative timestamp difference between two
/// samples delivered in the same frame.
const MIN_VELOCITY_DT: f64 = 0.001;

/// One named coordinate record: page point, client point, timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CoordsInfo {
    /// Position in page (document) coordinates.
    pub page: Point,
    /// Position in client (viewport) coordinates.
    pub client: Point,
    /// Timestamp in milliseconds; for `delta` this is a duration.
    pub time: f64,
}

impl CoordsInfo {
    /// The all-zero record.
    pub const ZERO: Self = Self {
        page: Point::ZERO,
        client: Point::ZERO,
        time: 0.0,
    };

    /// Averages the given samples into one record stamped with `time`.
    ///
    /// An empty slice yields the zero position, which callers treat as
    /// "no pointer info" rather than an error.
    #[must_use]
    pub fn from_samples(samples: &[PointerSample], time: f64) -> Self {
        if samples.is_empty() {
            return Self { time, ..Self::ZERO };
        }

        let n = samples.len() as f64;
        let mut page = Vec2::ZERO;
        let mut client = Vec2::ZERO;
        for sample in samples {
            page += sample.page.to_vec2();
            client += sample.client.to_vec2();
        }

        Self {
            page: (page / n).to_point(),
            client: (client / n).to_point(),
            time,
        }
    }
}

/// The five coordinate records tracked per interaction.
///
/// `start` is fixed when the first pointer goes down (or when an action
/// resumes); `cur` and `prev` follow the pointer; `delta` and `velocity` are
/// derived. See [`CoordsSet::rebase`], [`CoordsSet::set_cur`],
/// [`CoordsSet::recompute_deltas`] and [`CoordsSet::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CoordsSet {
    /// Coordinates captured at down time.
    pub start: CoordsInfo,
    /// Latest coordinates.
    pub cur: CoordsInfo,
    /// Coordinates of the previous update.
    pub prev: CoordsInfo,
    /// `cur - prev`; `time` holds the duration in milliseconds.
    pub delta: CoordsInfo,
    /// Derived velocity in units per second; `time` mirrors `cur.time`.
    pub velocity: CoordsInfo,
}

impl CoordsSet {
    /// Fixes `start` (and `cur`/`prev`) from the given samples and zeroes the
    /// derived records. Called on pointer down when no action is in progress,
    /// and when a simulation hands control back to real input.
    pub fn rebase(&mut self, samples: &[PointerSample], now: f64) {
        let info = CoordsInfo::from_samples(samples, now);
        self.start = info;
        self.cur = info;
        self.prev = info;
        self.delta = CoordsInfo::ZERO;
        self.velocity = CoordsInfo::ZERO;
    }

    /// Updates `cur` from the given samples without touching `prev`.
    pub fn set_cur(&mut self, samples: &[PointerSample], now: f64) {
        self.cur = CoordsInfo::from_samples(samples, now);
    }

    /// Recomputes `delta` and `velocity` from `cur` and `prev`.
    pub fn recompute_deltas(&mut self) {
        self.delta = CoordsInfo {
            page: (self.cur.page - self.prev.page).to_point(),
            client: (self.cur.client - self.prev.client).to_point(),
            time: self.cur.time - self.prev.time,
        };

        let dt = (self.delta.time / 1000.0).max(MIN_VELOCITY_DT);
        self.velocity = CoordsInfo {
            page: (self.delta.page.to_vec2() / dt).to_point(),
            client: (self.delta.client.to_vec2() / dt).to_point(),
            time: self.cur.time,
        };
    }

    /// Copies `cur` into `prev`, closing out one update.
    pub fn commit(&mut self) {
        self.prev = self.cur;
    }
}

/// Returns `true` if `a` and `b` are within `tolerance` of each other.
///
/// With a tolerance of zero this is exact equality, which is what the
/// duplicate-move dedupe relies on.
#[must_use]
pub fn points_within_tolerance(a: Point, b: Point, tolerance: f64) -> bool {
    (a - b).hypot() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{PointerId, PointerType};

    fn sample(id: i64, x: f64, y: f64, time: f64) -> PointerSample {
        PointerSample::new(PointerId(id), PointerType::Touch).at(
            Point::new(x, y),
            Point::new(x, y),
            time,
        )
    }

    #[test]
    fn from_samples_averages_positions() {
        let info = CoordsInfo::from_samples(
            &[sample(0, 0.0, 0.0, 10.0), sample(1, 10.0, 20.0, 10.0)],
            10.0,
        );

        assert_eq!(info.page, Point::new(5.0, 10.0));
        assert_eq!(info.client, Point::new(5.0, 10.0));
        assert_eq!(info.time, 10.0);
    }

    #[test]
    fn from_samples_empty_is_zero_position() {
        let info = CoordsInfo::from_samples(&[], 42.0);
        assert_eq!(info.page, Point::ZERO);
        assert_eq!(info.time, 42.0);
    }

    #[test]
    fn rebase_fixes_start_and_zeroes_derived() {
        let mut coords = CoordsSet::default();
        coords.rebase(&[sample(0, 10.0, 20.0, 1000.0)], 1000.0);

        assert_eq!(coords.start, coords.cur);
        assert_eq!(coords.prev, coords.cur);
        assert_eq!(coords.delta, CoordsInfo::ZERO);
        assert_eq!(coords.velocity, CoordsInfo::ZERO);
    }

    #[test]
    fn deltas_and_velocity_follow_cur_and_prev() {
        let mut coords = CoordsSet::default();
        coords.rebase(&[sample(0, 0.0, 0.0, 0.0)], 0.0);

        coords.set_cur(&[sample(0, 30.0, -10.0, 100.0)], 100.0);
        coords.recompute_deltas();

        assert_eq!(coords.delta.page, Point::new(30.0, -10.0));
        assert_eq!(coords.delta.time, 100.0);
        assert_eq!(coords.velocity.page, Point::new(300.0, -100.0));
    }

    #[test]
    fn zero_dt_velocity_is_clamped_not_infinite() {
        let mut coords = CoordsSet::default();
        coords.rebase(&[sample(0, 0.0, 0.0, 50.0)], 50.0);

        coords.set_cur(&[sample(0, 1.0, 0.0, 50.0)], 50.0);
        coords.recompute_deltas();

        assert!(coords.velocity.page.x.is_finite());
        assert_eq!(coords.velocity.page.x, 1000.0); // 1px over the 1ms floor
    }

    #[test]
    fn commit_copies_cur_into_prev() {
        let mut coords = CoordsSet::default();
        coords.set_cur(&[sample(0, 5.0, 6.0, 7.0)], 7.0);
        coords.commit();

        assert_eq!(coords.prev, coords.cur);
    }

    #[test]
    fn tolerance_zero_means_exact() {
        let p = Point::new(1.0, 2.0);
        assert!(points_within_tolerance(p, p, 0.0));
        assert!(!points_within_tolerance(p, Point::new(1.0, 2.1), 0.0));
        assert!(points_within_tolerance(p, Point::new(1.0, 2.1), 0.5));
    }
}
