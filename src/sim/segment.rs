//! Straight line segments and their intersection
//!
//! Boundary segments are the only collision surface the range sensor sees.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A segment between two ordered endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub const fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }

    /// Intersection point with another segment, if any
    #[inline]
    pub fn intersection(&self, other: &Segment) -> Option<DVec2> {
        segment_intersection(self.a, self.b, other.a, other.b)
    }
}

/// Parametric segment-segment intersection
///
/// Parallel segments never intersect, collinear overlap included. Touching
/// endpoints count as a hit (both parameters are checked inclusively).
pub fn segment_intersection(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> Option<DVec2> {
    let da = a2 - a1;
    let db = b2 - b1;
    let determinant = da.perp_dot(db);

    if determinant == 0.0 {
        return None;
    }

    let offset = b1 - a1;
    let t = offset.perp_dot(db) / determinant;
    let u = offset.perp_dot(da) / determinant;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a1 + t * da)
}

#[inline]
pub fn squared_distance(p: DVec2, q: DVec2) -> f64 {
    p.distance_squared(q)
}

#[inline]
pub fn distance(p: DVec2, q: DVec2) -> f64 {
    p.distance(q)
}
