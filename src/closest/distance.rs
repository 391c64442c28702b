//! Distance metrics for closest and furthest search.
//!
//! The search engine only ever asks whether one distance is *better* than another, so both
//! nearest and furthest search run on the same code: [`MinDistance`] orders distances
//! ascending, [`MaxDistance`] descending.

use std::cmp::Ordering;
use std::fmt::Debug;

use float_next_after::NextAfter;
use geo::{Coord, Line, Rect};

use crate::geometry::{
    max_edge_to_edge, max_edge_to_rect, max_point_to_edge, max_point_to_point, max_point_to_rect,
    max_rect_to_rect, min_edge_to_edge, min_edge_to_rect, min_point_to_edge, min_point_to_point,
    min_point_to_rect, min_rect_to_rect,
};

/// An ordered distance where "less" means "better".
pub trait Distance: Copy + Ord + Debug + Send + Sync + 'static {
    /// Whether a target lying inside a region is at [`Distance::zero`] from it. Only then are
    /// containing shapes reported as interior results.
    const CONTAINMENT_IS_BEST: bool;

    /// The best possible distance.
    fn zero() -> Self;

    /// The worst reachable distance; used as "no limit".
    fn infinity() -> Self;

    /// A distance better than [`Distance::zero`].
    fn negative() -> Self;

    fn from_value(value: f64) -> Self;

    /// The plain Euclidean length.
    fn value(self) -> f64;

    /// Relax the distance by `delta` towards [`Distance::zero`], saturating there.
    fn sub_delta(self, delta: f64) -> Self;

    /// Tighten the distance by `delta` away from [`Distance::zero`], the reverse of
    /// [`Distance::sub_delta`].
    fn add_delta(self, delta: f64) -> Self;

    /// An upper bound on the rounding error of the distance kernels for results near `self`.
    fn kernel_error(self) -> f64 {
        let value = self.value().abs();
        if value.is_finite() {
            KERNEL_RELATIVE_ERROR * value.max(1.0)
        } else {
            0.0
        }
    }

    /// The next distance in order; used to turn an exclusive limit into an inclusive one.
    fn successor(self) -> Self;

    /// The radius around a target outside of which nothing is better than `self`, if any.
    fn search_radius(self) -> Option<f64>;

    fn point_to_point(a: Coord<f64>, b: Coord<f64>) -> Self;
    fn point_to_edge(point: Coord<f64>, edge: &Line<f64>) -> Self;
    fn edge_to_edge(a: &Line<f64>, b: &Line<f64>) -> Self;
    fn point_to_rect(point: Coord<f64>, rect: &Rect<f64>) -> Self;
    fn edge_to_rect(edge: &Line<f64>, rect: &Rect<f64>) -> Self;
    fn rect_to_rect(a: &Rect<f64>, b: &Rect<f64>) -> Self;
}

/// Relative error of the kernels in [`crate::geometry`], a few ulps per arithmetic step.
const KERNEL_RELATIVE_ERROR: f64 = 8.0 * f64::EPSILON;

/// Total order on `f64` that agrees with `<` wherever it is defined.
#[inline]
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// The distance between the closest points of two geometries.
#[derive(Debug, Clone, Copy)]
pub struct MinDistance(f64);

impl MinDistance {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for MinDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinDistance {}

impl Ord for MinDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_f64(self.0, other.0)
    }
}

impl PartialOrd for MinDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<f64> for MinDistance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Distance for MinDistance {
    const CONTAINMENT_IS_BEST: bool = true;

    fn zero() -> Self {
        Self(0.0)
    }

    fn infinity() -> Self {
        Self(f64::INFINITY)
    }

    fn negative() -> Self {
        Self(-1.0)
    }

    fn from_value(value: f64) -> Self {
        Self(value)
    }

    fn value(self) -> f64 {
        self.0
    }

    fn sub_delta(self, delta: f64) -> Self {
        Self((self.0 - delta).max(0.0).min(self.0))
    }

    fn add_delta(self, delta: f64) -> Self {
        Self(self.0 + delta)
    }

    fn successor(self) -> Self {
        if self.0 < 0.0 {
            return Self::zero();
        }
        Self(self.0.next_after(f64::INFINITY))
    }

    fn search_radius(self) -> Option<f64> {
        self.0.is_finite().then_some(self.0)
    }

    fn point_to_point(a: Coord<f64>, b: Coord<f64>) -> Self {
        Self(min_point_to_point(a, b))
    }

    fn point_to_edge(point: Coord<f64>, edge: &Line<f64>) -> Self {
        Self(min_point_to_edge(point, edge))
    }

    fn edge_to_edge(a: &Line<f64>, b: &Line<f64>) -> Self {
        Self(min_edge_to_edge(a, b))
    }

    fn point_to_rect(point: Coord<f64>, rect: &Rect<f64>) -> Self {
        Self(min_point_to_rect(point, rect))
    }

    fn edge_to_rect(edge: &Line<f64>, rect: &Rect<f64>) -> Self {
        Self(min_edge_to_rect(edge, rect))
    }

    fn rect_to_rect(a: &Rect<f64>, b: &Rect<f64>) -> Self {
        Self(min_rect_to_rect(a, b))
    }
}

/// The distance between the furthest points of two geometries, ordered so that larger
/// distances are better.
///
/// [`Distance::zero`] is `+∞` and [`Distance::infinity`] is `-∞`. [`Distance::negative`] is NaN,
/// which sorts before every other value.
#[derive(Debug, Clone, Copy)]
pub struct MaxDistance(f64);

impl MaxDistance {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for MaxDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MaxDistance {}

impl Ord for MaxDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_f64(other.0, self.0)
    }
}

impl PartialOrd for MaxDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<f64> for MaxDistance {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Distance for MaxDistance {
    const CONTAINMENT_IS_BEST: bool = false;

    fn zero() -> Self {
        Self(f64::INFINITY)
    }

    fn infinity() -> Self {
        Self(f64::NEG_INFINITY)
    }

    fn negative() -> Self {
        Self(f64::NAN)
    }

    fn from_value(value: f64) -> Self {
        Self(value)
    }

    fn value(self) -> f64 {
        self.0
    }

    fn sub_delta(self, delta: f64) -> Self {
        if self.0.is_nan() {
            return self;
        }
        let relaxed = self.0 + delta;
        if relaxed.is_nan() {
            return Self::zero();
        }
        Self(relaxed)
    }

    fn add_delta(self, delta: f64) -> Self {
        Self(self.0 - delta)
    }

    fn successor(self) -> Self {
        if self.0.is_nan() {
            return Self::zero();
        }
        Self(self.0.next_after(f64::NEG_INFINITY))
    }

    fn search_radius(self) -> Option<f64> {
        None
    }

    fn point_to_point(a: Coord<f64>, b: Coord<f64>) -> Self {
        Self(max_point_to_point(a, b))
    }

    fn point_to_edge(point: Coord<f64>, edge: &Line<f64>) -> Self {
        Self(max_point_to_edge(point, edge))
    }

    fn edge_to_edge(a: &Line<f64>, b: &Line<f64>) -> Self {
        Self(max_edge_to_edge(a, b))
    }

    fn point_to_rect(point: Coord<f64>, rect: &Rect<f64>) -> Self {
        Self(max_point_to_rect(point, rect))
    }

    fn edge_to_rect(edge: &Line<f64>, rect: &Rect<f64>) -> Self {
        Self(max_edge_to_rect(edge, rect))
    }

    fn rect_to_rect(a: &Rect<f64>, b: &Rect<f64>) -> Self {
        Self(max_rect_to_rect(a, b))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn min_distance_sentinels() {
        let d = MinDistance::new(0.5);
        assert!(MinDistance::negative() < MinDistance::zero());
        assert!(MinDistance::zero() < d);
        assert!(d < MinDistance::infinity());
        assert!((d.sub_delta(0.2).value() - 0.3).abs() < 1e-12);
        assert_eq!(d.sub_delta(2.0), MinDistance::zero());
        assert_eq!(MinDistance::infinity().sub_delta(1.0), MinDistance::infinity());
        assert_eq!(MinDistance::infinity().sub_delta(f64::INFINITY), MinDistance::zero());
        assert!(d < d.successor());
        assert_eq!(MinDistance::negative().successor(), MinDistance::zero());
        assert_eq!(MinDistance::infinity().successor(), MinDistance::infinity());
        assert!((d.add_delta(0.2).value() - 0.7).abs() < 1e-12);
        assert_eq!(MinDistance::infinity().add_delta(1.0), MinDistance::infinity());
        assert!(d.kernel_error() > 0.0 && d.kernel_error() < 1e-14);
        assert_eq!(MinDistance::infinity().kernel_error(), 0.0);
        assert_eq!(d.search_radius(), Some(0.5));
        assert_eq!(MinDistance::infinity().search_radius(), None);
    }

    #[test]
    fn max_distance_is_reversed() {
        let near = MaxDistance::new(0.2);
        let far = MaxDistance::new(0.8);
        assert!(far < near, "further is better");
        assert!(MaxDistance::negative() < MaxDistance::zero());
        assert!(MaxDistance::zero() < far);
        assert!(near < MaxDistance::infinity());
        assert!((near.sub_delta(0.1).value() - 0.3).abs() < 1e-12);
        assert_eq!(MaxDistance::infinity().sub_delta(f64::INFINITY), MaxDistance::zero());
        assert!(MaxDistance::negative().sub_delta(1.0) < MaxDistance::zero());
        assert!(near < near.successor());
        assert!(near.successor().value() < 0.2);
        assert!(near < near.add_delta(0.1), "tightening moves away from zero");
        assert_eq!(MaxDistance::zero().kernel_error(), 0.0);
        assert_eq!(MaxDistance::negative().successor(), MaxDistance::zero());
        assert_eq!(near.search_radius(), None);
    }

    #[test]
    fn kernels_follow_the_metric() {
        let rect = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let point = Coord { x: 2.0, y: 0.5 };
        assert_eq!(MinDistance::point_to_rect(point, &rect).value(), 1.0);
        assert_eq!(MaxDistance::point_to_rect(point, &rect).value(), 2f64.hypot(0.5));

        let edge = Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((MinDistance::point_to_edge(point, &edge).value() - 2.0).abs() < 1e-12);
        assert_eq!(MaxDistance::point_to_edge(point, &edge).value(), 2f64.hypot(0.5));
    }
}
