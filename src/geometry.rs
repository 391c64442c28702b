//! Planar distance kernels between points, edges and axis-aligned rectangles.
//!
//! Each primitive pair has a `min_*` form (distance between the closest points) and a `max_*`
//! form (distance between the furthest points). Exact point and edge distances are delegated to
//! [`geo`]'s [`Euclidean`] metric space.

use geo::algorithm::{Distance, Euclidean};
use geo::{coord, Coord, Line, Rect};

/// 1D distance from a value to a range.
#[inline]
pub(crate) fn axis_dist(k: f64, min: f64, max: f64) -> f64 {
    if k < min {
        min - k
    } else if k <= max {
        0.0
    } else {
        k - max
    }
}

/// 1D distance from a value to the far end of a range.
#[inline]
fn axis_far_dist(k: f64, min: f64, max: f64) -> f64 {
    (k - min).abs().max((max - k).abs())
}

#[inline]
fn corners(rect: &Rect<f64>) -> [Coord<f64>; 4] {
    let (min, max) = (rect.min(), rect.max());
    [
        min,
        coord! { x: min.x, y: max.y },
        coord! { x: max.x, y: min.y },
        max,
    ]
}

/// Returns `true` if the closed rectangle contains the point.
#[inline]
pub fn rect_contains_point(rect: &Rect<f64>, point: Coord<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Returns `true` if the two closed rectangles share at least one point.
#[inline]
pub fn rects_intersect(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    if a.max().x < b.min().x {
        return false;
    }
    if a.max().y < b.min().y {
        return false;
    }
    if a.min().x > b.max().x {
        return false;
    }
    if a.min().y > b.max().y {
        return false;
    }
    true
}

/// Grow a rectangle by `distance` on every side.
pub fn expand_rect(rect: &Rect<f64>, distance: f64) -> Rect<f64> {
    let (min, max) = (rect.min(), rect.max());
    Rect::new(
        coord! { x: min.x - distance, y: min.y - distance },
        coord! { x: max.x + distance, y: max.y + distance },
    )
}

/// The smallest rectangle containing both inputs.
pub fn union_rect(a: &Rect<f64>, b: &Rect<f64>) -> Rect<f64> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Returns `true` if the edge passes through the closed rectangle.
pub fn edge_intersects_rect(edge: &Line<f64>, rect: &Rect<f64>) -> bool {
    min_edge_to_rect(edge, rect) == 0.0
}

#[inline]
pub fn min_point_to_point(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(a, b)
}

#[inline]
pub fn min_point_to_edge(point: Coord<f64>, edge: &Line<f64>) -> f64 {
    Euclidean.distance(point, edge)
}

#[inline]
pub fn min_edge_to_edge(a: &Line<f64>, b: &Line<f64>) -> f64 {
    Euclidean.distance(a, b)
}

#[inline]
pub fn min_point_to_rect(point: Coord<f64>, rect: &Rect<f64>) -> f64 {
    let dx = axis_dist(point.x, rect.min().x, rect.max().x);
    let dy = axis_dist(point.y, rect.min().y, rect.max().y);
    dx.hypot(dy)
}

/// Zero when the edge touches the rectangle, otherwise the distance to the nearest side.
pub fn min_edge_to_rect(edge: &Line<f64>, rect: &Rect<f64>) -> f64 {
    if rect_contains_point(rect, edge.start) || rect_contains_point(rect, edge.end) {
        return 0.0;
    }
    rect.to_lines()
        .iter()
        .map(|side| Euclidean.distance(edge, side))
        .fold(f64::INFINITY, f64::min)
}

#[inline]
pub fn min_rect_to_rect(a: &Rect<f64>, b: &Rect<f64>) -> f64 {
    let dx = (b.min().x - a.max().x).max(a.min().x - b.max().x).max(0.0);
    let dy = (b.min().y - a.max().y).max(a.min().y - b.max().y).max(0.0);
    dx.hypot(dy)
}

#[inline]
pub fn max_point_to_point(a: Coord<f64>, b: Coord<f64>) -> f64 {
    min_point_to_point(a, b)
}

/// The distance to an edge is convex along the edge, so the maximum is at an endpoint.
#[inline]
pub fn max_point_to_edge(point: Coord<f64>, edge: &Line<f64>) -> f64 {
    min_point_to_point(point, edge.start).max(min_point_to_point(point, edge.end))
}

#[inline]
pub fn max_edge_to_edge(a: &Line<f64>, b: &Line<f64>) -> f64 {
    max_point_to_edge(a.start, b).max(max_point_to_edge(a.end, b))
}

#[inline]
pub fn max_point_to_rect(point: Coord<f64>, rect: &Rect<f64>) -> f64 {
    let dx = axis_far_dist(point.x, rect.min().x, rect.max().x);
    let dy = axis_far_dist(point.y, rect.min().y, rect.max().y);
    dx.hypot(dy)
}

#[inline]
pub fn max_edge_to_rect(edge: &Line<f64>, rect: &Rect<f64>) -> f64 {
    max_point_to_rect(edge.start, rect).max(max_point_to_rect(edge.end, rect))
}

pub fn max_rect_to_rect(a: &Rect<f64>, b: &Rect<f64>) -> f64 {
    corners(a)
        .iter()
        .map(|corner| max_point_to_rect(*corner, b))
        .fold(0.0, f64::max)
}
