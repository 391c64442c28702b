use geo::{Coord, Line, Rect};

use crate::cell::CellId;
use crate::closest::distance::Distance;
use crate::index::{ItemGeometry, SpatialIndex};

/// The geometry distances are measured to.
///
/// The `update_distance_*` probes compare the distance from the target to the given geometry
/// against `distance`. If it is better, they store it in `distance` and return `true`;
/// otherwise they leave `distance` untouched and return `false`.
pub trait DistanceTarget<D: Distance> {
    /// A rectangle containing the whole target, or `None` for an empty target.
    fn bound(&self) -> Option<Rect<f64>>;

    /// The point used to seed single-result searches.
    fn center(&self) -> Option<Coord<f64>> {
        self.bound().map(|bound| bound.center())
    }

    fn update_distance_to_point(&mut self, point: Coord<f64>, distance: &mut D) -> bool;

    fn update_distance_to_edge(&mut self, edge: &Line<f64>, distance: &mut D) -> bool;

    /// Probe the distance to every point of a cell. Used both for cell items and to bound the
    /// distance to everything indexed below a cell.
    fn update_distance_to_cell(&mut self, cell: CellId, distance: &mut D) -> bool;

    fn update_distance_to_item(&mut self, item: &ItemGeometry, distance: &mut D) -> bool {
        match item {
            ItemGeometry::Point(point) => self.update_distance_to_point(*point, distance),
            ItemGeometry::Edge(edge) => self.update_distance_to_edge(edge, distance),
            ItemGeometry::Cell(cell) => self.update_distance_to_cell(*cell, distance),
        }
    }

    /// Call `visitor` with the ids of shapes in `index` that contain the target. Returns `false`
    /// if the visitor asked to stop.
    ///
    /// The default target contains nothing.
    fn visit_containing_shapes(
        &mut self,
        index: &dyn SpatialIndex,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        let _ = (index, visitor);
        true
    }

    /// Hand the target the query's error tolerance. Returns `true` if the target uses it to
    /// return distances that may be up to `max_error` worse than the truth.
    fn set_max_error(&mut self, max_error: f64) -> bool {
        let _ = max_error;
        false
    }

    /// Indexes with at most this many items are searched exhaustively.
    fn max_brute_force_index_size(&self) -> usize;
}

/// Store `candidate` in `distance` if it is better.
#[inline]
pub(crate) fn update_distance<D: Distance>(candidate: D, distance: &mut D) -> bool {
    if candidate < *distance {
        *distance = candidate;
        true
    } else {
        false
    }
}
