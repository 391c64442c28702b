//! Concrete query targets.

use geo::{Coord, Line, Rect};

use crate::cell::CellId;
use crate::closest::distance::Distance;
use crate::closest::options::Options;
use crate::closest::query::Query;
use crate::closest::r#trait::{update_distance, DistanceTarget};
use crate::geometry::union_rect;
use crate::index::{Shape, SpatialIndex};

/// Measure distances to a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTarget {
    point: Coord<f64>,
}

impl PointTarget {
    pub fn new(point: Coord<f64>) -> Self {
        Self { point }
    }

    pub fn point(&self) -> Coord<f64> {
        self.point
    }
}

impl<D: Distance> DistanceTarget<D> for PointTarget {
    fn bound(&self) -> Option<Rect<f64>> {
        Some(Rect::new(self.point, self.point))
    }

    fn update_distance_to_point(&mut self, point: Coord<f64>, distance: &mut D) -> bool {
        update_distance(D::point_to_point(self.point, point), distance)
    }

    fn update_distance_to_edge(&mut self, edge: &Line<f64>, distance: &mut D) -> bool {
        update_distance(D::point_to_edge(self.point, edge), distance)
    }

    fn update_distance_to_cell(&mut self, cell: CellId, distance: &mut D) -> bool {
        update_distance(D::point_to_rect(self.point, &cell.rect()), distance)
    }

    fn visit_containing_shapes(
        &mut self,
        index: &dyn SpatialIndex,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        index.visit_containing_shapes(self.point, visitor)
    }

    fn max_brute_force_index_size(&self) -> usize {
        120
    }
}

/// Measure distances to a straight edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTarget {
    edge: Line<f64>,
}

impl EdgeTarget {
    pub fn new(start: Coord<f64>, end: Coord<f64>) -> Self {
        Self {
            edge: Line::new(start, end),
        }
    }

    pub fn edge(&self) -> &Line<f64> {
        &self.edge
    }
}

impl<D: Distance> DistanceTarget<D> for EdgeTarget {
    fn bound(&self) -> Option<Rect<f64>> {
        Some(Rect::new(self.edge.start, self.edge.end))
    }

    fn update_distance_to_point(&mut self, point: Coord<f64>, distance: &mut D) -> bool {
        update_distance(D::point_to_edge(point, &self.edge), distance)
    }

    fn update_distance_to_edge(&mut self, edge: &Line<f64>, distance: &mut D) -> bool {
        update_distance(D::edge_to_edge(&self.edge, edge), distance)
    }

    fn update_distance_to_cell(&mut self, cell: CellId, distance: &mut D) -> bool {
        update_distance(D::edge_to_rect(&self.edge, &cell.rect()), distance)
    }

    /// An edge inside a polygon has its first vertex inside it too.
    fn visit_containing_shapes(
        &mut self,
        index: &dyn SpatialIndex,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        index.visit_containing_shapes(self.edge.start, visitor)
    }

    fn max_brute_force_index_size(&self) -> usize {
        60
    }
}

/// Measure distances to a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTarget {
    cell: CellId,
    rect: Rect<f64>,
}

impl CellTarget {
    pub fn new(cell: CellId) -> Self {
        Self {
            cell,
            rect: cell.rect(),
        }
    }

    pub fn cell(&self) -> CellId {
        self.cell
    }
}

impl<D: Distance> DistanceTarget<D> for CellTarget {
    fn bound(&self) -> Option<Rect<f64>> {
        Some(self.rect)
    }

    fn update_distance_to_point(&mut self, point: Coord<f64>, distance: &mut D) -> bool {
        update_distance(D::point_to_rect(point, &self.rect), distance)
    }

    fn update_distance_to_edge(&mut self, edge: &Line<f64>, distance: &mut D) -> bool {
        update_distance(D::edge_to_rect(edge, &self.rect), distance)
    }

    fn update_distance_to_cell(&mut self, cell: CellId, distance: &mut D) -> bool {
        update_distance(D::rect_to_rect(&self.rect, &cell.rect()), distance)
    }

    fn visit_containing_shapes(
        &mut self,
        index: &dyn SpatialIndex,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        index.visit_containing_shapes(self.cell.center(), visitor)
    }

    fn max_brute_force_index_size(&self) -> usize {
        30
    }
}

/// Measure distances to everything stored in another index.
///
/// Each probe runs a nested single-result query over the target index. When the outer query
/// allows an error tolerance the nested queries use it too, so the distances they return may be
/// loose by up to that amount.
pub struct IndexTarget<'a, I: SpatialIndex, D: Distance> {
    query: Query<'a, I, D>,
    options: Options<D>,
    bound: Option<Rect<f64>>,
}

impl<'a, I: SpatialIndex, D: Distance> IndexTarget<'a, I, D> {
    pub fn new(index: &'a I) -> Self {
        let bound = index
            .shapes()
            .iter()
            .filter_map(Shape::bounding_rect)
            .reduce(|a, b| union_rect(&a, &b));
        let mut options = Options::default();
        options.set_max_results(1);
        Self {
            query: Query::new(index),
            options,
            bound,
        }
    }

    pub fn include_interiors(&self) -> bool {
        self.options.include_interiors()
    }

    /// Whether a query point inside a polygon of the target index is at distance zero from it.
    pub fn set_include_interiors(&mut self, include_interiors: bool) {
        self.options.set_include_interiors(include_interiors);
    }

    pub fn use_brute_force(&self) -> bool {
        self.options.use_brute_force()
    }

    pub fn set_use_brute_force(&mut self, use_brute_force: bool) {
        self.options.set_use_brute_force(use_brute_force);
    }

    fn update_distance_with(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        distance: &mut D,
    ) -> bool {
        self.options.set_max_distance(*distance);
        let result = self.query.find_closest_one(target, &self.options);
        if result.is_empty() {
            return false;
        }
        *distance = result.distance();
        true
    }
}

impl<I: SpatialIndex, D: Distance> DistanceTarget<D> for IndexTarget<'_, I, D> {
    fn bound(&self) -> Option<Rect<f64>> {
        self.bound
    }

    fn update_distance_to_point(&mut self, point: Coord<f64>, distance: &mut D) -> bool {
        self.update_distance_with(&mut PointTarget::new(point), distance)
    }

    fn update_distance_to_edge(&mut self, edge: &Line<f64>, distance: &mut D) -> bool {
        self.update_distance_with(&mut EdgeTarget::new(edge.start, edge.end), distance)
    }

    fn update_distance_to_cell(&mut self, cell: CellId, distance: &mut D) -> bool {
        self.update_distance_with(&mut CellTarget::new(cell), distance)
    }

    /// Tests one point per shape of the target index. A shape of the query index is reported
    /// as soon as it contains any of these points.
    fn visit_containing_shapes(
        &mut self,
        index: &dyn SpatialIndex,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        for shape in self.query.index().shapes() {
            let Some(point) = shape.representative_point() else {
                continue;
            };
            if !index.visit_containing_shapes(point, visitor) {
                return false;
            }
        }
        true
    }

    fn set_max_error(&mut self, max_error: f64) -> bool {
        self.options.set_max_error(max_error);
        true
    }

    fn max_brute_force_index_size(&self) -> usize {
        25
    }
}
