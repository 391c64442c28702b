use geo::Coord;

use crate::index::iterator::IndexIterator;
use crate::index::shape::{ItemGeometry, Shape};
use crate::index::IndexCell;

/// A trait for searching and accessing data out of a hierarchical cell index.
///
/// Implementors only provide the sorted cells and the shapes they reference; traversal and item
/// lookup are derived from those. The trait is object safe so that query targets can inspect an
/// index without knowing its concrete type.
pub trait SpatialIndex {
    /// The non-empty cells of the index, sorted by cell id and pairwise disjoint.
    fn cells(&self) -> &[IndexCell];

    /// All shapes of the index, addressed by shape id.
    fn shapes(&self) -> &[Shape];

    /// The total number of items across all shapes.
    fn num_items(&self) -> usize {
        self.shapes().iter().map(Shape::num_items).sum()
    }

    fn num_shapes(&self) -> usize {
        self.shapes().len()
    }

    /// Returns `true` if the index contains no items.
    fn is_empty(&self) -> bool {
        self.cells().is_empty()
    }

    /// The geometry of an item, or `None` for ids outside the index (including the `-1` interior
    /// and empty sentinels).
    fn item(&self, shape_id: i32, item_id: i32) -> Option<ItemGeometry> {
        let shape_id = usize::try_from(shape_id).ok()?;
        let item_id = usize::try_from(item_id).ok()?;
        self.shapes().get(shape_id)?.item(item_id).copied()
    }

    /// Returns `true` if the shape has an interior containing the point.
    fn shape_contains(&self, shape_id: i32, point: Coord<f64>) -> bool {
        usize::try_from(shape_id)
            .ok()
            .and_then(|shape_id| self.shapes().get(shape_id))
            .is_some_and(|shape| shape.contains(point))
    }

    /// A cursor positioned at the first cell of the index.
    fn iter(&self) -> IndexIterator<'_> {
        IndexIterator::new(self.cells())
    }

    /// Call `visitor` with the id of every shape whose interior contains `point`, in increasing
    /// id order. Stops early and returns `false` as soon as the visitor returns `false`.
    fn visit_containing_shapes(
        &self,
        point: Coord<f64>,
        visitor: &mut dyn FnMut(i32) -> bool,
    ) -> bool {
        for (shape_id, shape) in self.shapes().iter().enumerate() {
            if shape.contains(point) && !visitor(shape_id as i32) {
                return false;
            }
        }
        true
    }
}
