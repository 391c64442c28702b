use geo::{Coord, Polygon};
use geo_traits::CoordTrait;
use tracing::debug;

use crate::cell::{CellId, MAX_LEVEL};
use crate::error::{GeoClosestError, Result};
use crate::index::index::{CellIndex, IndexCell, ItemRef};
use crate::index::shape::Shape;

/// The default number of items per cell used by [`CellIndexBuilder::new`].
pub const DEFAULT_MAX_ITEMS_PER_CELL: usize = 10;

/// The default deepest level cells are subdivided to.
pub const DEFAULT_MAX_LEVEL: u8 = 20;

#[derive(Debug, Clone)]
enum PendingShape {
    Points(Vec<Coord<f64>>),
    Polyline(Vec<Coord<f64>>),
    Polygon(Polygon<f64>),
    Cells(Vec<CellId>),
}

/// A builder to create a [`CellIndex`].
///
/// Cells are subdivided from the root until each holds at most `max_items_per_cell` items, or
/// no further subdivision separates them.
///
/// ```
/// use geo::coord;
/// use geo_closest::index::{CellIndexBuilder, SpatialIndex};
///
/// let mut builder = CellIndexBuilder::new();
/// builder.add_points(&[coord! { x: 0.1, y: 0.2 }, coord! { x: 0.7, y: 0.4 }]);
/// builder.add_polyline(&[coord! { x: 0.5, y: 0.5 }, coord! { x: 0.6, y: 0.9 }]);
/// let index = builder.finish().unwrap();
/// assert_eq!(index.num_items(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CellIndexBuilder {
    shapes: Vec<PendingShape>,
    max_items_per_cell: usize,
    max_level: u8,
}

impl CellIndexBuilder {
    /// Create a new builder with the default cell capacity.
    pub fn new() -> Self {
        Self::new_with_max_items(DEFAULT_MAX_ITEMS_PER_CELL)
    }

    /// Create a new builder with the provided cell capacity.
    pub fn new_with_max_items(max_items_per_cell: usize) -> Self {
        assert!(max_items_per_cell > 0, "max_items_per_cell must be positive");
        Self {
            shapes: vec![],
            max_items_per_cell,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Set the deepest level cells are subdivided to.
    pub fn with_max_level(mut self, max_level: u8) -> Self {
        assert!(max_level <= MAX_LEVEL, "max_level must be at most {MAX_LEVEL}");
        self.max_level = max_level;
        self
    }

    pub fn max_items_per_cell(&self) -> usize {
        self.max_items_per_cell
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Add a shape made of points, one item per point.
    ///
    /// This returns the shape id, which results refer back to.
    pub fn add_points(&mut self, points: &[Coord<f64>]) -> u32 {
        self.push(PendingShape::Points(points.to_vec()))
    }

    /// Add a single point given through any [`CoordTrait`] implementation.
    pub fn add_coord(&mut self, coord: &impl CoordTrait<T = f64>) -> u32 {
        self.push(PendingShape::Points(vec![Coord {
            x: coord.x(),
            y: coord.y(),
        }]))
    }

    /// Add a polyline, one item per edge between consecutive vertices.
    pub fn add_polyline(&mut self, vertices: &[Coord<f64>]) -> u32 {
        self.push(PendingShape::Polyline(vertices.to_vec()))
    }

    /// Add a polygon, one item per ring edge. Its interior is reported by queries that include
    /// interiors.
    pub fn add_polygon(&mut self, polygon: Polygon<f64>) -> u32 {
        self.push(PendingShape::Polygon(polygon))
    }

    /// Add a shape made of cells, one item per cell.
    pub fn add_cells(&mut self, cells: &[CellId]) -> u32 {
        self.push(PendingShape::Cells(cells.to_vec()))
    }

    fn push(&mut self, shape: PendingShape) -> u32 {
        let shape_id = self.shapes.len();
        self.shapes.push(shape);
        shape_id as u32
    }

    /// Validate the added shapes and build the index.
    pub fn finish(self) -> Result<CellIndex> {
        let shapes = self
            .shapes
            .into_iter()
            .enumerate()
            .map(|(shape_id, shape)| into_shape(shape_id, shape))
            .collect::<Result<Vec<_>>>()?;

        let mut items = vec![];
        for (shape_id, shape) in shapes.iter().enumerate() {
            for item_id in 0..shape.num_items() {
                items.push(ItemRef::new(shape_id as u32, item_id as u32));
            }
        }

        let mut cells = vec![];
        subdivide(
            CellId::root(),
            items,
            &shapes,
            self.max_items_per_cell,
            self.max_level,
            &mut cells,
        );
        debug!(
            num_shapes = shapes.len(),
            num_cells = cells.len(),
            "built cell index"
        );
        CellIndex::try_new(cells, shapes)
    }
}

impl Default for CellIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_coord(coord: &Coord<f64>) -> Result<()> {
    if (0.0..=1.0).contains(&coord.x) && (0.0..=1.0).contains(&coord.y) {
        Ok(())
    } else {
        Err(GeoClosestError::OutOfDomain {
            x: coord.x,
            y: coord.y,
        })
    }
}

fn into_shape(shape_id: usize, shape: PendingShape) -> Result<Shape> {
    let invalid = |reason: &str| GeoClosestError::InvalidShape {
        shape_id,
        reason: reason.to_string(),
    };
    match shape {
        PendingShape::Points(points) => {
            if points.is_empty() {
                return Err(invalid("a point shape needs at least one point"));
            }
            points.iter().try_for_each(check_coord)?;
            Ok(Shape::points(points))
        }
        PendingShape::Polyline(vertices) => {
            if vertices.len() < 2 {
                return Err(invalid("a polyline needs at least 2 vertices"));
            }
            vertices.iter().try_for_each(check_coord)?;
            Ok(Shape::polyline(&vertices))
        }
        PendingShape::Polygon(polygon) => {
            // rings are closed, so a triangle has four coordinates
            if polygon.exterior().0.len() < 4 {
                return Err(invalid("a polygon needs at least 3 vertices"));
            }
            polygon
                .exterior()
                .coords()
                .chain(polygon.interiors().iter().flat_map(|ring| ring.coords()))
                .try_for_each(check_coord)?;
            Ok(Shape::polygon(polygon))
        }
        PendingShape::Cells(cells) => {
            if cells.is_empty() {
                return Err(invalid("a cell shape needs at least one cell"));
            }
            if let Some(cell) = cells.iter().find(|cell| !cell.is_valid()) {
                return Err(GeoClosestError::InvalidCell(cell.raw()));
            }
            Ok(Shape::cells(cells))
        }
    }
}

/// Emit the index cells below `id`, in increasing id order.
///
/// `items` are the items intersecting the closed rectangle of `id`.
fn subdivide(
    id: CellId,
    items: Vec<ItemRef>,
    shapes: &[Shape],
    max_items: usize,
    max_level: u8,
    out: &mut Vec<IndexCell>,
) {
    if items.is_empty() {
        return;
    }
    if items.len() <= max_items || id.level() >= max_level {
        out.push(IndexCell::new(id, items));
        return;
    }

    let children = id.children().map(|child| {
        let rect = child.rect();
        items
            .iter()
            .copied()
            .filter(|item| {
                shapes[item.shape_id as usize]
                    .item(item.item_id as usize)
                    .is_some_and(|geometry| geometry.intersects_rect(&rect))
            })
            .collect::<Vec<_>>()
    });

    // Splitting is pointless when every occupied child would hold all of the items.
    let occupied = children.iter().filter(|child| !child.is_empty()).count();
    let stalled = children
        .iter()
        .filter(|child| !child.is_empty())
        .all(|child| child.len() == items.len());
    if occupied > 1 && stalled {
        out.push(IndexCell::new(id, items));
        return;
    }

    for (child, child_items) in id.children().into_iter().zip(children) {
        subdivide(child, child_items, shapes, max_items, max_level, out);
    }
}
