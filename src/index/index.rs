use tinyvec::TinyVec;

use crate::cell::CellId;
use crate::error::{GeoClosestError, Result};
use crate::index::r#trait::SpatialIndex;
use crate::index::shape::Shape;

/// A reference from an index cell to one item of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemRef {
    pub shape_id: u32,
    pub item_id: u32,
}

impl ItemRef {
    pub fn new(shape_id: u32, item_id: u32) -> Self {
        Self { shape_id, item_id }
    }
}

/// A non-empty cell of the index and the items intersecting it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCell {
    pub(crate) id: CellId,
    pub(crate) items: TinyVec<[ItemRef; 4]>,
}

impl IndexCell {
    pub fn new(id: CellId, items: impl IntoIterator<Item = ItemRef>) -> Self {
        Self {
            id,
            items: items.into_iter().collect(),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }
}

/// An owned cell index.
///
/// Usually this will be created from scratch via
/// [`CellIndexBuilder`][crate::index::CellIndexBuilder].
#[derive(Debug, Clone, PartialEq)]
pub struct CellIndex {
    pub(crate) cells: Vec<IndexCell>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) num_items: usize,
}

impl CellIndex {
    /// Construct an index from precomputed cells, checking that the cells are valid, sorted and
    /// disjoint and that every item reference resolves.
    pub fn try_new(cells: Vec<IndexCell>, shapes: Vec<Shape>) -> Result<Self> {
        let num_items = validate(&cells, &shapes)?;
        Ok(Self {
            cells,
            shapes,
            num_items,
        })
    }

    pub fn into_inner(self) -> (Vec<IndexCell>, Vec<Shape>) {
        (self.cells, self.shapes)
    }

    pub fn as_index_ref(&self) -> CellIndexRef<'_> {
        CellIndexRef {
            cells: &self.cells,
            shapes: &self.shapes,
            num_items: self.num_items,
        }
    }
}

/// A reference on cells and shapes stored elsewhere.
///
/// Usually this will be created from a [`CellIndex`] via its
/// [`as_index_ref`][CellIndex::as_index_ref] method, but it can also be created from any
/// existing cell and shape slices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellIndexRef<'a> {
    pub(crate) cells: &'a [IndexCell],
    pub(crate) shapes: &'a [Shape],
    pub(crate) num_items: usize,
}

impl<'a> CellIndexRef<'a> {
    pub fn try_new(cells: &'a [IndexCell], shapes: &'a [Shape]) -> Result<Self> {
        let num_items = validate(cells, shapes)?;
        Ok(Self {
            cells,
            shapes,
            num_items,
        })
    }
}

/// Returns the total number of items.
fn validate(cells: &[IndexCell], shapes: &[Shape]) -> Result<usize> {
    if i32::try_from(shapes.len()).is_err() {
        return Err(GeoClosestError::General(format!(
            "Too many shapes: {}.",
            shapes.len()
        )));
    }
    let mut num_items = 0;
    for (shape_id, shape) in shapes.iter().enumerate() {
        if i32::try_from(shape.num_items()).is_err() {
            return Err(GeoClosestError::InvalidShape {
                shape_id,
                reason: format!("too many items ({})", shape.num_items()),
            });
        }
        num_items += shape.num_items();
    }

    let mut prev: Option<CellId> = None;
    for cell in cells {
        if !cell.id.is_valid() {
            return Err(GeoClosestError::InvalidCell(cell.id.raw()));
        }
        if prev.is_some_and(|prev| prev.range_max() >= cell.id.range_min()) {
            return Err(GeoClosestError::General(
                "Index cells must be sorted and pairwise disjoint.".to_string(),
            ));
        }
        for item in cell.items.iter() {
            let resolved = shapes
                .get(item.shape_id as usize)
                .and_then(|shape| shape.item(item.item_id as usize));
            if resolved.is_none() {
                return Err(GeoClosestError::General(format!(
                    "Cell {} references missing item {} of shape {}.",
                    cell.id, item.item_id, item.shape_id
                )));
            }
        }
        prev = Some(cell.id);
    }
    Ok(num_items)
}

impl SpatialIndex for CellIndex {
    fn cells(&self) -> &[IndexCell] {
        &self.cells
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn num_items(&self) -> usize {
        self.num_items
    }
}

impl SpatialIndex for CellIndexRef<'_> {
    fn cells(&self) -> &[IndexCell] {
        self.cells
    }

    fn shapes(&self) -> &[Shape] {
        self.shapes
    }

    fn num_items(&self) -> usize {
        self.num_items
    }
}

#[cfg(test)]
mod test {
    use geo::coord;

    use super::*;

    #[test]
    fn rejects_overlapping_cells() {
        let root = CellId::root();
        let shapes = vec![Shape::points([coord! { x: 0.1, y: 0.1 }])];
        let item = ItemRef::new(0, 0);

        let overlapping = vec![
            IndexCell::new(root.child(0), [item]),
            IndexCell::new(root.child(0).child(3), [item]),
        ];
        assert!(CellIndex::try_new(overlapping, shapes.clone()).is_err());

        let invalid = vec![IndexCell::new(CellId::none(), [item])];
        assert!(matches!(
            CellIndex::try_new(invalid, shapes.clone()),
            Err(GeoClosestError::InvalidCell(0))
        ));

        let dangling = vec![IndexCell::new(root.child(0), [ItemRef::new(0, 1)])];
        assert!(CellIndex::try_new(dangling, shapes.clone()).is_err());

        let valid = vec![IndexCell::new(root.child(0), [item])];
        let index = CellIndex::try_new(valid, shapes).unwrap();
        assert_eq!(index.num_items(), 1);
    }

    #[test]
    fn owned_and_ref_agree() {
        let root = CellId::root();
        let shapes = vec![
            Shape::points([coord! { x: 0.1, y: 0.1 }, coord! { x: 0.9, y: 0.9 }]),
            Shape::cells([root.child(1).child(2)]),
        ];
        let cells = vec![
            IndexCell::new(root.child(0), [ItemRef::new(0, 0)]),
            IndexCell::new(root.child(1), [ItemRef::new(1, 0)]),
            IndexCell::new(root.child(3), [ItemRef::new(0, 1)]),
        ];
        let owned = CellIndex::try_new(cells.clone(), shapes.clone()).unwrap();
        let borrowed = CellIndexRef::try_new(&cells, &shapes).unwrap();
        assert_eq!(owned.as_index_ref(), borrowed);
        assert_eq!(borrowed.num_items(), 3);
        assert_eq!(borrowed.num_shapes(), 2);
        assert_eq!(
            borrowed.item(0, 1),
            Some(crate::index::ItemGeometry::Point(coord! { x: 0.9, y: 0.9 }))
        );
        assert_eq!(borrowed.item(0, -1), None);
        assert_eq!(borrowed.item(2, 0), None);
        assert!(!borrowed.shape_contains(0, coord! { x: 0.1, y: 0.1 }));
    }
}
