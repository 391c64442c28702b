//! Positioned traversal over the sorted cells of an index.

use geo::Coord;

use crate::cell::CellId;
use crate::index::IndexCell;

/// How a cell relates to the cells of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRelation {
    /// The cell is contained by an index cell.
    Indexed,
    /// The cell is subdivided into one or more index cells.
    Subdivided,
    /// The cell does not intersect any index cell.
    Disjoint,
}

/// A cursor over the cells of an index, in increasing cell id order.
///
/// The cursor may also point one past the last cell, in which case it is [`done`][Self::done].
#[derive(Debug, Clone)]
pub struct IndexIterator<'a> {
    cells: &'a [IndexCell],
    pos: usize,
}

impl<'a> IndexIterator<'a> {
    pub fn new(cells: &'a [IndexCell]) -> Self {
        Self { cells, pos: 0 }
    }

    /// Position the iterator at the first cell.
    pub fn begin(&mut self) {
        self.pos = 0;
    }

    /// Position the iterator past the last cell.
    pub fn finish(&mut self) {
        self.pos = self.cells.len();
    }

    pub fn done(&self) -> bool {
        self.pos >= self.cells.len()
    }

    /// The id of the current cell, or [`CellId::sentinel`] if the iterator is done.
    pub fn id(&self) -> CellId {
        self.cells
            .get(self.pos)
            .map_or(CellId::sentinel(), |cell| cell.id)
    }

    pub fn cell(&self) -> Option<&'a IndexCell> {
        self.cells.get(self.pos)
    }

    /// The position of the current cell within the index.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn next(&mut self) {
        debug_assert!(!self.done());
        self.pos += 1;
    }

    /// Move to the previous cell. Returns `false` (and does not move) at the first cell.
    pub fn prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }

    /// Position the iterator at the first cell whose id is at least `target`.
    pub fn seek(&mut self, target: CellId) {
        self.pos = self.cells.partition_point(|cell| cell.id < target);
    }

    /// Position the iterator at the cell containing the point and return `true`, or return
    /// `false` if no index cell contains it.
    pub fn locate_point(&mut self, point: Coord<f64>) -> bool {
        let target = CellId::from_point(point);
        self.seek(target);
        if !self.done() && self.id().range_min() <= target {
            return true;
        }
        if self.prev() && self.id().range_max() >= target {
            return true;
        }
        false
    }

    /// Classify `target` against the index cells.
    ///
    /// For [`CellRelation::Indexed`] the iterator is left at the index cell containing `target`;
    /// for [`CellRelation::Subdivided`] at the first index cell within it.
    pub fn locate_cell(&mut self, target: CellId) -> CellRelation {
        self.seek(target.range_min());
        if !self.done() {
            if self.id() >= target && self.id().range_min() <= target {
                return CellRelation::Indexed;
            }
            if self.id() <= target.range_max() {
                return CellRelation::Subdivided;
            }
        }
        if self.prev() && self.id().range_max() >= target {
            return CellRelation::Indexed;
        }
        CellRelation::Disjoint
    }
}

#[cfg(test)]
mod test {
    use geo::coord;

    use super::*;

    fn cells() -> Vec<IndexCell> {
        let root = CellId::root();
        vec![
            IndexCell::new(root.child(0).child(1), []),
            IndexCell::new(root.child(1), []),
            IndexCell::new(root.child(3).child(0).child(2), []),
        ]
    }

    #[test]
    fn seek_and_step() {
        let cells = cells();
        let mut iter = IndexIterator::new(&cells);
        assert_eq!(iter.id(), cells[0].id);
        assert!(!iter.prev());

        iter.seek(CellId::root().child(2));
        assert_eq!(iter.position(), 2);
        iter.next();
        assert!(iter.done());
        assert_eq!(iter.id(), CellId::sentinel());
        assert!(iter.cell().is_none());

        iter.begin();
        assert_eq!(iter.position(), 0);
        iter.finish();
        assert!(iter.done());
    }

    #[test]
    fn locate_points() {
        let cells = cells();
        let mut iter = IndexIterator::new(&cells);
        assert!(iter.locate_point(coord! { x: 0.3, y: 0.7 }));
        assert_eq!(iter.position(), 1);
        assert!(iter.locate_point(coord! { x: 0.1, y: 0.3 }));
        assert_eq!(iter.position(), 0);
        assert!(!iter.locate_point(coord! { x: 0.1, y: 0.1 }));
        assert!(!iter.locate_point(coord! { x: 0.9, y: 0.9 }));
    }

    #[test]
    fn locate_cells() {
        let cells = cells();
        let root = CellId::root();
        let mut iter = IndexIterator::new(&cells);

        assert_eq!(iter.locate_cell(root), CellRelation::Subdivided);
        assert_eq!(iter.position(), 0);

        assert_eq!(iter.locate_cell(root.child(1)), CellRelation::Indexed);
        assert_eq!(iter.position(), 1);

        assert_eq!(iter.locate_cell(root.child(1).child(2)), CellRelation::Indexed);
        assert_eq!(iter.position(), 1);

        assert_eq!(iter.locate_cell(root.child(3)), CellRelation::Subdivided);
        assert_eq!(iter.position(), 2);

        assert_eq!(iter.locate_cell(root.child(2)), CellRelation::Disjoint);
        assert_eq!(iter.locate_cell(root.child(0).child(0)), CellRelation::Disjoint);
    }
}
