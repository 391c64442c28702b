//! Small cell coverings of planar regions.

use geo::{coord, Rect};

use crate::cell::{edge_length_at, CellId, LEAF_SIZE, MAX_LEVEL};

/// Cover a rectangle with at most `max_cells` cells (`max_cells` is raised to 1 if zero).
///
/// The rectangle is first clipped to the unit square; an empty intersection yields an empty
/// covering. Cells are chosen at the finest level whose cells are at least as large as the
/// rectangle, which bounds the covering to four cells, and coarser levels are used until the
/// cell budget is met. The result is sorted, disjoint, and has complete sibling groups merged
/// into their parent.
///
/// ```
/// use geo::{coord, Rect};
/// use geo_closest::covering::fast_covering;
///
/// let rect = Rect::new(coord! { x: 0.1, y: 0.1 }, coord! { x: 0.2, y: 0.2 });
/// let covering = fast_covering(&rect, 4);
/// assert!(!covering.is_empty() && covering.len() <= 4);
/// ```
pub fn fast_covering(rect: &Rect<f64>, max_cells: usize) -> Vec<CellId> {
    let max_cells = max_cells.max(1);
    let min_x = rect.min().x.max(0.0);
    let min_y = rect.min().y.max(0.0);
    let max_x = rect.max().x.min(1.0);
    let max_y = rect.max().y.min(1.0);
    if !(min_x <= max_x && min_y <= max_y) {
        return vec![];
    }
    let clipped = Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y });

    let mut level = level_for_size(clipped.width().max(clipped.height()));
    let mut cells = cells_at_level(&clipped, level);
    while cells.len() > max_cells && level > 0 {
        level -= 1;
        cells = cells_at_level(&clipped, level);
    }
    normalize(&mut cells);
    cells
}

/// The finest level whose cells have an edge length of at least `size`.
fn level_for_size(size: f64) -> u8 {
    if !(size > 0.0) {
        return MAX_LEVEL;
    }
    let mut level = 0;
    while level < MAX_LEVEL && edge_length_at(level + 1) >= size {
        level += 1;
    }
    level
}

fn cells_at_level(rect: &Rect<f64>, level: u8) -> Vec<CellId> {
    let shift = (MAX_LEVEL - level) as u32;
    let lo = |v: f64| cell_coordinate(v, level);
    let (i0, i1) = (lo(rect.min().x), lo(rect.max().x));
    let (j0, j1) = (lo(rect.min().y), lo(rect.max().y));

    let mut cells = Vec::with_capacity(((i1 - i0 + 1) * (j1 - j0 + 1)) as usize);
    for i in i0..=i1 {
        for j in j0..=j1 {
            cells.push(CellId::from_ij(i << shift, j << shift, level));
        }
    }
    cells.sort_unstable();
    cells
}

/// Index of the cell along one axis at `level` that contains `value`.
fn cell_coordinate(value: f64, level: u8) -> u32 {
    let cells_per_side = (LEAF_SIZE >> (MAX_LEVEL - level) as u32) as f64;
    let scaled = (value * cells_per_side).floor();
    if scaled < 0.0 {
        0
    } else if scaled >= cells_per_side - 1.0 {
        (cells_per_side - 1.0) as u32
    } else {
        scaled as u32
    }
}

/// Sort, drop cells contained by other cells, and replace complete sibling groups with their
/// parent.
pub fn normalize(cells: &mut Vec<CellId>) {
    cells.sort_unstable();
    let mut output: Vec<CellId> = Vec::with_capacity(cells.len());
    for &id in cells.iter() {
        if output.last().is_some_and(|last| last.contains(id)) {
            continue;
        }
        // Discard any previous cells contained by this one.
        while output.last().is_some_and(|last| id.contains(*last)) {
            output.pop();
        }
        let mut id = id;
        // Merge complete groups of four siblings into their parent.
        while output.len() >= 3 && !id.is_root() {
            let n = output.len();
            let parent = id.parent();
            let siblings = parent.children();
            if output[n - 3..] == siblings[..3] && id == siblings[3] {
                output.truncate(n - 3);
                id = parent;
            } else {
                break;
            }
        }
        output.push(id);
    }
    *cells = output;
}

/// The intersection of two sorted, disjoint cell sets.
///
/// Wherever a cell of one set contains a cell of the other, the smaller cell is kept.
pub fn intersection(x: &[CellId], y: &[CellId]) -> Vec<CellId> {
    let mut output = vec![];
    for &a in x {
        for &b in y {
            if a.contains(b) {
                output.push(b);
            } else if b.contains(a) {
                output.push(a);
            }
        }
    }
    output.sort_unstable();
    output.dedup();
    output
}

/// Returns `true` if some cell of the sorted, disjoint set contains `id`.
pub fn contains(cells: &[CellId], id: CellId) -> bool {
    let pos = cells.partition_point(|cell| *cell < id);
    if pos < cells.len() && cells[pos].range_min() <= id {
        return true;
    }
    pos > 0 && cells[pos - 1].range_max() >= id
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn covers_small_rect() {
        let rect = Rect::new(coord! { x: 0.30, y: 0.30 }, coord! { x: 0.31, y: 0.32 });
        let covering = fast_covering(&rect, 4);
        assert!(!covering.is_empty());
        assert!(covering.len() <= 4);
        for corner in [rect.min(), rect.max(), coord! { x: 0.30, y: 0.32 }] {
            assert!(contains(&covering, CellId::from_point(corner)));
        }
        for cell in covering.iter() {
            // cells are no smaller than the rectangle
            assert!(cell.edge_length() >= 0.02);
        }
    }

    #[test]
    fn respects_cell_budget() {
        let rect = Rect::new(coord! { x: 0.49, y: 0.49 }, coord! { x: 0.51, y: 0.51 });
        assert_eq!(fast_covering(&rect, 4).len(), 4);
        assert_eq!(fast_covering(&rect, 1), vec![CellId::root()]);
    }

    #[test]
    fn clips_to_domain() {
        let outside = Rect::new(coord! { x: 2.0, y: 2.0 }, coord! { x: 3.0, y: 3.0 });
        assert!(fast_covering(&outside, 4).is_empty());

        let everything = Rect::new(coord! { x: -5.0, y: -5.0 }, coord! { x: 5.0, y: 5.0 });
        assert_eq!(fast_covering(&everything, 4), vec![CellId::root()]);
    }

    #[test]
    fn normalize_merges_siblings() {
        let parent = CellId::root().child(2);
        let mut cells = parent.children().to_vec();
        cells.push(parent.child(1).child(3));
        cells.reverse();
        normalize(&mut cells);
        assert_eq!(cells, vec![parent]);
    }

    #[test]
    fn intersection_keeps_smaller_cells() {
        let root = CellId::root();
        let x = vec![root.child(0), root.child(3)];
        let y = vec![root.child(0).child(1), root.child(1), root.child(3).child(2).child(0)];
        assert_eq!(
            intersection(&x, &y),
            vec![root.child(0).child(1), root.child(3).child(2).child(0)]
        );
        assert!(intersection(&x, &[]).is_empty());
    }
}
