use std::fmt;

use geo::{coord, Coord, Rect};

/// The maximum subdivision level of the cell hierarchy.
pub const MAX_LEVEL: u8 = 30;

/// Number of bits used by a cell id: two per level plus the marker bit.
const POS_BITS: u32 = 2 * MAX_LEVEL as u32 + 1;

/// Number of leaf cells along each side of the unit square.
pub(crate) const LEAF_SIZE: u32 = 1 << MAX_LEVEL;

/// A node of the quadtree decomposition of the unit square.
///
/// The id packs the path from the root into a `u64`: two bits per level (bit 1 selects the `x`
/// half, bit 0 the `y` half), followed by a single `1` marker bit and trailing zeros. Cells at
/// every level share one key space, so that sorting by id lays cells out in Z-order and every
/// descendant of a cell falls within [`CellId::range_min`]..=[`CellId::range_max`].
///
/// ```
/// use geo_closest::CellId;
///
/// let root = CellId::root();
/// let child = root.child(2);
/// assert_eq!(child.level(), 1);
/// assert_eq!(child.parent(), root);
/// assert!(root.contains(child.child(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CellId(u64);

impl CellId {
    /// Construct a cell id from its raw `u64` representation.
    ///
    /// The result is not checked; see [`CellId::is_valid`].
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw `u64` representation of this cell.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// An invalid cell id, used as a placeholder.
    pub const fn none() -> Self {
        Self(0)
    }

    /// An invalid cell id that compares greater than every valid cell id.
    pub const fn sentinel() -> Self {
        Self(u64::MAX)
    }

    /// The cell covering the whole unit square.
    pub const fn root() -> Self {
        Self(1 << (POS_BITS - 1))
    }

    /// The cell at `level` containing the leaf cell with integer coordinates `(i, j)`.
    ///
    /// `i` and `j` are expressed at leaf resolution, i.e. in `0..2^30`.
    pub fn from_ij(i: u32, j: u32, level: u8) -> Self {
        debug_assert!(i < LEAF_SIZE && j < LEAF_SIZE);
        debug_assert!(level <= MAX_LEVEL);
        let pos = (spread_bits(i) << 1) | spread_bits(j);
        Self((pos << 1) | 1).parent_at(level)
    }

    /// The leaf cell containing the given point.
    ///
    /// Points outside the unit square are clamped onto its boundary.
    pub fn from_point(point: Coord<f64>) -> Self {
        Self::from_ij(leaf_coordinate(point.x), leaf_coordinate(point.y), MAX_LEVEL)
    }

    /// Returns `true` if this id names a node of the hierarchy.
    pub fn is_valid(self) -> bool {
        self.0 != 0
            && self.0 < (1 << POS_BITS)
            && (self.lsb() & 0x1555_5555_5555_5555) != 0
    }

    /// The lowest set bit of the id, which encodes the level.
    #[inline]
    pub fn lsb(self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    #[inline]
    fn lsb_for_level(level: u8) -> u64 {
        1 << (2 * (MAX_LEVEL - level) as u32)
    }

    /// The subdivision level of this cell, from `0` (root) to `30` (leaf).
    pub fn level(self) -> u8 {
        debug_assert!(self.is_valid());
        MAX_LEVEL - (self.0.trailing_zeros() / 2) as u8
    }

    /// Returns `true` if this is a cell at the maximum subdivision level.
    pub fn is_leaf(self) -> bool {
        self.0 & 1 != 0
    }

    /// Returns `true` if this is the root cell.
    pub fn is_root(self) -> bool {
        self == Self::root()
    }

    /// The immediate parent of this cell. Must not be called on the root.
    pub fn parent(self) -> Self {
        debug_assert!(!self.is_root());
        let new_lsb = self.lsb() << 2;
        Self((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// The ancestor of this cell at the given level, which must not exceed [`CellId::level`].
    pub fn parent_at(self, level: u8) -> Self {
        debug_assert!(level <= self.level());
        let new_lsb = Self::lsb_for_level(level);
        Self((self.0 & new_lsb.wrapping_neg()) | new_lsb)
    }

    /// The child at `position` (0..4) in Z-order. Must not be called on a leaf.
    pub fn child(self, position: u8) -> Self {
        debug_assert!(!self.is_leaf());
        debug_assert!(position < 4);
        let new_lsb = self.lsb() >> 2;
        Self(self.0 - self.lsb() + (2 * position as u64 + 1) * new_lsb)
    }

    /// The first child in Z-order.
    pub fn child_begin(self) -> Self {
        self.child(0)
    }

    /// The four children of this cell in Z-order.
    pub fn children(self) -> [Self; 4] {
        [self.child(0), self.child(1), self.child(2), self.child(3)]
    }

    /// The next cell at the same level in Z-order.
    ///
    /// Stepping past the last cell of a level yields an id outside the hierarchy.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(self.lsb() << 1))
    }

    /// The previous cell at the same level in Z-order.
    pub fn prev(self) -> Self {
        Self(self.0.wrapping_sub(self.lsb() << 1))
    }

    /// The smallest leaf cell id contained by this cell.
    pub fn range_min(self) -> Self {
        Self(self.0 - (self.lsb() - 1))
    }

    /// The largest leaf cell id contained by this cell.
    pub fn range_max(self) -> Self {
        Self(self.0 + (self.lsb() - 1))
    }

    /// Returns `true` if `other` is this cell or one of its descendants.
    pub fn contains(self, other: Self) -> bool {
        other >= self.range_min() && other <= self.range_max()
    }

    /// Returns `true` if either cell contains the other.
    pub fn intersects(self, other: Self) -> bool {
        other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
    }

    /// The level of the lowest common ancestor of the two cells, or `None` if either id is
    /// outside the hierarchy.
    pub fn common_ancestor_level(self, other: Self) -> Option<u8> {
        let bits = (self.0 ^ other.0).max(self.lsb().max(other.lsb()));
        let msb = 63 - bits.leading_zeros();
        if msb >= POS_BITS {
            return None;
        }
        Some(((POS_BITS - 1 - msb) >> 1) as u8)
    }

    /// Leaf coordinates of the lower-left corner of this cell, together with its level.
    pub fn to_ij_level(self) -> (u32, u32, u8) {
        let pos = self.range_min().0 >> 1;
        (compact_bits(pos >> 1), compact_bits(pos), self.level())
    }

    /// The side length of this cell in the unit square.
    pub fn edge_length(self) -> f64 {
        edge_length_at(self.level())
    }

    /// The region of the unit square covered by this cell.
    pub fn rect(self) -> Rect<f64> {
        let (i, j, level) = self.to_ij_level();
        let size = edge_length_at(level);
        let x = i as f64 / LEAF_SIZE as f64;
        let y = j as f64 / LEAF_SIZE as f64;
        Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size })
    }

    /// The center of this cell.
    pub fn center(self) -> Coord<f64> {
        self.rect().center()
    }
}

impl fmt::Display for CellId {
    /// Formats the path from the root, e.g. `/0312` for a level 4 cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "Invalid: {:#018x}", self.0);
        }
        f.write_str("/")?;
        let level = self.level();
        for k in 1..=level {
            let shift = POS_BITS - 2 * k as u32;
            write!(f, "{}", (self.0 >> shift) & 3)?;
        }
        Ok(())
    }
}

/// The side length of cells at `level`.
#[inline]
pub(crate) fn edge_length_at(level: u8) -> f64 {
    1.0 / (1u64 << level) as f64
}

#[inline]
fn leaf_coordinate(value: f64) -> u32 {
    let scaled = (value * LEAF_SIZE as f64).floor();
    if scaled.is_nan() || scaled < 0.0 {
        0
    } else if scaled >= (LEAF_SIZE - 1) as f64 {
        LEAF_SIZE - 1
    } else {
        scaled as u32
    }
}

/// Spread the low 30 bits of `v` so that bit `k` lands on bit `2k`.
#[inline]
fn spread_bits(v: u32) -> u64 {
    let mut x = v as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Inverse of [`spread_bits`]: gather the even bits of `v`.
#[inline]
fn compact_bits(v: u64) -> u32 {
    let mut x = v & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}
