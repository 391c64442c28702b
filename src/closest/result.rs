use crate::closest::distance::Distance;

/// One search result: an item of the index and its distance to the target.
///
/// Results are ordered by distance, then shape id, then item id. An item id of `-1` marks an
/// interior result (the target lies inside the shape); a shape id of `-1` marks the empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryResult<D: Distance> {
    distance: D,
    shape_id: i32,
    item_id: i32,
}

impl<D: Distance> QueryResult<D> {
    pub fn new(distance: D, shape_id: i32, item_id: i32) -> Self {
        Self {
            distance,
            shape_id,
            item_id,
        }
    }

    /// The result returned when nothing was found.
    pub fn empty() -> Self {
        Self::new(D::infinity(), -1, -1)
    }

    pub fn distance(&self) -> D {
        self.distance
    }

    pub fn shape_id(&self) -> i32 {
        self.shape_id
    }

    pub fn item_id(&self) -> i32 {
        self.item_id
    }

    pub fn is_empty(&self) -> bool {
        self.shape_id < 0
    }

    pub fn is_interior(&self) -> bool {
        self.shape_id >= 0 && self.item_id < 0
    }
}

impl<D: Distance> Default for QueryResult<D> {
    fn default() -> Self {
        Self::empty()
    }
}
