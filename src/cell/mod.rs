//! Hierarchical decomposition of the unit square into nested cells.

mod id;

pub use id::{CellId, MAX_LEVEL};
pub(crate) use id::{edge_length_at, LEAF_SIZE};
