//! A hierarchical cell index over points, edges and cells in the unit square.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod index;
pub mod iterator;
pub mod shape;
pub mod r#trait;

pub use builder::CellIndexBuilder;
pub use index::{CellIndex, CellIndexRef, IndexCell, ItemRef};
pub use iterator::{CellRelation, IndexIterator};
pub use r#trait::SpatialIndex;
pub use shape::{ItemGeometry, Shape};
