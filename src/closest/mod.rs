//! Closest and furthest item queries over a [`SpatialIndex`](crate::index::SpatialIndex).
//!
//! A query pops cells from a priority queue ordered by a bound on the distance to anything
//! below them, and only descends into cells that can still hold a result better than the
//! current distance limit.

mod accumulator;
pub mod distance;
pub mod options;
pub mod query;
pub mod result;
pub mod target;
pub mod r#trait;

pub use distance::{Distance, MaxDistance, MinDistance};
pub use options::Options;
pub use query::{ClosestQuery, FurthestQuery, Query, QueryConfig};
pub use r#trait::DistanceTarget;
pub use result::QueryResult;
pub use target::{CellTarget, EdgeTarget, IndexTarget, PointTarget};
