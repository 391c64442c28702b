use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum GeoClosestError {
    /// A coordinate was non-finite or fell outside the unit square covered by the cell hierarchy.
    #[error("Coordinate ({x}, {y}) is outside the indexed domain [0, 1] x [0, 1].")]
    OutOfDomain { x: f64, y: f64 },

    /// A shape had too few vertices to form its geometry.
    #[error("Invalid shape {shape_id}: {reason}")]
    InvalidShape { shape_id: usize, reason: String },

    /// A cell id that does not name a node of the hierarchy.
    #[error("Invalid cell id {0:#x}.")]
    InvalidCell(u64),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, GeoClosestError>;
