#![doc = include_str!("../README.md")]

pub mod cell;
pub mod closest;
pub mod covering;
mod error;
pub mod geometry;
pub mod index;

pub use cell::CellId;
pub use error::{GeoClosestError, Result};

#[cfg(test)]
pub(crate) mod test;
