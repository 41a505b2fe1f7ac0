//! Move legality and shape fingerprinting for 2D lattices of self-reconfiguring voxel robots.
//!
//! A `Shape` owns a set of `Voxel`s on an integer lattice. Each voxel sees the occupancy of the
//! 5x5 window around it (`NeighborState`), and that alone decides whether it may pivot diagonally
//! around a neighbor or slide along one (`moves`). Whole shapes can be checked for connectivity
//! and reduced to a `CanonicalStateMatrix` for comparison against a target configuration.

mod canonical;
mod config;
mod connectivity;
mod direction;
mod error;
mod extent;
mod neighborhood;
mod point;
mod shape;
mod voxel;

pub mod moves;

#[cfg(test)]
mod test_util;

pub use canonical::{similarity, CanonicalStateMatrix};
pub use config::{OffsetRounding, ShapeConfig, MAX_COORDINATE};
pub use connectivity::{connected_components, is_unified, reachable_from};
pub use direction::{Direction, DirectionIndex, ALL_DIRECTIONS};
pub use error::ShapeError;
pub use extent::{bounding_extent, Extent, ExtentIterator};
pub use moves::{AnchorSide, Illegal, Move, MoveKind, Verdict};
pub use neighborhood::{
    detect, NeighborOffset, NeighborState, ALL_OFFSETS, NEIGHBORHOOD_RADIUS, NUM_OFFSETS,
};
pub use point::Point;
pub use shape::Shape;
pub use voxel::{Charge, Color, Voxel};

pub mod prelude {
    pub use crate::canonical::{similarity, CanonicalStateMatrix};
    pub use crate::config::ShapeConfig;
    pub use crate::direction::Direction;
    pub use crate::error::ShapeError;
    pub use crate::moves::{Illegal, Move, Verdict};
    pub use crate::point::Point;
    pub use crate::shape::Shape;
}
