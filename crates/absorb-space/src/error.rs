//! Error types for region and adjacency construction.

use absorb_core::Coord;
use std::fmt;

/// Errors arising from region, step-set or adjacency construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a region with zero cells.
    EmptySpace,
    /// Coordinates with zero components cannot describe a lattice.
    ZeroDimensions,
    /// A coordinate or step does not match the region's dimensionality.
    DimensionMismatch {
        /// Dimensionality established by the first element.
        expected: usize,
        /// Dimensionality of the offending element.
        found: usize,
    },
    /// A shape lists the same coordinate more than once.
    DuplicateCoord {
        /// The repeated coordinate.
        coord: Coord,
    },
    /// A box extent does not fit the `i32` coordinate range.
    ExtentTooLarge {
        /// Axis index of the offending extent.
        axis: usize,
        /// The rejected value.
        value: u32,
        /// Maximum allowed value.
        max: u32,
    },
    /// The region would hold more cells than a `LocationId` can rank.
    CellCountOverflow,
    /// A step set is unusable for a random walk.
    InvalidStep {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "region must have at least one cell"),
            Self::ZeroDimensions => write!(f, "coordinates must have at least one dimension"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "expected {expected}-dimensional coordinate, found {found}")
            }
            Self::DuplicateCoord { coord } => {
                write!(f, "coordinate {coord} appears more than once")
            }
            Self::ExtentTooLarge { axis, value, max } => {
                write!(f, "extent {value} on axis {axis} exceeds maximum {max}")
            }
            Self::CellCountOverflow => write!(f, "cell count exceeds u32::MAX"),
            Self::InvalidStep { reason } => write!(f, "invalid step set: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
