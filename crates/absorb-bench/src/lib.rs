//! Benchmark profiles for the absorb solvers.
//!
//! - [`reference_box`]: 21x21 box (441 cells), sized so both solvers
//!   finish in milliseconds
//! - [`stress_box`]: 31x31 box (961 cells), where the dense exact
//!   solve starts to dominate
//! - [`cube_profile`]: 7x7x7 box (343 cells) for a 3D walk
//! - [`cross_profile`]: a plus-shaped region with long thin arms

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use absorb_core::Coord;
use absorb_solve::EscapeProblem;
use absorb_space::{Region, SpaceError};

/// Build the reference profile: a 21x21 box around the origin.
pub fn reference_box() -> Result<EscapeProblem, SpaceError> {
    Region::from_extents(&[21, 21]).map(EscapeProblem::from_region)
}

/// Build the stress profile: a 31x31 box around the origin.
pub fn stress_box() -> Result<EscapeProblem, SpaceError> {
    Region::from_extents(&[31, 31]).map(EscapeProblem::from_region)
}

/// Build a 7x7x7 cube around the origin.
pub fn cube_profile() -> Result<EscapeProblem, SpaceError> {
    Region::from_extents(&[7, 7, 7]).map(EscapeProblem::from_region)
}

/// Build a 2D plus sign with four arms of `arm` cells each.
///
/// Every arm cell is a boundary cell, so mass leaks out along the arms.
pub fn cross_profile(arm: i32) -> Result<EscapeProblem, SpaceError> {
    let mut cells = vec![Coord::origin(2)];
    for k in 1..=arm {
        cells.push(Coord::from([k, 0]));
        cells.push(Coord::from([-k, 0]));
        cells.push(Coord::from([0, k]));
        cells.push(Coord::from([0, -k]));
    }
    Region::from_shape(cells).map(EscapeProblem::from_region)
}
