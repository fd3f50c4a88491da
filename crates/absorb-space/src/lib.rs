//! Lattice regions and escape adjacency for Absorb.
//!
//! This crate is the geometry half of an absorbing random walk:
//!
//! - [`Region`]: the finite set of walkable cells, built either as an
//!   axis-aligned box ([`Region::from_extents`]) or from an explicit shape
//!   ([`Region::from_shape`]). Cells keep a canonical enumeration order and
//!   a dense [`LocationId`](absorb_core::LocationId) rank.
//! - [`StepSet`]: the `2·D` unit moves of a `D`-dimensional lattice.
//! - [`Adjacency`]: for every cell, the target of each step, either
//!   another cell or [`Neighbour::Escape`](absorb_core::Neighbour::Escape).
//!
//! Both structures are immutable once built and are shared read-only by
//! the solvers in `absorb-solve`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod error;
pub mod region;
pub mod step;

#[cfg(test)]
pub(crate) mod compliance;

pub use adjacency::Adjacency;
pub use error::SpaceError;
pub use region::{Region, RegionSpec};
pub use step::StepSet;
