//! Core types for the Absorb lattice random-walk toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the spatial and solver crates: lattice
//! coordinates, dense location identifiers, adjacency entries, and the
//! solver error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::SolveError;
pub use id::{Coord, LocationId, Neighbour};
