//! Absorb: expected escape time of a random walk on a finite lattice region.
//!
//! A walker starts at the origin of a region of integer lattice points and
//! moves by a uniformly chosen unit step each turn. Landing outside the
//! region absorbs it. This crate computes the expected number of steps
//! until absorption, either by propagating the probability distribution
//! forward until almost all mass has escaped, or exactly from the
//! fundamental matrix of the absorbing Markov chain.
//!
//! This is the facade crate that re-exports the public API of the Absorb
//! sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use absorb::prelude::*;
//!
//! // A 5x5 box centred on the origin.
//! let problem = EscapeProblem::from_extents(&[5, 5]).unwrap();
//!
//! let iterative = problem
//!     .iterate(IterativeConfig::default(), &mut Silent)
//!     .unwrap();
//! let exact = problem.solve_exact(ExactConfig::default()).unwrap();
//!
//! assert!((exact.at_origin().unwrap() - 135.0 / 13.0).abs() < 1e-9);
//! assert!((iterative.expected_steps - 135.0 / 13.0).abs() < 1e-6);
//!
//! // Every cell of an irregular shape at once.
//! let shape = vec![Coord::from([0, 0]), Coord::from([1, 0]), Coord::from([1, 1])];
//! let exact = EscapeProblem::from_shape(shape)
//!     .unwrap()
//!     .solve_exact(ExactConfig::default())
//!     .unwrap();
//! for (coord, steps) in exact.iter() {
//!     assert!(steps >= 1.0, "{coord}");
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `absorb-core` | Coordinates, location IDs, solver errors |
//! | [`space`] | `absorb-space` | Regions, step sets, adjacency |
//! | [`solve`] | `absorb-solve` | Iterative estimator, exact solver, configs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`absorb-core`).
///
/// [`types::Coord`], [`types::LocationId`], [`types::Neighbour`] and
/// [`types::SolveError`].
pub use absorb_core as types;

/// Regions and their escape-aware adjacency (`absorb-space`).
pub use absorb_space as space;

/// Solvers (`absorb-solve`).
///
/// [`solve::IterativeEstimator`] propagates probability mass step by
/// step; [`solve::ExactSolver`] inverts `I - T` once and answers for
/// every start location.
pub use absorb_solve as solve;

/// Common imports for typical Absorb usage.
///
/// ```rust
/// use absorb::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use absorb_core::{Coord, LocationId, Neighbour, SolveError};

    // Space
    pub use absorb_space::{Adjacency, Region, RegionSpec, SpaceError, StepSet};

    // Solvers
    pub use absorb_solve::{
        EscapeProblem, ExactConfig, ExactSolution, ExactSolver, IterativeConfig,
        IterativeEstimate, IterativeEstimator, ProblemError, ProgressObserver, Silent,
        StderrProgress,
    };
}
