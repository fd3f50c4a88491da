//! Expected escape time of a lattice random walk.
//!
//! Two independent solvers consume the same [`Adjacency`](absorb_space::Adjacency):
//!
//! - [`IterativeEstimator`]: propagates a [`StateDistribution`] forward one
//!   step at a time until the escaped mass is within tolerance of 1,
//!   accumulating `step × newly escaped mass`.
//! - [`ExactSolver`]: builds the transient transition matrix `T`, inverts
//!   `I - T` into the fundamental matrix, and reads off the expected
//!   absorption time of every location at once.
//!
//! [`EscapeProblem`] bundles region construction with both solvers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod distribution;
pub mod exact;
pub mod iterative;
pub mod metrics;
pub mod observer;
pub mod problem;

pub use config::{ConfigError, ExactConfig, IterativeConfig};
pub use distribution::StateDistribution;
pub use exact::{transition_matrix, ExactSolution, ExactSolver};
pub use iterative::{IterativeEstimate, IterativeEstimator, StepReport, Walk};
pub use metrics::RunMetrics;
pub use observer::{ProgressObserver, Silent, StderrProgress};
pub use problem::{EscapeProblem, ProblemError};
