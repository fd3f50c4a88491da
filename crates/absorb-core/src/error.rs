//! Error types for absorption-time solvers.
//!
//! Every failure is reported synchronously and is final: the computation
//! is deterministic, so a failed run produces no expected-steps answer.

use crate::id::Coord;
use std::error::Error;
use std::fmt;

/// Errors from the iterative estimator and the exact solver.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The start coordinate is not a location of the region.
    ///
    /// Detected before any propagation or factorisation begins.
    InvalidStart {
        /// The requested start coordinate.
        start: Coord,
    },
    /// `I - T` is singular or too ill-conditioned to invert.
    ///
    /// Some location cannot reach escape, or the factorisation lost
    /// too much precision to trust the result.
    SingularChain {
        /// Description of the failed check.
        reason: String,
    },
    /// The escape probability did not reach the convergence threshold
    /// within the configured step bound.
    NonConvergence {
        /// Steps taken before giving up.
        steps: u64,
        /// Cumulative escape probability at that point.
        escaped: f64,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart { start } => {
                write!(f, "start coordinate {start} is not a location of the region")
            }
            Self::SingularChain { reason } => write!(f, "singular chain: {reason}"),
            Self::NonConvergence { steps, escaped } => write!(
                f,
                "escape probability {escaped:.10} did not converge within {steps} steps"
            ),
        }
    }
}

impl Error for SolveError {}
