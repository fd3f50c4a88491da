//! Solver configuration and validation.
//!
//! Both configs are plain structs with sensible [`Default`]s.
//! [`validate()`](IterativeConfig::validate) is called by the solver
//! constructors; callers only need it to check a config up front.

use std::error::Error;
use std::fmt;

// ── IterativeConfig ────────────────────────────────────────────────

/// Configuration for [`IterativeEstimator`](crate::IterativeEstimator).
#[derive(Clone, Debug, PartialEq)]
pub struct IterativeConfig {
    /// Propagation stops once the escaped mass reaches `1 - tolerance`.
    /// Default: `1e-12`.
    pub tolerance: f64,
    /// Hard bound on propagation steps. Reaching it without converging
    /// yields [`SolveError::NonConvergence`](absorb_core::SolveError::NonConvergence).
    /// Default: 10 000 000.
    pub max_steps: u64,
}

impl Default for IterativeConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_steps: 10_000_000,
        }
    }
}

impl IterativeConfig {
    /// Escaped-mass level at which propagation stops.
    pub fn threshold(&self) -> f64 {
        1.0 - self.tolerance
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        Ok(())
    }
}

// ── ExactConfig ────────────────────────────────────────────────────

/// Configuration for [`ExactSolver`](crate::ExactSolver).
#[derive(Clone, Debug, PartialEq)]
pub struct ExactConfig {
    /// Smallest acceptable ratio between the smallest and largest LU
    /// pivot magnitudes of `I - T`. Below it the chain is reported
    /// singular. Default: `1e-12`.
    pub pivot_tolerance: f64,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
        }
    }
}

impl ExactConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pivot_tolerance.is_finite()
            || self.pivot_tolerance < 0.0
            || self.pivot_tolerance >= 1.0
        {
            return Err(ConfigError::InvalidPivotTolerance {
                value: self.pivot_tolerance,
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`IterativeConfig::validate`] and
/// [`ExactConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Convergence tolerance is NaN, infinite, or outside `(0, 1)`.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
    /// `max_steps` is zero.
    ZeroMaxSteps,
    /// Pivot tolerance is NaN, infinite, or outside `[0, 1)`.
    InvalidPivotTolerance {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTolerance { value } => {
                write!(f, "tolerance must be finite and in (0, 1), got {value}")
            }
            Self::ZeroMaxSteps => write!(f, "max_steps must be at least 1"),
            Self::InvalidPivotTolerance { value } => {
                write!(f, "pivot_tolerance must be finite and in [0, 1), got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
