//! Closed-form absorption times via the fundamental matrix.
//!
//! With `T` the transient-to-transient transition matrix, the
//! fundamental matrix `F = (I - T)⁻¹` holds expected visit counts, and
//! `t = F · 1` is the expected number of steps to escape from every
//! location at once.

use crate::config::{ConfigError, ExactConfig};
use crate::metrics::RunMetrics;
use absorb_core::{Coord, LocationId, Neighbour, SolveError};
use absorb_space::{Adjacency, Region};
use nalgebra::{DMatrix, DVector};
use std::time::Instant;

/// Build the sub-stochastic transition matrix over the region's locations.
///
/// Entry `(i, j)` is the probability of stepping from location `i` to
/// location `j`. Contributions are accumulated, so repeated steps
/// landing on the same neighbour add up. Row `i` sums to the fraction
/// of non-escaping steps from location `i`.
pub fn transition_matrix(adjacency: &Adjacency) -> DMatrix<f64> {
    let n = adjacency.len();
    let p = adjacency.transition_probability();
    let mut t = DMatrix::zeros(n, n);
    for (from, entries) in adjacency.iter() {
        for to in entries.iter().filter_map(Neighbour::location) {
            t[(from.index(), to.index())] += p;
        }
    }
    t
}

/// Solves for expected escape times in closed form.
#[derive(Clone, Debug)]
pub struct ExactSolver<'a> {
    adjacency: &'a Adjacency,
    config: ExactConfig,
}

impl<'a> ExactSolver<'a> {
    /// Create a solver over `adjacency`.
    ///
    /// Returns `Err` if the config fails validation.
    pub fn new(adjacency: &'a Adjacency, config: ExactConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { adjacency, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    /// Factor `I - T`, invert it, and compute expected escape times.
    ///
    /// Returns `Err(SolveError::SingularChain)` when an LU pivot is
    /// below `pivot_tolerance` relative to the largest pivot, when the
    /// inversion fails, or when any resulting time is not a finite
    /// value of at least zero.
    pub fn solve(&self) -> Result<ExactSolution, SolveError> {
        let started = Instant::now();
        let n = self.adjacency.len();
        let t = transition_matrix(self.adjacency);
        let lu = (DMatrix::identity(n, n) - t).lu();

        let pivots = lu.u().diagonal().map(f64::abs);
        let max_pivot = pivots.max();
        let (col, min_pivot) = pivots.argmin();
        if min_pivot.is_nan() || min_pivot <= self.config.pivot_tolerance * max_pivot {
            return Err(SolveError::SingularChain {
                reason: format!(
                    "pivot {min_pivot:e} at column {col} is below {:e} of the largest pivot {max_pivot:e}",
                    self.config.pivot_tolerance
                ),
            });
        }

        let fundamental = lu.try_inverse().ok_or_else(|| SolveError::SingularChain {
            reason: "LU inversion of I - T failed".into(),
        })?;
        let expected = &fundamental * DVector::from_element(n, 1.0);
        if let Some((i, v)) = expected
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(SolveError::SingularChain {
                reason: format!("expected escape time {v} at location {i} is not usable"),
            });
        }

        let p = self.adjacency.transition_probability();
        let exit_weights = self
            .adjacency
            .region()
            .ids()
            .map(|id| self.adjacency.escape_count(id) as f64 * p)
            .collect();

        Ok(ExactSolution {
            region: self.adjacency.region().clone(),
            fundamental,
            expected,
            exit_weights,
            metrics: RunMetrics {
                total_us: started.elapsed().as_micros() as u64,
                steps: 0,
                states: n,
            },
        })
    }
}

/// Expected escape times for every location of a region.
///
/// Values are indexed by [`LocationId`] and follow the region's
/// canonical order.
#[derive(Clone, Debug)]
pub struct ExactSolution {
    region: Region,
    fundamental: DMatrix<f64>,
    expected: DVector<f64>,
    exit_weights: Vec<f64>,
    metrics: RunMetrics,
}

impl ExactSolution {
    /// The region the solution covers.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Expected steps to escape starting at `coord`.
    pub fn expected_steps(&self, coord: &Coord) -> Option<f64> {
        self.region.rank(coord).map(|id| self.expected[id.index()])
    }

    /// Expected steps to escape starting at location `id`.
    pub fn expected_at(&self, id: LocationId) -> Option<f64> {
        self.expected.get(id.index()).copied()
    }

    /// Expected steps to escape starting at the origin.
    ///
    /// Returns `Err(SolveError::InvalidStart)` if the region does not
    /// contain the origin.
    pub fn at_origin(&self) -> Result<f64, SolveError> {
        let origin = self.region.origin();
        self.expected_steps(&origin)
            .ok_or(SolveError::InvalidStart { start: origin })
    }

    /// `(coord, expected steps)` for every location, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Coord, f64)> + '_ {
        self.region.iter().zip(self.expected.iter().copied())
    }

    /// The expected-steps vector `F · 1`.
    pub fn expected(&self) -> &DVector<f64> {
        &self.expected
    }

    /// The fundamental matrix `(I - T)⁻¹`.
    pub fn fundamental(&self) -> &DMatrix<f64> {
        &self.fundamental
    }

    /// Expected number of visits to `to` before escaping, starting at `from`.
    ///
    /// The starting location counts as visited once.
    pub fn expected_visits(&self, from: LocationId, to: LocationId) -> Option<f64> {
        self.fundamental.get((from.index(), to.index())).copied()
    }

    /// Variance of the escape time from every location.
    ///
    /// Computed as `(2F - I)·t - t∘t`.
    pub fn variances(&self) -> DVector<f64> {
        let n = self.expected.len();
        let two_f_minus_i = &self.fundamental * 2.0 - DMatrix::<f64>::identity(n, n);
        two_f_minus_i * &self.expected - self.expected.component_mul(&self.expected)
    }

    /// Probability of leaving the region through each boundary location,
    /// starting at `from`.
    ///
    /// Only locations with at least one escaping step appear. The
    /// probabilities sum to 1.
    pub fn exit_distribution(&self, from: LocationId) -> Option<Vec<(LocationId, f64)>> {
        let row = from.index();
        if row >= self.expected.len() {
            return None;
        }
        Some(
            self.exit_weights
                .iter()
                .enumerate()
                .filter(|(_, w)| **w > 0.0)
                .map(|(j, w)| (LocationId(j as u32), self.fundamental[(row, j)] * w))
                .collect(),
        )
    }

    /// Timing and size data for the solve.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}
