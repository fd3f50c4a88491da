//! Region construction and both solvers behind one entry point.

use crate::config::{ConfigError, ExactConfig, IterativeConfig};
use crate::exact::{ExactSolution, ExactSolver};
use crate::iterative::{IterativeEstimate, IterativeEstimator};
use crate::observer::ProgressObserver;
use absorb_core::{Coord, SolveError};
use absorb_space::{Adjacency, Region, RegionSpec, SpaceError};
use std::error::Error;
use std::fmt;

/// Any failure along the region → adjacency → solver path.
#[derive(Clone, Debug, PartialEq)]
pub enum ProblemError {
    /// The region or step set could not be built.
    Space(SpaceError),
    /// A solver config failed validation.
    Config(ConfigError),
    /// A solver failed.
    Solve(SolveError),
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Solve(e) => write!(f, "solve: {e}"),
        }
    }
}

impl Error for ProblemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Solve(e) => Some(e),
        }
    }
}

impl From<SpaceError> for ProblemError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ConfigError> for ProblemError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SolveError> for ProblemError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}

/// A walk over a region, ready for either solver.
///
/// The walker starts at the origin. Shapes that omit the origin can
/// still be solved exactly; only the origin-based lookups fail.
///
/// # Examples
///
/// ```
/// use absorb_solve::{EscapeProblem, ExactConfig, IterativeConfig, Silent};
///
/// let problem = EscapeProblem::from_extents(&[3, 3]).unwrap();
/// let iterative = problem
///     .iterate(IterativeConfig::default(), &mut Silent)
///     .unwrap();
/// let exact = problem.solve_exact(ExactConfig::default()).unwrap();
/// assert!((iterative.expected_steps - exact.at_origin().unwrap()).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct EscapeProblem {
    adjacency: Adjacency,
}

impl EscapeProblem {
    /// Build from a [`RegionSpec`] with unit steps.
    pub fn new(spec: &RegionSpec) -> Result<Self, ProblemError> {
        let region = Region::compile(spec)?;
        Ok(Self::from_region(region))
    }

    /// Build an origin-centred box.
    pub fn from_extents(extents: &[u32]) -> Result<Self, ProblemError> {
        Ok(Self::from_region(Region::from_extents(extents)?))
    }

    /// Build from an explicit list of cells.
    pub fn from_shape<I>(cells: I) -> Result<Self, ProblemError>
    where
        I: IntoIterator<Item = Coord>,
    {
        Ok(Self::from_region(Region::from_shape(cells)?))
    }

    /// Wrap an existing region with unit steps.
    pub fn from_region(region: Region) -> Self {
        Self {
            adjacency: Adjacency::new(region),
        }
    }

    /// Wrap a prebuilt adjacency, e.g. one with custom steps.
    pub fn from_adjacency(adjacency: Adjacency) -> Self {
        Self { adjacency }
    }

    /// The walk's adjacency.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// The walk's region.
    pub fn region(&self) -> &Region {
        self.adjacency.region()
    }

    /// The designated start: the origin of the region's dimensionality.
    pub fn start(&self) -> Coord {
        self.region().origin()
    }

    /// Expected escape time from the start by forward propagation.
    pub fn iterate(
        &self,
        config: IterativeConfig,
        observer: &mut dyn ProgressObserver,
    ) -> Result<IterativeEstimate, ProblemError> {
        let estimator = IterativeEstimator::new(&self.adjacency, config)?;
        Ok(estimator.run(observer)?)
    }

    /// Expected escape time from every location via the fundamental matrix.
    pub fn solve_exact(&self, config: ExactConfig) -> Result<ExactSolution, ProblemError> {
        let solver = ExactSolver::new(&self.adjacency, config)?;
        Ok(solver.solve()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::Silent;

    #[test]
    fn errors_surface_by_stage() {
        assert_eq!(
            EscapeProblem::from_extents(&[0]).unwrap_err(),
            ProblemError::Space(SpaceError::EmptySpace)
        );

        let p = EscapeProblem::from_extents(&[3]).unwrap();
        let bad = IterativeConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert_eq!(
            p.iterate(bad, &mut Silent).unwrap_err(),
            ProblemError::Config(ConfigError::ZeroMaxSteps)
        );

        let p = EscapeProblem::from_shape(vec![Coord::from([5])]).unwrap();
        assert_eq!(
            p.iterate(IterativeConfig::default(), &mut Silent)
                .unwrap_err(),
            ProblemError::Solve(SolveError::InvalidStart {
                start: Coord::from([0])
            })
        );
    }

    #[test]
    fn error_source_chain() {
        let e = ProblemError::from(SpaceError::EmptySpace);
        assert_eq!(e.to_string(), "space: region must have at least one cell");
        assert!(e.source().is_some());
    }

    #[test]
    fn spec_and_extents_agree() {
        let a = EscapeProblem::new(&RegionSpec::Box(vec![4, 2])).unwrap();
        let b = EscapeProblem::from_extents(&[4, 2]).unwrap();
        let ea = a.solve_exact(ExactConfig::default()).unwrap();
        let eb = b.solve_exact(ExactConfig::default()).unwrap();
        assert_eq!(ea.expected(), eb.expected());
        assert_eq!(a.start(), Coord::from([0, 0]));
    }
}
