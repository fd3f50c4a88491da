//! Unit step vectors of a lattice walk.

use crate::error::SpaceError;
use absorb_core::Coord;

/// The moves available to the walker at every location.
///
/// A step is a coordinate-shaped vector with exactly one nonzero
/// component equal to `+1` or `-1`. The walker picks each step with
/// equal probability `1 / len()`.
///
/// # Examples
///
/// ```
/// use absorb_core::Coord;
/// use absorb_space::StepSet;
///
/// let steps = StepSet::unit(2);
/// assert_eq!(steps.len(), 4);
/// // Interleaved: +x, -x, +y, -y.
/// assert_eq!(steps.get(1), Some(&Coord::from([-1, 0])));
/// assert_eq!(steps.get(2), Some(&Coord::from([0, 1])));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSet {
    ndim: usize,
    steps: Vec<Coord>,
}

impl StepSet {
    /// The full `2·ndim` unit step set.
    ///
    /// Order is axis 0 positive, axis 0 negative, axis 1 positive,
    /// axis 1 negative, and so on.
    pub fn unit(ndim: usize) -> Self {
        let steps = (0..ndim)
            .flat_map(|axis| [1, -1].map(move |sign| (axis, sign)))
            .filter_map(|(axis, sign)| Coord::unit(ndim, axis, sign))
            .collect();
        Self { ndim, steps }
    }

    /// A custom step set, e.g. a subset of the unit steps.
    ///
    /// Every step must be `ndim`-dimensional with exactly one `±1`
    /// component. Repeated steps are allowed: the walk then favours that
    /// direction and adjacency entries repeat accordingly.
    pub fn from_steps(ndim: usize, steps: Vec<Coord>) -> Result<Self, SpaceError> {
        if ndim == 0 {
            return Err(SpaceError::ZeroDimensions);
        }
        if steps.is_empty() {
            return Err(SpaceError::InvalidStep {
                reason: "step set is empty".into(),
            });
        }
        for step in &steps {
            if step.ndim() != ndim {
                return Err(SpaceError::DimensionMismatch {
                    expected: ndim,
                    found: step.ndim(),
                });
            }
            let nonzero = step.iter().filter(|&&v| v != 0).count();
            if nonzero != 1 || step.l1_norm() != 1 {
                return Err(SpaceError::InvalidStep {
                    reason: format!("{step} is not a unit step"),
                });
            }
        }
        Ok(Self { ndim, steps })
    }

    /// Dimensionality of every step.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` only for the zero-dimensional unit set.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at position `i`.
    pub fn get(&self, i: usize) -> Option<&Coord> {
        self.steps.get(i)
    }

    /// Steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.steps.iter()
    }

    /// Probability of taking any single step: `1 / len()`.
    pub fn transition_probability(&self) -> f64 {
        1.0 / self.steps.len() as f64
    }
}

impl<'a> IntoIterator for &'a StepSet {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
