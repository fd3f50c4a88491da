//! Probability mass over locations plus the absorbing escape state.

use absorb_core::{Coord, LocationId, Neighbour, SolveError};
use absorb_space::Adjacency;

/// Probability distribution over `locations ∪ {escape}` at one instant.
///
/// Mass is stored densely, indexed by [`LocationId`]. Escape is
/// absorbing: its mass only grows and is never redistributed. Total
/// mass stays 1 up to rounding.
///
/// Stepping is explicit. [`step_into`](Self::step_into) reads `self`
/// and overwrites a caller-owned buffer, so a propagation loop swaps
/// two buffers instead of allocating per step.
#[derive(Clone, Debug, PartialEq)]
pub struct StateDistribution {
    mass: Vec<f64>,
    escaped: f64,
}

impl StateDistribution {
    /// All mass at `start`, nothing escaped.
    ///
    /// Returns `Err(SolveError::InvalidStart)` if `start` is not a
    /// location of the adjacency's region.
    pub fn point_mass(adjacency: &Adjacency, start: &Coord) -> Result<Self, SolveError> {
        let id = adjacency
            .region()
            .rank(start)
            .ok_or_else(|| SolveError::InvalidStart {
                start: start.clone(),
            })?;
        let mut mass = vec![0.0; adjacency.len()];
        mass[id.index()] = 1.0;
        Ok(Self { mass, escaped: 0.0 })
    }

    /// A distribution with no mass anywhere, sized for `len` locations.
    ///
    /// Used as the scratch buffer for [`step_into`](Self::step_into).
    pub fn zeroed(len: usize) -> Self {
        Self {
            mass: vec![0.0; len],
            escaped: 0.0,
        }
    }

    /// Number of locations covered.
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// `true` if sized for zero locations.
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Mass at a location. Out-of-range ids hold no mass.
    pub fn mass(&self, id: LocationId) -> f64 {
        self.mass.get(id.index()).copied().unwrap_or(0.0)
    }

    /// Per-location mass, indexed by rank.
    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    /// Cumulative escaped mass.
    pub fn escaped(&self) -> f64 {
        self.escaped
    }

    /// Mass still inside the region.
    pub fn transient(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Transient plus escaped mass.
    pub fn total(&self) -> f64 {
        self.transient() + self.escaped
    }

    /// Advance one step, writing the result into `next`.
    ///
    /// Every location splits its mass equally over its adjacency
    /// entries; entries pointing at escape add to the escaped mass.
    /// `next` is fully overwritten. Returns the mass newly absorbed in
    /// this step.
    pub fn step_into(&self, adjacency: &Adjacency, next: &mut StateDistribution) -> f64 {
        let share = adjacency.transition_probability();
        next.mass.clear();
        next.mass.resize(self.mass.len(), 0.0);

        let mut newly_escaped = 0.0;
        for (id, entries) in adjacency.iter() {
            let m = self.mass[id.index()];
            if m == 0.0 {
                continue;
            }
            let part = share * m;
            for entry in entries {
                match entry {
                    Neighbour::Location(to) => next.mass[to.index()] += part,
                    Neighbour::Escape => newly_escaped += part,
                }
            }
        }
        next.escaped = newly_escaped + self.escaped;
        newly_escaped
    }

    /// Advance one step into a fresh distribution.
    ///
    /// Returns the new distribution and the newly absorbed mass.
    pub fn advance(&self, adjacency: &Adjacency) -> (StateDistribution, f64) {
        let mut next = Self::zeroed(self.mass.len());
        let newly_escaped = self.step_into(adjacency, &mut next);
        (next, newly_escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absorb_space::Region;
    use proptest::prelude::*;

    fn line3() -> Adjacency {
        Adjacency::new(Region::from_extents(&[3]).unwrap())
    }

    #[test]
    fn point_mass_at_origin() {
        let adj = line3();
        let d = StateDistribution::point_mass(&adj, &Coord::from([0])).unwrap();
        assert_eq!(d.masses(), &[0.0, 1.0, 0.0]);
        assert_eq!(d.escaped(), 0.0);
        assert_eq!(d.total(), 1.0);
    }

    #[test]
    fn point_mass_outside_region_is_invalid_start() {
        let adj = line3();
        let err = StateDistribution::point_mass(&adj, &Coord::from([5])).unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidStart {
                start: Coord::from([5])
            }
        );
    }

    #[test]
    fn two_steps_on_a_line_of_three() {
        let adj = line3();
        let d0 = StateDistribution::point_mass(&adj, &Coord::from([0])).unwrap();

        let (d1, e1) = d0.advance(&adj);
        assert_eq!(e1, 0.0);
        assert_eq!(d1.masses(), &[0.5, 0.0, 0.5]);

        let (d2, e2) = d1.advance(&adj);
        assert_eq!(e2, 0.5);
        assert_eq!(d2.masses(), &[0.0, 0.5, 0.0]);
        assert_eq!(d2.escaped(), 0.5);
        assert_eq!(d2.total(), 1.0);
    }

    #[test]
    fn escaped_mass_is_never_redistributed() {
        let adj = Adjacency::new(Region::from_extents(&[1]).unwrap());
        let d0 = StateDistribution::point_mass(&adj, &Coord::from([0])).unwrap();
        let (d1, e1) = d0.advance(&adj);
        assert_eq!(e1, 1.0);
        let (d2, e2) = d1.advance(&adj);
        assert_eq!(e2, 0.0);
        assert_eq!(d2.escaped(), 1.0);
        assert_eq!(d2.transient(), 0.0);
    }

    #[test]
    fn step_into_overwrites_stale_buffer() {
        let adj = line3();
        let d0 = StateDistribution::point_mass(&adj, &Coord::from([0])).unwrap();
        let mut scratch = StateDistribution {
            mass: vec![9.0; 7],
            escaped: 3.0,
        };
        d0.step_into(&adj, &mut scratch);
        assert_eq!(scratch.masses(), &[0.5, 0.0, 0.5]);
        assert_eq!(scratch.escaped(), 0.0);
    }

    proptest! {
        #[test]
        fn mass_is_conserved(
            dims in prop::collection::vec(1u32..6, 1..4),
            steps in 1usize..40,
        ) {
            let region = Region::from_extents(&dims).unwrap();
            let start = region.origin();
            let adj = Adjacency::new(region);
            let mut d = StateDistribution::point_mass(&adj, &start).unwrap();
            let mut scratch = StateDistribution::zeroed(adj.len());
            let mut last_escaped = 0.0;
            for _ in 0..steps {
                d.step_into(&adj, &mut scratch);
                std::mem::swap(&mut d, &mut scratch);
                prop_assert!((d.total() - 1.0).abs() < 1e-12);
                prop_assert!(d.escaped() >= last_escaped);
                prop_assert!(d.masses().iter().all(|&m| m >= 0.0));
                last_escaped = d.escaped();
            }
        }
    }
}
