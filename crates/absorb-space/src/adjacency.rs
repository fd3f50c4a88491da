//! Per-location step targets, including escape transitions.

use crate::error::SpaceError;
use crate::region::Region;
use crate::step::StepSet;
use absorb_core::{Coord, LocationId, Neighbour};
use smallvec::SmallVec;

/// The adjacency structure of a walk over a [`Region`].
///
/// For every location and every step of the [`StepSet`], records where
/// the step lands: another location, or [`Neighbour::Escape`] when the
/// target lies outside the region (or overflows the `i32` lattice).
/// Each location has exactly `steps.len()` entries, in step order.
///
/// Built once and immutable thereafter. Owns its region and steps so the
/// solvers need only a shared `&Adjacency`.
///
/// # Examples
///
/// ```
/// use absorb_core::{Coord, LocationId, Neighbour};
/// use absorb_space::{Adjacency, Region};
///
/// let adj = Adjacency::new(Region::from_extents(&[3]).unwrap());
/// // Cell 1 steps right to escape and left onto cell 0.
/// let n = adj.neighbours(&Coord::from([1])).unwrap();
/// assert_eq!(n, &[Neighbour::Escape, Neighbour::Location(LocationId(1))]);
/// ```
#[derive(Clone, Debug)]
pub struct Adjacency {
    region: Region,
    steps: StepSet,
    entries: Vec<SmallVec<[Neighbour; 8]>>,
}

impl Adjacency {
    /// Build adjacency over the region's full unit step set.
    pub fn new(region: Region) -> Self {
        let steps = region.unit_steps();
        let entries = build_entries(&region, &steps);
        Self {
            region,
            steps,
            entries,
        }
    }

    /// Build adjacency with a custom step set.
    ///
    /// Returns `Err(SpaceError::DimensionMismatch)` if the steps do not
    /// match the region's dimensionality.
    pub fn with_steps(region: Region, steps: StepSet) -> Result<Self, SpaceError> {
        if steps.ndim() != region.ndim() {
            return Err(SpaceError::DimensionMismatch {
                expected: region.ndim(),
                found: steps.ndim(),
            });
        }
        if steps.is_empty() {
            return Err(SpaceError::InvalidStep {
                reason: "step set is empty".into(),
            });
        }
        let entries = build_entries(&region, &steps);
        Ok(Self {
            region,
            steps,
            entries,
        })
    }

    /// The underlying region.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The step set every location uses.
    pub fn steps(&self) -> &StepSet {
        &self.steps
    }

    /// Number of entries per location (the step count).
    pub fn degree(&self) -> usize {
        self.steps.len()
    }

    /// Probability assigned to each adjacency entry.
    pub fn transition_probability(&self) -> f64 {
        self.steps.transition_probability()
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: regions are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Adjacency entries of the location at `coord`.
    pub fn neighbours(&self, coord: &Coord) -> Option<&[Neighbour]> {
        self.region
            .rank(coord)
            .map(|id| self.entries[id.index()].as_slice())
    }

    /// Adjacency entries of the location with rank `id`.
    pub fn neighbours_of(&self, id: LocationId) -> Option<&[Neighbour]> {
        self.entries.get(id.index()).map(|e| e.as_slice())
    }

    /// All locations with their entries, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (LocationId, &[Neighbour])> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (LocationId(i as u32), e.as_slice()))
    }

    /// Coordinate a non-escape entry points at.
    pub fn resolve(&self, neighbour: Neighbour) -> Option<&Coord> {
        neighbour.location().and_then(|id| self.region.coord(id))
    }

    /// Number of steps from `id` that leave the region.
    pub fn escape_count(&self, id: LocationId) -> usize {
        self.neighbours_of(id)
            .map(|e| e.iter().filter(|n| n.is_escape()).count())
            .unwrap_or(0)
    }

    /// `true` if at least one step from `id` escapes.
    pub fn is_boundary(&self, id: LocationId) -> bool {
        self.escape_count(id) > 0
    }

    /// Locations with at least one escaping step.
    pub fn boundary(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.region.ids().filter(|&id| self.is_boundary(id))
    }

    /// Total number of escaping (location, step) pairs.
    pub fn escape_edges(&self) -> usize {
        self.region.ids().map(|id| self.escape_count(id)).sum()
    }
}

fn build_entries(region: &Region, steps: &StepSet) -> Vec<SmallVec<[Neighbour; 8]>> {
    region
        .iter()
        .map(|coord| {
            steps
                .iter()
                .map(|step| {
                    coord
                        .checked_add(step)
                        .and_then(|target| region.rank(&target))
                        .map_or(Neighbour::Escape, Neighbour::Location)
                })
                .collect()
        })
        .collect()
}
