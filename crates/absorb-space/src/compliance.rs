//! Adjacency invariant test helpers.
//!
//! These functions verify that an [`Adjacency`] satisfies the contract
//! the solvers rely on. Reused across the region and adjacency test
//! modules.

use crate::adjacency::Adjacency;
use absorb_core::Neighbour;
use indexmap::IndexSet;

/// Assert that every location has exactly one entry per step.
pub fn assert_degree_uniform(adj: &Adjacency) {
    for (id, entries) in adj.iter() {
        assert_eq!(
            entries.len(),
            adj.steps().len(),
            "location {id} has {} entries, expected {}",
            entries.len(),
            adj.steps().len()
        );
    }
}

/// Assert that an entry is `Escape` exactly when `coord + step` is not
/// a location of the region.
pub fn assert_escape_iff_outside(adj: &Adjacency) {
    let region = adj.region();
    for (id, entries) in adj.iter() {
        let coord = region.coord(id).expect("id from iter must resolve");
        for (step, entry) in adj.steps().iter().zip(entries) {
            let target = coord.checked_add(step);
            let inside = target.as_ref().is_some_and(|t| region.contains(t));
            match entry {
                Neighbour::Escape => assert!(
                    !inside,
                    "{coord} + {step} is inside the region but marked escape"
                ),
                Neighbour::Location(n) => {
                    assert!(inside, "{coord} + {step} is outside but marked {n}");
                    assert_eq!(region.coord(*n), target.as_ref());
                }
            }
        }
    }
}

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
///
/// Holds for the unit step set, which is closed under negation.
pub fn assert_neighbours_symmetric(adj: &Adjacency) {
    for (a, entries) in adj.iter() {
        for b in entries.iter().filter_map(Neighbour::location) {
            let back = adj.neighbours_of(b).expect("neighbour id must resolve");
            assert!(
                back.contains(&Neighbour::Location(a)),
                "neighbour symmetry violated: {b} in N({a}) but {a} not in N({b})"
            );
        }
    }
}

/// Assert that ranks and coordinates round-trip and are unique.
pub fn assert_ranks_complete(adj: &Adjacency) {
    let region = adj.region();
    assert_eq!(adj.len(), region.len());
    let unique: IndexSet<_> = region.iter().collect();
    assert_eq!(unique.len(), region.len(), "region has duplicate cells");
    for id in region.ids() {
        let coord = region.coord(id).expect("id in range");
        assert_eq!(region.rank(coord), Some(id));
    }
}

/// Run all compliance checks on an adjacency built from unit steps.
pub fn run_full_compliance(adj: &Adjacency) {
    assert_degree_uniform(adj);
    assert_escape_iff_outside(adj);
    assert_neighbours_symmetric(adj);
    assert_ranks_complete(adj);
}
