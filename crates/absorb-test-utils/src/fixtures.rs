//! Reusable region fixtures.
//!
//! - [`LOCS_P1`] / [`locs_p1`]: a fixed 25-cell irregular 2D region.
//! - [`random_polyomino`]: a seeded, connected random region that
//!   always contains the origin.

use absorb_core::Coord;
use indexmap::IndexSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A 25-cell region: two rows spanning x = -3..3, a three-wide stem
/// running down to y = -3, and two single cells above the row ends.
///
/// Symmetric under `x -> -x`. The origin is a fully interior cell.
pub const LOCS_P1: [[i32; 2]; 25] = [
    [-3, 2],
    [3, 2],
    [-3, 1],
    [-2, 1],
    [-1, 1],
    [0, 1],
    [1, 1],
    [2, 1],
    [3, 1],
    [-3, 0],
    [-2, 0],
    [-1, 0],
    [0, 0],
    [1, 0],
    [2, 0],
    [3, 0],
    [-1, -1],
    [0, -1],
    [1, -1],
    [-1, -2],
    [0, -2],
    [1, -2],
    [-1, -3],
    [0, -3],
    [1, -3],
];

/// [`LOCS_P1`] as coordinates, in listing order.
pub fn locs_p1() -> Vec<Coord> {
    LOCS_P1.iter().map(|&c| Coord::from(c)).collect()
}

/// Grow a connected `ndim`-dimensional region of `cells` cells from the origin.
///
/// Each step picks an existing cell and a random unit direction and adds
/// the neighbour there if it is new. Deterministic for a given seed.
pub fn random_polyomino(ndim: usize, cells: usize, seed: u64) -> Vec<Coord> {
    assert!(ndim > 0, "ndim must be positive");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut set: IndexSet<Coord> = IndexSet::new();
    set.insert(Coord::origin(ndim));

    while set.len() < cells {
        let base = rng.random_range(0..set.len());
        let axis = rng.random_range(0..ndim);
        let sign = if rng.random::<bool>() { 1 } else { -1 };
        let Some(step) = Coord::unit(ndim, axis, sign) else {
            continue;
        };
        if let Some(next) = set[base].checked_add(&step) {
            set.insert(next);
        }
    }
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locs_p1_is_mirror_symmetric() {
        let cells: IndexSet<Coord> = locs_p1().into_iter().collect();
        assert_eq!(cells.len(), 25);
        for c in &cells {
            assert!(cells.contains(&Coord::from([-c[0], c[1]])));
        }
        assert!(cells.contains(&Coord::origin(2)));
    }

    #[test]
    fn polyomino_is_deterministic_and_sized() {
        let a = random_polyomino(2, 30, 7);
        let b = random_polyomino(2, 30, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert_eq!(a[0], Coord::origin(2));
    }

    #[test]
    fn polyomino_is_connected() {
        let cells: IndexSet<Coord> = random_polyomino(3, 40, 11).into_iter().collect();
        // Every cell after the first was added next to an earlier one.
        for (i, c) in cells.iter().enumerate().skip(1) {
            let touches = cells
                .iter()
                .take(i)
                .any(|d| c.iter().zip(d.iter()).map(|(a, b)| (a - b).abs()).sum::<i32>() == 1);
            assert!(touches, "{c} is not adjacent to an earlier cell");
        }
    }
}
