//! Lattice coordinates, dense location identifiers, and adjacency entries.

use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// A cell on the integer lattice.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for lattices up to
/// 4 dimensions. Higher-dimensional lattices spill to the heap
/// transparently. Equality, hashing and ordering are structural, so two
/// coordinates with the same components are the same map key.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(SmallVec<[i32; 4]>);

impl Coord {
    /// Build a coordinate from its components.
    pub fn new(components: impl IntoIterator<Item = i32>) -> Self {
        Self(components.into_iter().collect())
    }

    /// The all-zero coordinate of the given dimensionality.
    ///
    /// # Examples
    ///
    /// ```
    /// use absorb_core::Coord;
    ///
    /// let o = Coord::origin(3);
    /// assert_eq!(o.as_slice(), &[0, 0, 0]);
    /// assert!(o.is_origin());
    /// ```
    pub fn origin(ndim: usize) -> Self {
        Self(SmallVec::from_elem(0, ndim))
    }

    /// A unit vector along `axis` with the given sign (`+1` or `-1`).
    ///
    /// Returns `None` if `axis >= ndim` or `sign` is not `±1`.
    pub fn unit(ndim: usize, axis: usize, sign: i32) -> Option<Self> {
        if axis >= ndim || sign.abs() != 1 {
            return None;
        }
        let mut c = Self::origin(ndim);
        c.0[axis] = sign;
        Some(c)
    }

    /// Number of components.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// `true` if every component is zero.
    pub fn is_origin(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Sum of absolute component values.
    pub fn l1_norm(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v.unsigned_abs())).sum()
    }

    /// Component-wise sum of `self` and `delta`.
    ///
    /// Returns `None` when the dimensionalities differ or any component
    /// overflows `i32`.
    pub fn checked_add(&self, delta: &Coord) -> Option<Coord> {
        if self.ndim() != delta.ndim() {
            return None;
        }
        self.0
            .iter()
            .zip(delta.0.iter())
            .map(|(&a, &b)| a.checked_add(b))
            .collect::<Option<SmallVec<[i32; 4]>>>()
            .map(Self)
    }
}

impl Deref for Coord {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Vec<i32>> for Coord {
    fn from(v: Vec<i32>) -> Self {
        Self(SmallVec::from_vec(v))
    }
}

impl From<&[i32]> for Coord {
    fn from(v: &[i32]) -> Self {
        Self(SmallVec::from_slice(v))
    }
}

impl<const N: usize> From<[i32; N]> for Coord {
    fn from(v: [i32; N]) -> Self {
        Self(v.into_iter().collect())
    }
}

impl FromIterator<i32> for Coord {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Dense rank of a location within its region.
///
/// Regions assign `LocationId(0)..LocationId(len)` in canonical
/// enumeration order. The same rank indexes rows of the transition
/// matrix and entries of a state distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u32);

impl LocationId {
    /// The rank as a `usize` index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LocationId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// One entry of an adjacency list: the target of a single unit step.
///
/// Stepping from a location either lands on another location of the
/// region or leaves it, in which case the walk is absorbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighbour {
    /// The step lands on another location of the region.
    Location(LocationId),
    /// The step leaves the region. Absorbing.
    Escape,
}

impl Neighbour {
    /// `true` for [`Neighbour::Escape`].
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }

    /// The target location, or `None` for an escape.
    pub fn location(&self) -> Option<LocationId> {
        match self {
            Self::Location(id) => Some(*id),
            Self::Escape => None,
        }
    }
}

impl fmt::Display for Neighbour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(id) => write!(f, "location {id}"),
            Self::Escape => write!(f, "escape"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn structural_equality_as_map_key() {
        let mut set = HashSet::new();
        set.insert(Coord::from([1, -2]));
        assert!(set.contains(&Coord::from(vec![1, -2])));
        assert!(!set.contains(&Coord::from([-2, 1])));
    }

    #[test]
    fn unit_vectors() {
        assert_eq!(Coord::unit(3, 1, -1), Some(Coord::from([0, -1, 0])));
        assert_eq!(Coord::unit(3, 3, 1), None);
        assert_eq!(Coord::unit(2, 0, 2), None);
    }

    #[test]
    fn checked_add_rejects_mismatch_and_overflow() {
        let a = Coord::from([1, 2]);
        assert_eq!(a.checked_add(&Coord::from([0, -1])), Some(Coord::from([1, 1])));
        assert_eq!(a.checked_add(&Coord::from([1])), None);
        assert_eq!(Coord::from([i32::MAX]).checked_add(&Coord::from([1])), None);
    }

    #[test]
    fn display_matches_tuple_notation() {
        assert_eq!(Coord::from([-3, 2]).to_string(), "(-3, 2)");
        assert_eq!(Coord::from([0]).to_string(), "(0,)");
    }

    #[test]
    fn neighbour_accessors() {
        assert!(Neighbour::Escape.is_escape());
        assert_eq!(Neighbour::Escape.location(), None);
        let n = Neighbour::Location(LocationId(4));
        assert!(!n.is_escape());
        assert_eq!(n.location(), Some(LocationId(4)));
        assert_eq!(n.to_string(), "location 4");
    }

    proptest! {
        #[test]
        fn add_then_subtract_unit_is_identity(
            a in -1000i32..1000,
            b in -1000i32..1000,
            axis in 0usize..2,
        ) {
            let c = Coord::from([a, b]);
            let up = Coord::unit(2, axis, 1).unwrap();
            let down = Coord::unit(2, axis, -1).unwrap();
            let back = c.checked_add(&up).unwrap().checked_add(&down).unwrap();
            prop_assert_eq!(back, c);
        }

        #[test]
        fn l1_norm_of_unit_is_one(ndim in 1usize..8, axis in 0usize..8, neg in any::<bool>()) {
            prop_assume!(axis < ndim);
            let sign = if neg { -1 } else { 1 };
            let u = Coord::unit(ndim, axis, sign).unwrap();
            prop_assert_eq!(u.l1_norm(), 1);
        }
    }
}
