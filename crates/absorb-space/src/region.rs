//! Walkable regions: box and explicit-shape construction.

use crate::error::SpaceError;
use crate::step::StepSet;
use absorb_core::{Coord, LocationId};
use indexmap::IndexSet;
use std::ops::RangeInclusive;

/// Builder input for a [`Region`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionSpec {
    /// Axis-aligned box, one extent per axis, centred on the origin.
    Box(Vec<u32>),
    /// Explicit list of cells. Dimensionality is taken from the first.
    Shape(Vec<Coord>),
}

/// A finite set of lattice cells the walker may occupy.
///
/// Cells are kept in canonical enumeration order: for boxes, the
/// Cartesian product of the axis ranges with the last axis varying
/// fastest; for shapes, the order the cells were given. The position of
/// a cell in that order is its [`LocationId`].
///
/// Regions are immutable once built.
#[derive(Clone, Debug)]
pub struct Region {
    ndim: usize,
    cells: IndexSet<Coord>,
}

impl Region {
    /// Maximum box extent: coordinates use `i32`, so each axis must fit.
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    /// Build a region from a [`RegionSpec`].
    pub fn compile(spec: &RegionSpec) -> Result<Self, SpaceError> {
        match spec {
            RegionSpec::Box(extents) => Self::from_extents(extents),
            RegionSpec::Shape(cells) => Self::from_shape(cells.iter().cloned()),
        }
    }

    /// Build an axis-aligned box centred on the origin.
    ///
    /// Each axis of extent `e` spans [`Region::axis_range`]`(e)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use absorb_core::Coord;
    /// use absorb_space::Region;
    ///
    /// let r = Region::from_extents(&[3]).unwrap();
    /// let cells: Vec<_> = r.iter().cloned().collect();
    /// assert_eq!(cells, vec![Coord::from([-1]), Coord::from([0]), Coord::from([1])]);
    ///
    /// // Even extents are one shorter on the negative side.
    /// let r = Region::from_extents(&[4, 1]).unwrap();
    /// assert_eq!(r.bounding_box(), vec![(-1, 2), (0, 0)]);
    /// ```
    pub fn from_extents(extents: &[u32]) -> Result<Self, SpaceError> {
        if extents.is_empty() {
            return Err(SpaceError::ZeroDimensions);
        }
        let mut total: u64 = 1;
        for (axis, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(SpaceError::EmptySpace);
            }
            if extent > Self::MAX_EXTENT {
                return Err(SpaceError::ExtentTooLarge {
                    axis,
                    value: extent,
                    max: Self::MAX_EXTENT,
                });
            }
            total = total
                .checked_mul(u64::from(extent))
                .filter(|&t| t <= u64::from(u32::MAX))
                .ok_or(SpaceError::CellCountOverflow)?;
        }

        let ranges: Vec<RangeInclusive<i32>> =
            extents.iter().map(|&e| Self::axis_range(e)).collect();
        let ndim = ranges.len();
        let mut cells = IndexSet::with_capacity(total as usize);
        let mut current: Vec<i32> = ranges.iter().map(|r| *r.start()).collect();

        // Odometer over the axis ranges, rightmost axis fastest.
        loop {
            cells.insert(Coord::from(current.as_slice()));

            let mut axis = ndim;
            loop {
                if axis == 0 {
                    return Ok(Self { ndim, cells });
                }
                axis -= 1;
                if current[axis] < *ranges[axis].end() {
                    current[axis] += 1;
                    break;
                }
                current[axis] = *ranges[axis].start();
            }
        }
    }

    /// Build a region from an explicit list of cells.
    ///
    /// Dimensionality is inferred from the first cell; every other cell
    /// must match it. Repeated cells are rejected.
    pub fn from_shape<I>(cells: I) -> Result<Self, SpaceError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut iter = cells.into_iter().peekable();
        let ndim = match iter.peek() {
            None => return Err(SpaceError::EmptySpace),
            Some(first) => first.ndim(),
        };
        if ndim == 0 {
            return Err(SpaceError::ZeroDimensions);
        }

        let mut set = IndexSet::new();
        for coord in iter {
            if coord.ndim() != ndim {
                return Err(SpaceError::DimensionMismatch {
                    expected: ndim,
                    found: coord.ndim(),
                });
            }
            if set.contains(&coord) {
                return Err(SpaceError::DuplicateCoord { coord });
            }
            set.insert(coord);
        }
        if set.len() > u32::MAX as usize {
            return Err(SpaceError::CellCountOverflow);
        }
        Ok(Self { ndim, cells: set })
    }

    /// Inclusive coordinate range along an axis of the given extent.
    ///
    /// The lower bound is `floor(-extent / 2) + 1` and the upper bound
    /// `floor(extent / 2)`, so the range holds exactly `extent` values,
    /// always includes 0, and is one shorter on the negative side for
    /// even extents.
    pub fn axis_range(extent: u32) -> RangeInclusive<i32> {
        let e = i64::from(extent);
        let lo = (-e).div_euclid(2) + 1;
        let hi = e.div_euclid(2);
        (lo as i32)..=(hi as i32)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty regions.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `true` if `coord` is a cell of this region.
    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains(coord)
    }

    /// Dense rank of `coord` in canonical order.
    pub fn rank(&self, coord: &Coord) -> Option<LocationId> {
        self.cells.get_index_of(coord).map(|i| LocationId(i as u32))
    }

    /// The cell with the given rank.
    pub fn coord(&self, id: LocationId) -> Option<&Coord> {
        self.cells.get_index(id.index())
    }

    /// Cells in canonical order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// All location ids, `0..len()`.
    pub fn ids(&self) -> impl Iterator<Item = LocationId> {
        (0..self.cells.len() as u32).map(LocationId)
    }

    /// The all-zero coordinate of this region's dimensionality.
    pub fn origin(&self) -> Coord {
        Coord::origin(self.ndim)
    }

    /// `true` if the origin is one of the cells.
    ///
    /// Boxes always contain it; shapes need not.
    pub fn has_origin(&self) -> bool {
        self.contains(&self.origin())
    }

    /// Per-axis `(min, max)` over all cells.
    pub fn bounding_box(&self) -> Vec<(i32, i32)> {
        let mut bounds = vec![(i32::MAX, i32::MIN); self.ndim];
        for coord in &self.cells {
            for (b, &v) in bounds.iter_mut().zip(coord.iter()) {
                b.0 = b.0.min(v);
                b.1 = b.1.max(v);
            }
        }
        bounds
    }

    /// The `2·ndim` unit steps for this region's dimensionality.
    pub fn unit_steps(&self) -> StepSet {
        StepSet::unit(self.ndim)
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Coord;
    type IntoIter = indexmap::set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
