//! Fixed-point 2D point.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::coord::Coord;

/// A 2D point (or vector) in fixed-point coordinates.
///
/// Ordering is lexicographic by `(x, y)`, which the clipping kernel relies
/// on for canonical edge keys and sorted split-point lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate in scaled units.
    pub x: Coord,
    /// Y coordinate in scaled units.
    pub y: Coord,
}

impl Point {
    /// Create a point from scaled coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Exact 2D cross product of `self` and `other` taken as vectors.
    ///
    /// Positive when `other` lies counter-clockwise of `self`.
    #[inline]
    #[must_use]
    pub const fn cross(self, other: Self) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }

    /// Exact dot product of `self` and `other` taken as vectors.
    #[inline]
    #[must_use]
    pub const fn dot(self, other: Self) -> i128 {
        self.x as i128 * other.x as i128 + self.y as i128 * other.y as i128
    }

    /// Exact orientation predicate: sign of the cross product of `a→b` and
    /// `a→c`. Positive when `c` is left of the directed line `a→b`, zero
    /// when collinear.
    #[inline]
    #[must_use]
    pub const fn orient(a: Self, b: Self, c: Self) -> i128 {
        let abx = b.x - a.x;
        let aby = b.y - a.y;
        let acx = c.x - a.x;
        let acy = c.y - a.y;
        abx as i128 * acy as i128 - aby as i128 * acx as i128
    }

    /// Exact squared distance to `other`.
    #[inline]
    #[must_use]
    pub const fn distance_sq(self, other: Self) -> i128 {
        let dx = (other.x - self.x) as i128;
        let dy = (other.y - self.y) as i128;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}
