//! Axis-aligned integer bounding box.

use crate::coord::Coord;
use crate::point::Point;
use crate::polygon::Polygon;

/// Axis-aligned bounding box in fixed-point coordinates, inclusive of its
/// borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl BoundingBox {
    /// An empty box that any merge will overwrite.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: Point::new(Coord::MAX, Coord::MAX),
            max: Point::new(Coord::MIN, Coord::MIN),
        }
    }

    /// Tight box around a point set. Empty input yields [`Self::empty`].
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        let mut out = Self::empty();
        for &p in points {
            out.merge_point(p);
        }
        out
    }

    /// Whether the box contains at least one point.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Grow the box to cover `p`.
    #[inline]
    pub fn merge_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grow the box to cover `other`.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        if other.is_valid() {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// The box grown by `delta` on every side.
    #[must_use]
    pub fn inflated(&self, delta: Coord) -> Self {
        if !self.is_valid() {
            return *self;
        }
        Self {
            min: Point::new(self.min.x - delta, self.min.y - delta),
            max: Point::new(self.max.x + delta, self.max.y + delta),
        }
    }

    /// Whether `p` lies inside the box, borders included.
    #[inline]
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether the boxes share at least one point.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Center point, rounded toward the minimum corner.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
        )
    }

    /// Box width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> Coord {
        self.max.x - self.min.x
    }

    /// Box height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> Coord {
        self.max.y - self.min.y
    }

    /// The box as a counter-clockwise rectangle contour.
    #[must_use]
    pub fn to_polygon(&self) -> Polygon {
        Polygon::from(vec![
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ])
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
