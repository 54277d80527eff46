//! Polygon with holes.

use crate::bounds::BoundingBox;
use crate::point::Point;
use crate::polygon::{PointPosition, Polygon, Polygons};

/// A region delimited by one counter-clockwise outer contour and zero or
/// more clockwise hole contours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExPolygon {
    /// Outer contour, counter-clockwise.
    pub contour: Polygon,
    /// Hole contours, clockwise.
    pub holes: Polygons,
}

/// A set of disjoint regions.
pub type ExPolygons = Vec<ExPolygon>;

impl ExPolygon {
    /// Total number of contours (outer plus holes).
    #[inline]
    #[must_use]
    pub fn num_contours(&self) -> usize {
        1 + self.holes.len()
    }

    /// Contour by index: `0` is the outer contour, `1..` the holes.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.num_contours()`.
    #[inline]
    #[must_use]
    pub fn contour_or_hole(&self, idx: usize) -> &Polygon {
        if idx == 0 {
            &self.contour
        } else {
            &self.holes[idx - 1]
        }
    }

    /// Net enclosed area: the signed contour area plus the (negative)
    /// signed hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        let mut x2: i128 = self.contour.double_area();
        for hole in &self.holes {
            x2 += hole.double_area();
        }
        x2 as f64 / 2.0
    }

    /// Bounding box of the outer contour.
    #[inline]
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.contour.bounding_box()
    }

    /// Whether the region contains `pt`. Points on the outer contour or on
    /// a hole rim count as contained.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match self.contour.point_position(pt) {
            PointPosition::Outside => return false,
            PointPosition::OnBorder => return true,
            PointPosition::Inside => {}
        }
        for hole in &self.holes {
            if hole.point_position(pt) == PointPosition::Inside {
                return false;
            }
        }
        true
    }

    /// All contours as a flat polygon set, consuming the region.
    #[must_use]
    pub fn into_polygons(self) -> Polygons {
        let mut out = Vec::with_capacity(self.num_contours());
        out.push(self.contour);
        out.extend(self.holes);
        out
    }

    /// All contours as a flat polygon set, cloning.
    #[must_use]
    pub fn to_polygons(&self) -> Polygons {
        self.clone().into_polygons()
    }
}

impl From<Polygon> for ExPolygon {
    #[inline]
    fn from(contour: Polygon) -> Self {
        Self { contour, holes: Vec::new() }
    }
}
