//! Closed polygon contour.

use crate::bounds::BoundingBox;
use crate::point::Point;
use crate::polyline::Polyline;

/// Result of locating a point relative to a closed contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPosition {
    /// Strictly outside the contour.
    Outside,
    /// Exactly on a contour edge or vertex.
    OnBorder,
    /// Strictly inside the contour.
    Inside,
}

/// A closed contour of fixed-point points.
///
/// The closing edge from the last point back to the first is implicit.
/// Counter-clockwise contours enclose positive area (outer boundaries),
/// clockwise contours enclose negative area (holes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    /// Contour points. The first point is not repeated at the end.
    pub points: Vec<Point>,
}

/// A set of polygons, possibly of mixed orientation.
pub type Polygons = Vec<Polygon>;

impl Polygon {
    /// Create an empty polygon.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the signed area, exact. Positive for counter-clockwise
    /// contours.
    #[must_use]
    pub fn double_area(&self) -> i128 {
        if self.points.len() < 3 {
            return 0;
        }
        let mut sum: i128 = 0;
        let mut prev = self.points[self.points.len() - 1];
        for &p in &self.points {
            sum += prev.cross(p);
            prev = p;
        }
        sum
    }

    /// Signed area in squared coordinate units.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.double_area() as f64 / 2.0
    }

    /// Whether the contour winds counter-clockwise (non-negative area,
    /// matching the clipping convention where degenerate contours count as
    /// positive).
    #[inline]
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.double_area() >= 0
    }

    /// Reverse the point order, flipping orientation.
    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Tight bounding box of the contour.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// The contour as an open polyline with the first point repeated at the
    /// end.
    #[must_use]
    pub fn opened(&self) -> Polyline {
        let mut points = self.points.clone();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Polyline { points }
    }

    /// Locate `pt` relative to the contour using exact arithmetic: an
    /// on-edge test per segment, then the non-zero winding rule with
    /// half-open horizontal crossings.
    #[must_use]
    pub fn point_position(&self, pt: Point) -> PointPosition {
        if self.points.len() < 3 {
            return PointPosition::Outside;
        }
        let mut winding: i64 = 0;
        let mut a = self.points[self.points.len() - 1];
        for &b in &self.points {
            if on_segment(pt, a, b) {
                return PointPosition::OnBorder;
            }
            if a.y <= pt.y {
                if b.y > pt.y && Point::orient(a, b, pt) > 0 {
                    winding += 1;
                }
            } else if b.y <= pt.y && Point::orient(a, b, pt) < 0 {
                winding -= 1;
            }
            a = b;
        }
        if winding == 0 {
            PointPosition::Outside
        } else {
            PointPosition::Inside
        }
    }
}

impl From<Vec<Point>> for Polygon {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// Exact test whether `pt` lies on the closed segment `a..=b`.
#[must_use]
fn on_segment(pt: Point, a: Point, b: Point) -> bool {
    Point::orient(a, b, pt) == 0
        && pt.x >= a.x.min(b.x)
        && pt.x <= a.x.max(b.x)
        && pt.y >= a.y.min(b.y)
        && pt.y <= a.y.max(b.y)
}
