//! Open path.

use crate::point::Point;

/// An open path of fixed-point points.
///
/// A closed contour that has been "opened" by repeating its first point at
/// the end is still a `Polyline`; [`Polyline::is_closed`] detects that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    /// Path points in order.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the first and last points coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.points.first() == self.points.last()
    }

    /// First point, if any.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point, if any.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

impl From<Vec<Point>> for Polyline {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}
