//! Epsilon inflation to heal near-degenerate polygon sets.
//!
//! Boolean results can leave sliver gaps or near-touching contours that a
//! later union should treat as connected. Nudging every contour outward by
//! a few coordinate units before the union closes those gaps at a cost far
//! below any printable tolerance.

use poly_types::{ExPolygons, Polygon, Polygons};

use crate::boolean::union_ex;
use crate::offset::{EndType, JoinType, Offsetter};

/// How far contours are pushed outward, in coordinate units.
pub const SAFETY_OFFSET: f64 = 10.0;

/// Offset every contour outward by [`SAFETY_OFFSET`]: counter-clockwise
/// contours grow, clockwise holes shrink. Orientations are preserved.
#[must_use]
pub fn safety_offset(polygons: &[Polygon]) -> Polygons {
    let mut out: Polygons = Vec::with_capacity(polygons.len());
    let mut offsetter = Offsetter::new();
    for polygon in polygons {
        let ccw = polygon.is_counter_clockwise();
        offsetter.clear();
        if ccw {
            offsetter.add_path(&polygon.points, JoinType::Miter, EndType::ClosedPolygon);
        } else {
            let mut reversed = polygon.clone();
            reversed.reverse();
            offsetter.add_path(&reversed.points, JoinType::Miter, EndType::ClosedPolygon);
        }
        let mut grown = offsetter.execute(if ccw { SAFETY_OFFSET } else { -SAFETY_OFFSET });
        if !ccw {
            for path in &mut grown {
                path.reverse();
            }
        }
        out.append(&mut grown);
    }
    out
}

/// Union after a safety offset, grouped into regions.
#[must_use]
pub fn union_safety_offset_ex(polygons: &[Polygon]) -> ExPolygons {
    union_ex(&safety_offset(polygons))
}
