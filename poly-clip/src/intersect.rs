//! Exact segment intersection predicates.
//!
//! All predicates work on `i64` coordinates with `i128` intermediates, so
//! they are exact for the full coordinate range the engine uses. Computed
//! intersection points are rounded to the nearest lattice point.

use poly_types::Point;

/// Intersection of two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegSeg {
    /// Segments do not meet.
    None,
    /// Segments meet in a single point (a transversal crossing, an endpoint
    /// touch, or a degenerate collinear touch).
    At(Point),
    /// Segments are collinear and share a span with distinct endpoints.
    Overlap(Point, Point),
}

/// Round `n / d` to the nearest integer, ties away from zero. `d` must be
/// non-zero.
#[inline]
fn round_div(n: i128, d: i128) -> i128 {
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    }
}

/// Whether `n / d` lies in `[0, 1]`, for non-zero `d`.
#[inline]
fn param_in_unit(n: i128, d: i128) -> bool {
    if d > 0 {
        n >= 0 && n <= d
    } else {
        n <= 0 && n >= d
    }
}

/// Compute the intersection of segments `a..b` and `c..d`.
///
/// Zero-length segments are not supported; callers filter them out.
#[must_use]
#[allow(clippy::many_single_char_names)]
#[allow(clippy::similar_names)]
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> SegSeg {
    let d1 = b - a;
    let d2 = d - c;
    let denom = d1.cross(d2);
    if denom != 0 {
        let ca = c - a;
        let t_num = ca.cross(d2);
        let u_num = ca.cross(d1);
        if !param_in_unit(t_num, denom) || !param_in_unit(u_num, denom) {
            return SegSeg::None;
        }
        let x = i128::from(a.x) + round_div(t_num * i128::from(d1.x), denom);
        let y = i128::from(a.y) + round_div(t_num * i128::from(d1.y), denom);
        #[allow(clippy::cast_possible_truncation)]
        return SegSeg::At(Point::new(x as i64, y as i64));
    }
    // Parallel. Distinct lines cannot meet.
    if (c - a).cross(d1) != 0 {
        return SegSeg::None;
    }
    // Collinear: order everything by the parameter along d1.
    let t = |p: Point| (p - a).dot(d1);
    let (mut c_t, mut d_t) = (t(c), t(d));
    let (mut c_pt, mut d_pt) = (c, d);
    if c_t > d_t {
        core::mem::swap(&mut c_t, &mut d_t);
        core::mem::swap(&mut c_pt, &mut d_pt);
    }
    let b_t = t(b);
    // Span of the overlap in parameter space: [lo, hi].
    let (lo_t, lo_pt) = if c_t > 0 { (c_t, c_pt) } else { (0, a) };
    let (hi_t, hi_pt) = if d_t < b_t { (d_t, d_pt) } else { (b_t, b) };
    if lo_t > hi_t {
        SegSeg::None
    } else if lo_t == hi_t {
        SegSeg::At(lo_pt)
    } else {
        SegSeg::Overlap(lo_pt, hi_pt)
    }
}
