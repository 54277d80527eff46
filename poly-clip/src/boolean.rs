//! Boolean operations on polygon sets.
//!
//! The kernel subdivides all input edges at their mutual intersections,
//! evaluates exact winding numbers on both sides of every surviving edge
//! with an integer ray cast, keeps the edges where the fill status flips,
//! and stitches the kept edges into output contours by always taking the
//! tightest left turn. All predicates run on integer coordinates in `i128`;
//! the only rounding happens where two edges cross between lattice points.
//!
//! Output contours follow the region convention: outer boundaries wind
//! counter-clockwise, holes clockwise. Inputs of either orientation are
//! accepted and interpreted through the chosen [`FillRule`].

use hashbrown::HashMap;
use poly_types::{ExPolygon, ExPolygons, Point, PointPosition, Polygon, Polygons};
use smallvec::SmallVec;

use crate::subdivide::{polygon_edges, subdivide, CanonEdge, InputEdge};

/// Winding interpretation for one side of a boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Odd winding numbers are filled.
    EvenOdd,
    /// Any non-zero winding number is filled.
    #[default]
    NonZero,
    /// Only strictly positive winding numbers are filled.
    Positive,
    /// Only strictly negative winding numbers are filled.
    Negative,
}

impl FillRule {
    #[inline]
    fn filled(self, winding: i32) -> bool {
        match self {
            Self::EvenOdd => winding & 1 != 0,
            Self::NonZero => winding != 0,
            Self::Positive => winding > 0,
            Self::Negative => winding < 0,
        }
    }
}

/// Boolean operation combining the subject and clip fill states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Filled in either input.
    Union,
    /// Filled in both inputs.
    Intersection,
    /// Filled in the subject and not in the clip.
    Difference,
}

impl BooleanOp {
    #[inline]
    fn combine(self, subject: bool, clip: bool) -> bool {
        match self {
            Self::Union => subject || clip,
            Self::Intersection => subject && clip,
            Self::Difference => subject && !clip,
        }
    }
}

/// Apply `op` to the subject and clip polygon sets under the given fill
/// rules. Returns the boundary contours of the result, counter-clockwise
/// for outers and clockwise for holes.
#[must_use]
pub fn clip_polygons(
    subject: &[Polygon],
    subject_fill: FillRule,
    clip: &[Polygon],
    clip_fill: FillRule,
    op: BooleanOp,
) -> Polygons {
    let mut edges: Vec<InputEdge> = Vec::new();
    polygon_edges(subject, false, &mut edges);
    polygon_edges(clip, true, &mut edges);
    if edges.is_empty() {
        return Vec::new();
    }
    let canon = subdivide(&edges);
    let boundary = boundary_edges(&canon, subject_fill, clip_fill, op);
    stitch_loops(boundary)
}

/// Union of a polygon set under the non-zero fill rule.
#[must_use]
pub fn union(polygons: &[Polygon]) -> Polygons {
    union_with_fill(polygons, FillRule::NonZero)
}

/// Union of a polygon set under an explicit fill rule.
#[must_use]
pub fn union_with_fill(polygons: &[Polygon], fill: FillRule) -> Polygons {
    clip_polygons(polygons, fill, &[], FillRule::NonZero, BooleanOp::Union)
}

/// Union of a polygon set, with the result grouped into regions.
#[must_use]
pub fn union_ex(polygons: &[Polygon]) -> ExPolygons {
    polygons_to_expolygons(union(polygons))
}

/// Intersection of two polygon sets under the non-zero fill rule.
#[must_use]
pub fn intersection(subject: &[Polygon], clip: &[Polygon]) -> Polygons {
    intersection_with_fill(subject, FillRule::NonZero, clip, FillRule::NonZero)
}

/// Intersection of two polygon sets under explicit fill rules.
#[must_use]
pub fn intersection_with_fill(
    subject: &[Polygon],
    subject_fill: FillRule,
    clip: &[Polygon],
    clip_fill: FillRule,
) -> Polygons {
    clip_polygons(subject, subject_fill, clip, clip_fill, BooleanOp::Intersection)
}

/// Subject minus clip under the non-zero fill rule.
#[must_use]
pub fn difference(subject: &[Polygon], clip: &[Polygon]) -> Polygons {
    clip_polygons(subject, FillRule::NonZero, clip, FillRule::NonZero, BooleanOp::Difference)
}

/// Group loose contours into regions: each clockwise contour becomes a hole
/// of the smallest counter-clockwise contour containing its first vertex.
///
/// The contours must already be free of mutual intersections, as produced
/// by the boolean operations in this module.
#[must_use]
pub fn polygons_to_expolygons(polygons: Polygons) -> ExPolygons {
    let mut outers: Vec<(i128, Polygon)> = Vec::new();
    let mut holes: Polygons = Vec::new();
    for poly in polygons {
        let area2 = poly.double_area();
        if area2 >= 0 {
            outers.push((area2, poly));
        } else {
            holes.push(poly);
        }
    }
    // Smallest container first, so nested outers claim their own holes.
    outers.sort_unstable_by_key(|&(area2, _)| area2);
    let mut out: ExPolygons = outers.into_iter().map(|(_, contour)| ExPolygon::from(contour)).collect();
    for hole in holes {
        let Some(&probe) = hole.points.first() else {
            continue;
        };
        let slot = out
            .iter()
            .position(|ex| ex.contour.point_position(probe) != PointPosition::Outside);
        if let Some(slot) = slot {
            out[slot].holes.push(hole);
        } else {
            debug_assert!(false, "hole contour without a containing outer");
        }
    }
    out
}

/// Evaluate winding numbers on both sides of every canonical edge and keep
/// the edges where the combined fill status differs, directed with the
/// filled side on the left.
fn boundary_edges(
    canon: &[CanonEdge],
    subject_fill: FillRule,
    clip_fill: FillRule,
    op: BooleanOp,
) -> Vec<(Point, Point)> {
    if canon.is_empty() {
        return Vec::new();
    }
    let (mut min_x, mut max_x) = (i64::MAX, i64::MIN);
    for e in canon {
        min_x = min_x.min(e.a.x).min(e.b.x);
        max_x = max_x.max(e.a.x).max(e.b.x);
    }
    // All ray arithmetic runs on doubled coordinates so edge midpoints are
    // exact lattice points. A ray of direction (ray_x, 1) with ray_x larger
    // than the doubled x span rises less than one unit across the whole
    // subdivision, so it cannot pass through any edge endpoint and is not
    // parallel to any edge.
    let ray_x: i128 = 2 * (i128::from(max_x) - i128::from(min_x)) + 1;

    let mut out = Vec::new();
    for (i, e) in canon.iter().enumerate() {
        let px = i128::from(e.a.x) + i128::from(e.b.x);
        let py = i128::from(e.a.y) + i128::from(e.b.y);
        let mut wind_subject = 0i32;
        let mut wind_clip = 0i32;
        for (j, f) in canon.iter().enumerate() {
            if j == i {
                continue;
            }
            let cx = 2 * i128::from(f.a.x) - px;
            let cy = 2 * i128::from(f.a.y) - py;
            let dx = 2 * i128::from(f.b.x) - px;
            let dy = 2 * i128::from(f.b.y) - py;
            // Sides of the ray line; positive is left of the ray.
            let s1 = ray_x * cy - cx;
            let s2 = ray_x * dy - dx;
            debug_assert!(s1 != 0 && s2 != 0, "edge endpoint on the cast ray");
            if (s1 >= 0) == (s2 >= 0) {
                continue;
            }
            let ex = dx - cx;
            let ey = dy - cy;
            let t_num = cx * ey - cy * ex;
            let t_den = ray_x * ey - ex;
            debug_assert!(t_num != 0, "ray origin on another edge");
            if (t_num >= 0) != (t_den >= 0) {
                // The supporting line crosses behind the ray start.
                continue;
            }
            let sigma = if s1 < 0 { 1 } else { -1 };
            wind_subject += sigma * f.delta_subject;
            wind_clip += sigma * f.delta_clip;
        }
        // Which side of this edge the ray departs through: positive means
        // the ray direction points to the left of a -> b.
        let edge = e.b - e.a;
        let side = i128::from(edge.x) - i128::from(edge.y) * ray_x;
        debug_assert!(side != 0, "edge parallel to the cast ray");
        let (ws_left, wc_left, ws_right, wc_right) = if side > 0 {
            (
                wind_subject,
                wind_clip,
                wind_subject - e.delta_subject,
                wind_clip - e.delta_clip,
            )
        } else {
            (
                wind_subject + e.delta_subject,
                wind_clip + e.delta_clip,
                wind_subject,
                wind_clip,
            )
        };
        let in_left = op.combine(subject_fill.filled(ws_left), clip_fill.filled(wc_left));
        let in_right = op.combine(subject_fill.filled(ws_right), clip_fill.filled(wc_right));
        if in_left != in_right {
            out.push(if in_left { (e.a, e.b) } else { (e.b, e.a) });
        }
    }
    out
}

/// Chain directed boundary edges into closed contours. At every junction
/// the walk leaves along the first outgoing edge clockwise from the
/// reversed incoming direction, which traces each face of the subdivision
/// as its own simple loop with the interior on the left.
fn stitch_loops(mut boundary: Vec<(Point, Point)>) -> Polygons {
    boundary.sort_unstable();
    let mut outgoing: HashMap<Point, SmallVec<[u32; 4]>> = HashMap::new();
    for (idx, &(from, _)) in boundary.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        outgoing.entry(from).or_default().push(idx as u32);
    }
    let mut used = vec![false; boundary.len()];
    let mut loops: Polygons = Vec::new();
    for start in 0..boundary.len() {
        if used[start] {
            continue;
        }
        let mut points: Vec<Point> = Vec::new();
        let mut cur = start;
        let closed = loop {
            used[cur] = true;
            let (from, to) = boundary[cur];
            points.push(from);
            let Some(next) = pick_next(&boundary, &outgoing, &used, to, to - from, start) else {
                break false;
            };
            if next == start {
                break true;
            }
            cur = next;
        };
        debug_assert!(closed, "boundary edge chain does not close");
        if !closed {
            continue;
        }
        let poly = Polygon::from(points);
        if poly.len() >= 3 && poly.double_area() != 0 {
            loops.push(poly);
        }
    }
    loops
}

/// Pick the unused outgoing edge at `at` that is first in clockwise order
/// from the reversed incoming direction. The loop's start edge stays
/// eligible so the walk can close.
fn pick_next(
    boundary: &[(Point, Point)],
    outgoing: &HashMap<Point, SmallVec<[u32; 4]>>,
    used: &[bool],
    at: Point,
    dir_in: Point,
    start: usize,
) -> Option<usize> {
    let base = -dir_in;
    let mut best: Option<(u8, Point, usize)> = None;
    for &idx in outgoing.get(&at)? {
        let idx = idx as usize;
        if used[idx] && idx != start {
            continue;
        }
        let dir = boundary[idx].1 - boundary[idx].0;
        let rank = turn_rank(base, dir);
        let better = match best {
            None => true,
            Some((best_rank, best_dir, _)) => {
                rank < best_rank || (rank == best_rank && dir.cross(best_dir) < 0)
            }
        };
        if better {
            best = Some((rank, dir, idx));
        }
    }
    best.map(|(_, _, idx)| idx)
}

/// Coarse clockwise ordering of `dir` relative to `base`: the clockwise
/// half-plane first, then straight ahead, then the counter-clockwise
/// half-plane, and a u-turn back along `base` last.
fn turn_rank(base: Point, dir: Point) -> u8 {
    let c = base.cross(dir);
    if c < 0 {
        0
    } else if c > 0 {
        2
    } else if base.dot(dir) < 0 {
        1
    } else {
        3
    }
}
