//! Intersection of open polylines with closed clip regions, with
//! per-point provenance.
//!
//! Both sides carry numeric tags. Every point of the clipped output
//! remembers whether it was an original subject vertex or an intersection
//! with a clip contour, and which tags were involved. This keeps the
//! attribution exact where a polyline enters and leaves a clip region,
//! which is what seed extraction needs to pair wavefront pieces with
//! boundary regions.
//!
//! Clip contours sharing a tag form one region under the non-zero fill
//! rule (a contour plus its holes). Output pieces are additionally cut
//! where the subject steps from one clip region straight into an abutting
//! one, so a piece never spans two regions.

use poly_types::{Point, Polygon};
use smallvec::SmallVec;

use crate::intersect::{segment_intersection, SegSeg};

/// An input path with a provenance tag attached to all of its points.
///
/// Subject paths are open polylines. Clip paths are closed contours with
/// the closing edge implicit; all contours of one clip region share a tag.
#[derive(Debug, Clone)]
pub struct TaggedPath {
    /// Path points.
    pub points: Vec<Point>,
    /// Provenance tag.
    pub tag: u32,
}

impl TaggedPath {
    /// Tag an open polyline.
    #[inline]
    #[must_use]
    pub fn new(points: Vec<Point>, tag: u32) -> Self {
        Self { points, tag }
    }

    /// Tag a closed contour.
    #[inline]
    #[must_use]
    pub fn from_polygon(polygon: &Polygon, tag: u32) -> Self {
        Self { points: polygon.points.clone(), tag }
    }
}

/// Where a point of a clipped polyline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOrigin {
    /// A vertex of the subject path with the given tag.
    Subject {
        /// Tag of the subject path.
        tag: u32,
    },
    /// An intersection of a subject path with a clip contour.
    Intersection {
        /// Tag of the subject path.
        subject: u32,
        /// Tag of the clip contour that cut it.
        clip: u32,
    },
}

/// A piece of a subject polyline inside the clip region.
///
/// `origins` runs parallel to `points`.
#[derive(Debug, Clone)]
pub struct ClippedPolyline {
    /// Points of the piece, in subject path order.
    pub points: Vec<Point>,
    /// Provenance of each point.
    pub origins: Vec<PointOrigin>,
}

impl ClippedPolyline {
    /// Whether the piece loops back onto its first point.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.points.first() == self.points.last()
    }
}

#[derive(Debug, Clone, Copy)]
struct ClipEdge {
    a: Point,
    b: Point,
    tag: u32,
}

/// Clip open subject polylines against the region bounded by the clip
/// contours under the non-zero fill rule. Pieces running exactly along a
/// clip edge count as inside.
#[must_use]
pub fn intersect_polylines_tagged(subjects: &[TaggedPath], clips: &[TaggedPath]) -> Vec<ClippedPolyline> {
    let mut clip_edges: Vec<ClipEdge> = Vec::new();
    for path in clips {
        if path.points.len() < 3 {
            continue;
        }
        let mut a = path.points[path.points.len() - 1];
        for &b in &path.points {
            if a != b {
                clip_edges.push(ClipEdge { a, b, tag: path.tag });
            }
            a = b;
        }
    }
    let mut out = Vec::new();
    for path in subjects {
        clip_path(path, &clip_edges, &mut out);
    }
    out
}

fn clip_path(path: &TaggedPath, clip_edges: &[ClipEdge], out: &mut Vec<ClippedPolyline>) {
    if path.points.len() < 2 || clip_edges.is_empty() {
        return;
    }
    // Subdivide the path at every clip crossing, remembering which clip
    // contour cut it. The first cut at a point wins.
    let mut pts: Vec<(Point, Option<u32>)> = Vec::with_capacity(path.points.len());
    pts.push((path.points[0], None));
    let mut splits: Vec<(Point, u32)> = Vec::new();
    for pair in path.points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        if p == q {
            continue;
        }
        splits.clear();
        for edge in clip_edges {
            match segment_intersection(p, q, edge.a, edge.b) {
                SegSeg::None => {}
                SegSeg::At(x) => splits.push((x, edge.tag)),
                SegSeg::Overlap(x, y) => {
                    splits.push((x, edge.tag));
                    splits.push((y, edge.tag));
                }
            }
        }
        let dir = q - p;
        splits.sort_by_key(|&(x, _)| (x - p).dot(dir));
        for &(x, tag) in &splits {
            push_merged(&mut pts, x, Some(tag));
        }
        push_merged(&mut pts, q, None);
    }

    // Keep the maximal runs of sub-edges lying in a single clip region.
    let mut run: Option<(usize, u32)> = None;
    for i in 0..pts.len().saturating_sub(1) {
        let owner = sub_edge_owner(pts[i].0, pts[i + 1].0, clip_edges);
        match (run, owner) {
            (None, Some(entered)) => run = Some((i, entered)),
            (Some((start, current)), Some(entered)) if entered != current => {
                // The path steps from one clip region straight into an
                // abutting one; cut the piece at the shared point.
                emit_run(path.tag, current, &pts[start..=i], out);
                run = Some((i, entered));
            }
            (Some((start, current)), None) => {
                emit_run(path.tag, current, &pts[start..=i], out);
                run = None;
            }
            _ => {}
        }
    }
    if let Some((start, current)) = run {
        emit_run(path.tag, current, &pts[start..], out);
    }
}

fn push_merged(pts: &mut Vec<(Point, Option<u32>)>, pt: Point, tag: Option<u32>) {
    if let Some(last) = pts.last_mut() {
        if last.0 == pt {
            if last.1.is_none() {
                last.1 = tag;
            }
            return;
        }
    }
    pts.push((pt, tag));
}

/// The clip region the open sub-segment `p..q` lies in, or `None` when it
/// is outside all of them. The test point is the midpoint, held exactly in
/// doubled coordinates; midpoints on a clip edge count as inside that
/// edge's region. Per-tag non-zero winding keeps disjoint regions apart
/// even where their contours touch.
fn sub_edge_owner(p: Point, q: Point, clip_edges: &[ClipEdge]) -> Option<u32> {
    let mx = i128::from(p.x) + i128::from(q.x);
    let my = i128::from(p.y) + i128::from(q.y);
    let mut windings: SmallVec<[(u32, i64); 4]> = SmallVec::new();
    for edge in clip_edges {
        let ax = 2 * i128::from(edge.a.x);
        let ay = 2 * i128::from(edge.a.y);
        let bx = 2 * i128::from(edge.b.x);
        let by = 2 * i128::from(edge.b.y);
        let orient = (bx - ax) * (my - ay) - (by - ay) * (mx - ax);
        if orient == 0
            && mx >= ax.min(bx)
            && mx <= ax.max(bx)
            && my >= ay.min(by)
            && my <= ay.max(by)
        {
            return Some(edge.tag);
        }
        let delta: i64 = if ay <= my {
            i64::from(by > my && orient > 0)
        } else if by <= my && orient < 0 {
            -1
        } else {
            0
        };
        if delta != 0 {
            match windings.iter_mut().find(|(tag, _)| *tag == edge.tag) {
                Some(entry) => entry.1 += delta,
                None => windings.push((edge.tag, delta)),
            }
        }
    }
    windings.iter().find(|&&(_, w)| w != 0).map(|&(tag, _)| tag)
}

fn emit_run(subject: u32, owner: u32, run: &[(Point, Option<u32>)], out: &mut Vec<ClippedPolyline>) {
    if run.len() < 2 {
        return;
    }
    let mut points = Vec::with_capacity(run.len());
    let mut origins = Vec::with_capacity(run.len());
    for (i, &(pt, tag)) in run.iter().enumerate() {
        points.push(pt);
        origins.push(match tag {
            // End points cut by a clip contour are attributed to the region
            // the piece lies in, not to the contour that happened to cut
            // it; the two differ where two regions abut.
            Some(_) if i == 0 || i == run.len() - 1 => {
                PointOrigin::Intersection { subject, clip: owner }
            }
            Some(clip) => PointOrigin::Intersection { subject, clip },
            None => PointOrigin::Subject { tag: subject },
        });
    }
    out.push(ClippedPolyline { points, origins });
}
