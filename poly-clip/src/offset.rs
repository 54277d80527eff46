//! Polygon and polyline offsetting.
//!
//! Grows or shrinks paths by a signed distance, with selectable corner
//! joins and end caps. Each path is expanded into a raw outline by walking
//! its edge normals; the outlines self-intersect at reflex corners, and a
//! positive-fill union resolves them into clean contours for either sign
//! of the offset.

use nalgebra::Vector2;
use poly_types::{Point, Polygon, Polygons};

use crate::boolean::{union_with_fill, FillRule};

use std::f64::consts::{PI, TAU};

/// Treatment of convex corners when offsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// Chamfer the corner with a single flat segment.
    Square,
    /// Approximate a circular arc around the corner.
    Round,
    /// Extend the edges to their true intersection, squaring off corners
    /// sharper than the miter limit.
    Miter,
}

/// Treatment of path ends when offsetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndType {
    /// A closed contour, offset to one side.
    ClosedPolygon,
    /// A closed contour offset to both sides, yielding a ring.
    ClosedLine,
    /// An open path with semicircular end caps.
    OpenRound,
}

/// Result of polygonizing a circular arc: the sine and cosine of the step
/// angle, and the number of steps per radian.
#[derive(Debug, Clone, Copy)]
struct ArcSteps {
    sin: f64,
    cos: f64,
    per_rad: f64,
    total: f64,
}

#[derive(Debug, Clone)]
struct PathNode {
    contour: Polygon,
    join_type: JoinType,
    end_type: EndType,
}

/// Path offsetter with Clipper-compatible semantics.
///
/// Paths are queued with [`add_path`](Self::add_path) and offset together
/// by [`execute`](Self::execute). The queued paths survive an execute, so
/// one set can be offset by several distances; [`clear`](Self::clear)
/// resets the queue while keeping the settings.
#[derive(Debug, Clone)]
pub struct Offsetter {
    /// Ratio of the sharpest allowed miter tip to the offset distance.
    pub miter_limit: f64,
    /// Maximum deviation of a polygonized arc from the true circle, in
    /// coordinate units. Values at or below zero fall back to a quarter
    /// unit.
    pub arc_tolerance: f64,
    /// Edges shorter than this are merged away when paths are added.
    /// Zero disables the filter.
    pub shortest_edge_length: f64,
    paths: Vec<PathNode>,
    /// Path and point index of the bottom-most vertex over all closed
    /// polygon paths, used to detect the outermost contour's orientation.
    lowest: Option<(usize, usize)>,
}

const DEF_ARC_TOLERANCE: f64 = 0.25;

/// Edges shorter than the offset distance times this factor carry no
/// useful shape information and are filtered out before offsetting.
///
/// Callers deriving a [`shortest_edge_length`](Offsetter::shortest_edge_length)
/// from an offset distance should multiply by this factor.
pub const OFFSET_SHORTEST_EDGE_FACTOR: f64 = 0.005;

fn near_zero(v: f64) -> bool {
    v > -1.0e-20 && v < 1.0e-20
}

#[allow(clippy::cast_possible_truncation)]
fn rounded(v: f64) -> i64 {
    v.round() as i64
}

/// Unit normal of the edge `a -> b`, pointing to its right. Zero for a
/// degenerate edge.
fn unit_normal(a: Point, b: Point) -> Vector2<f64> {
    if a == b {
        return Vector2::new(0.0, 0.0);
    }
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let f = 1.0 / (dx * dx + dy * dy).sqrt();
    Vector2::new(dy * f, -dx * f)
}

impl Default for Offsetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Offsetter {
    /// New offsetter with a miter limit of 2 and an arc tolerance of a
    /// quarter coordinate unit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            miter_limit: 2.0,
            arc_tolerance: DEF_ARC_TOLERANCE,
            shortest_edge_length: 0.0,
            paths: Vec::new(),
            lowest: None,
        }
    }

    /// Drop all queued paths, keeping the settings.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.lowest = None;
    }

    /// Queue a path for offsetting. Consecutive duplicate points and, with
    /// a positive [`shortest_edge_length`](Self::shortest_edge_length),
    /// near-duplicate points are merged. Closed polygons reduced below
    /// three distinct points are dropped.
    pub fn add_path(&mut self, path: &[Point], join_type: JoinType, end_type: EndType) {
        let Some(&first) = path.first() else { return };
        let mut high = path.len() - 1;
        let min_len_sq = if self.shortest_edge_length > 0.0 {
            Some(self.shortest_edge_length * self.shortest_edge_length)
        } else {
            None
        };
        let too_close = |a: Point, b: Point| {
            a == b || min_len_sq.is_some_and(|limit| (a.distance_sq(b) as f64) < limit)
        };
        if matches!(end_type, EndType::ClosedPolygon | EndType::ClosedLine) {
            while high > 0 && too_close(first, path[high]) {
                high -= 1;
            }
        }
        let mut points = Vec::with_capacity(high + 1);
        points.push(first);
        // Index of the bottom-most point kept so far (largest y, then
        // smallest x).
        let mut bottom = 0usize;
        for &pt in &path[1..=high] {
            if too_close(points[points.len() - 1], pt) {
                continue;
            }
            points.push(pt);
            let low = points[bottom];
            if pt.y > low.y || (pt.y == low.y && pt.x < low.x) {
                bottom = points.len() - 1;
            }
        }
        if end_type == EndType::ClosedPolygon && points.len() < 3 {
            return;
        }
        self.paths.push(PathNode {
            contour: Polygon { points },
            join_type,
            end_type,
        });
        if end_type != EndType::ClosedPolygon {
            return;
        }
        let idx = self.paths.len() - 1;
        let candidate = self.paths[idx].contour.points[bottom];
        let lower = match self.lowest {
            None => true,
            Some((pi, ki)) => {
                let current = self.paths[pi].contour.points[ki];
                candidate.y > current.y || (candidate.y == current.y && candidate.x < current.x)
            }
        };
        if lower {
            self.lowest = Some((idx, bottom));
        }
    }

    /// Offset all queued paths by `delta` and return the cleaned result.
    /// Positive distances grow counter-clockwise contours, negative
    /// distances shrink them.
    pub fn execute(&mut self, delta: f64) -> Polygons {
        self.fix_orientations();
        let raw = self.do_offset(delta);
        union_with_fill(&raw, FillRule::Positive)
    }

    /// Make the closed polygon holding the bottom-most vertex wind
    /// counter-clockwise and align every other closed path with it.
    fn fix_orientations(&mut self) {
        let reverse_all = match self.lowest {
            Some((pi, _)) => !self.paths[pi].contour.is_counter_clockwise(),
            None => false,
        };
        if reverse_all {
            for node in &mut self.paths {
                if node.end_type == EndType::ClosedPolygon
                    || (node.end_type == EndType::ClosedLine && node.contour.is_counter_clockwise())
                {
                    node.contour.reverse();
                }
            }
        } else {
            for node in &mut self.paths {
                if node.end_type == EndType::ClosedLine && !node.contour.is_counter_clockwise() {
                    node.contour.reverse();
                }
            }
        }
    }

    fn do_offset(&self, delta: f64) -> Polygons {
        let mut out: Polygons = Vec::new();
        if near_zero(delta) {
            // Zero offset: pass closed polygons through untouched.
            for node in &self.paths {
                if node.end_type == EndType::ClosedPolygon {
                    out.push(node.contour.clone());
                }
            }
            return out;
        }

        let miter_lim = if self.miter_limit > 2.0 {
            2.0 / (self.miter_limit * self.miter_limit)
        } else {
            0.5
        };
        let y = if self.arc_tolerance <= 0.0 {
            DEF_ARC_TOLERANCE
        } else {
            self.arc_tolerance.min(delta.abs() * DEF_ARC_TOLERANCE)
        };
        let mut total = PI / (1.0 - y / delta.abs()).acos();
        if total > delta.abs() * PI {
            total = delta.abs() * PI;
        }
        let mut steps = ArcSteps {
            sin: (TAU / total).sin(),
            cos: (TAU / total).cos(),
            per_rad: total / TAU,
            total,
        };
        if delta < 0.0 {
            steps.sin = -steps.sin;
        }

        let mut pass = OffsetPass {
            delta,
            miter_lim,
            steps,
            sin_a: 0.0,
            src: Vec::new(),
            normals: Vec::new(),
            dest: Vec::new(),
        };
        out.reserve(self.paths.len() * 2);
        for node in &self.paths {
            let len = node.contour.len();
            // Shrinking makes sense only for closed polygons with area.
            if len == 0 || (delta <= 0.0 && (len < 3 || node.end_type != EndType::ClosedPolygon)) {
                continue;
            }
            pass.src.clear();
            pass.src.extend_from_slice(&node.contour.points);
            pass.dest.clear();

            if len == 1 {
                pass.offset_single_point(node.join_type);
                out.push(Polygon { points: std::mem::take(&mut pass.dest) });
                continue;
            }

            pass.normals.clear();
            for j in 0..len - 1 {
                pass.normals.push(unit_normal(pass.src[j], pass.src[j + 1]));
            }
            if matches!(node.end_type, EndType::ClosedPolygon | EndType::ClosedLine) {
                pass.normals.push(unit_normal(pass.src[len - 1], pass.src[0]));
            } else {
                pass.normals.push(pass.normals[len - 2]);
            }

            match node.end_type {
                EndType::ClosedPolygon => {
                    let mut k = len - 1;
                    for j in 0..len {
                        pass.offset_point(j, &mut k, node.join_type);
                    }
                    out.push(Polygon { points: std::mem::take(&mut pass.dest) });
                }
                EndType::ClosedLine => {
                    let mut k = len - 1;
                    for j in 0..len {
                        pass.offset_point(j, &mut k, node.join_type);
                    }
                    out.push(Polygon { points: std::mem::take(&mut pass.dest) });
                    // Second side: flip the normals and walk back.
                    let last = pass.normals[len - 1];
                    for j in (1..len).rev() {
                        pass.normals[j] = -pass.normals[j - 1];
                    }
                    pass.normals[0] = -last;
                    k = 0;
                    for j in (0..len).rev() {
                        pass.offset_point(j, &mut k, node.join_type);
                    }
                    out.push(Polygon { points: std::mem::take(&mut pass.dest) });
                }
                EndType::OpenRound => {
                    let mut k = 0;
                    for j in 1..len - 1 {
                        pass.offset_point(j, &mut k, node.join_type);
                    }
                    // Far end cap.
                    let j = len - 1;
                    k = len - 2;
                    pass.sin_a = 0.0;
                    pass.normals[j] = -pass.normals[j];
                    pass.do_round(j, k);
                    // Second side: flip the normals and walk back.
                    for j in (1..len).rev() {
                        pass.normals[j] = -pass.normals[j - 1];
                    }
                    pass.normals[0] = -pass.normals[1];
                    k = len - 1;
                    for j in (1..k).rev() {
                        pass.offset_point(j, &mut k, node.join_type);
                    }
                    // Near end cap.
                    pass.sin_a = 0.0;
                    pass.do_round(0, 1);
                    out.push(Polygon { points: std::mem::take(&mut pass.dest) });
                }
            }
        }
        out
    }
}

/// Working state of one offset pass over the queued paths.
struct OffsetPass {
    delta: f64,
    miter_lim: f64,
    steps: ArcSteps,
    /// Sine of the turn angle at the corner being offset.
    sin_a: f64,
    src: Vec<Point>,
    normals: Vec<Vector2<f64>>,
    dest: Vec<Point>,
}

impl OffsetPass {
    fn push(&mut self, j: usize, n: Vector2<f64>) {
        self.dest.push(Point::new(
            rounded(self.src[j].x as f64 + n.x * self.delta),
            rounded(self.src[j].y as f64 + n.y * self.delta),
        ));
    }

    /// A lone point grows into a polygonized circle or a square.
    #[allow(clippy::cast_possible_truncation)]
    fn offset_single_point(&mut self, join_type: JoinType) {
        if join_type == JoinType::Round {
            let mut x = 1.0;
            let mut y = 0.0;
            let count = self.steps.total.max(0.0) as i64;
            for _ in 0..count {
                self.push(0, Vector2::new(x, y));
                let x2 = x;
                x = x * self.steps.cos - self.steps.sin * y;
                y = x2 * self.steps.sin + y * self.steps.cos;
            }
        } else {
            let mut x = -1.0;
            let mut y = -1.0;
            for _ in 0..4 {
                self.push(0, Vector2::new(x, y));
                if x < 0.0 {
                    x = 1.0;
                } else if y < 0.0 {
                    y = 1.0;
                } else {
                    x = -1.0;
                }
            }
        }
    }

    /// Offset the corner at `j`, with `k` the previous vertex. `k`
    /// advances to `j` except on the near-collinear shortcut.
    fn offset_point(&mut self, j: usize, k: &mut usize, join_type: JoinType) {
        let nk = self.normals[*k];
        let nj = self.normals[j];
        self.sin_a = nk.x * nj.y - nj.x * nk.y;
        if (self.sin_a * self.delta).abs() < 1.0 {
            // The offset points of the two edges land within one unit of
            // each other: emit one of them and keep the previous normal.
            let cos_a = nk.x * nj.x + nj.y * nk.y;
            if cos_a > 0.0 {
                self.push(j, nk);
                return;
            }
        } else if self.sin_a > 1.0 {
            self.sin_a = 1.0;
        } else if self.sin_a < -1.0 {
            self.sin_a = -1.0;
        }

        if self.sin_a * self.delta < 0.0 {
            // Concave corner: emit both offset points bridged through the
            // source vertex; the union cleans up the overlap.
            self.push(j, nk);
            self.dest.push(self.src[j]);
            self.push(j, nj);
        } else {
            match join_type {
                JoinType::Miter => {
                    let r = 1.0 + (nj.x * nk.x + nj.y * nk.y);
                    if r >= self.miter_lim {
                        self.do_miter(j, *k, r);
                    } else {
                        self.do_square(j, *k);
                    }
                }
                JoinType::Square => self.do_square(j, *k),
                JoinType::Round => self.do_round(j, *k),
            }
        }
        *k = j;
    }

    fn do_square(&mut self, j: usize, k: usize) {
        let nk = self.normals[k];
        let nj = self.normals[j];
        let dx = (self.sin_a.atan2(nk.x * nj.x + nk.y * nj.y) / 4.0).tan();
        self.dest.push(Point::new(
            rounded(self.src[j].x as f64 + self.delta * (nk.x - nk.y * dx)),
            rounded(self.src[j].y as f64 + self.delta * (nk.y + nk.x * dx)),
        ));
        self.dest.push(Point::new(
            rounded(self.src[j].x as f64 + self.delta * (nj.x + nj.y * dx)),
            rounded(self.src[j].y as f64 + self.delta * (nj.y - nj.x * dx)),
        ));
    }

    fn do_miter(&mut self, j: usize, k: usize, r: f64) {
        let q = self.delta / r;
        let nk = self.normals[k];
        let nj = self.normals[j];
        self.dest.push(Point::new(
            rounded(self.src[j].x as f64 + (nk.x + nj.x) * q),
            rounded(self.src[j].y as f64 + (nk.y + nj.y) * q),
        ));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn do_round(&mut self, j: usize, k: usize) {
        let nk = self.normals[k];
        let nj = self.normals[j];
        let angle = self.sin_a.atan2(nk.x * nj.x + nk.y * nj.y);
        let count = ((self.steps.per_rad * angle.abs()).round() as i64).max(1);
        let mut x = nk.x;
        let mut y = nk.y;
        for _ in 0..count {
            self.push(j, Vector2::new(x, y));
            let x2 = x;
            x = x * self.steps.cos - self.steps.sin * y;
            y = x2 * self.steps.sin + y * self.steps.cos;
        }
        self.push(j, nj);
    }
}
