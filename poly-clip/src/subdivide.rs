//! Planar subdivision of input edges.
//!
//! Splits every input edge at every intersection with every other edge
//! (transversal crossings, endpoint touches and collinear overlaps alike),
//! then merges the resulting sub-segments into canonical undirected edges
//! carrying net winding multiplicities for the subject and clip sides.
//! After this pass two distinct edges meet at most in shared endpoints,
//! which is what the winding evaluation in `boolean` relies on.

use hashbrown::HashMap;
use poly_types::{Point, Polygon};

use crate::intersect::{segment_intersection, SegSeg};

/// A directed input edge tagged with the side it came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InputEdge {
    pub a: Point,
    pub b: Point,
    pub clip_side: bool,
}

/// An undirected canonical edge (`a < b` lexicographically) with net
/// directed multiplicities per input side. Traversing `a -> b` raises the
/// winding number on the left by the respective delta.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CanonEdge {
    pub a: Point,
    pub b: Point,
    pub delta_subject: i32,
    pub delta_clip: i32,
}

/// Collect the directed closed-contour edges of `polygons`, skipping
/// zero-length segments.
pub(crate) fn polygon_edges(polygons: &[Polygon], clip_side: bool, out: &mut Vec<InputEdge>) {
    for poly in polygons {
        if poly.len() < 2 {
            continue;
        }
        let mut a = poly.points[poly.len() - 1];
        for &b in &poly.points {
            if a != b {
                out.push(InputEdge { a, b, clip_side });
            }
            a = b;
        }
    }
}

pub(crate) fn subdivide(edges: &[InputEdge]) -> Vec<CanonEdge> {
    let mut splits: Vec<Vec<Point>> = vec![Vec::new(); edges.len()];
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            match segment_intersection(edges[i].a, edges[i].b, edges[j].a, edges[j].b) {
                SegSeg::None => {}
                SegSeg::At(p) => {
                    splits[i].push(p);
                    splits[j].push(p);
                }
                SegSeg::Overlap(p, q) => {
                    splits[i].push(p);
                    splits[i].push(q);
                    splits[j].push(p);
                    splits[j].push(q);
                }
            }
        }
    }

    let mut canon: HashMap<(Point, Point), (i32, i32)> = HashMap::new();
    let mut chain: Vec<Point> = Vec::new();
    for (edge, cuts) in edges.iter().zip(splits.iter_mut()) {
        let dir = edge.b - edge.a;
        cuts.sort_unstable_by_key(|&p| (p - edge.a).dot(dir));
        chain.clear();
        chain.push(edge.a);
        chain.extend(cuts.iter().copied());
        chain.push(edge.b);
        chain.dedup();
        for pair in chain.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            if p == q {
                continue;
            }
            let (key, sign) = if p < q { ((p, q), 1) } else { ((q, p), -1) };
            let entry = canon.entry(key).or_insert((0, 0));
            if edge.clip_side {
                entry.1 += sign;
            } else {
                entry.0 += sign;
            }
        }
    }

    let mut out: Vec<CanonEdge> = canon
        .into_iter()
        .filter(|&(_, (ds, dc))| ds != 0 || dc != 0)
        .map(|((a, b), (delta_subject, delta_clip))| CanonEdge { a, b, delta_subject, delta_clip })
        .collect();
    // Hash order is not deterministic; results must be.
    out.sort_unstable_by_key(|e| (e.a, e.b));
    out
}
