//! Wave seed extraction.
//!
//! Finds where the slightly expanded outline of each source region lies
//! inside each boundary region and slices that outline into per-boundary
//! pieces. Each piece carries its `(source, boundary)` pair and becomes
//! the starting front of one wave.

use poly_clip::{
    intersect_polylines_tagged, AabbTree, ClippedPolyline, EndType, JoinType, Offsetter,
    PointOrigin, TaggedPath, OFFSET_SHORTEST_EDGE_FACTOR,
};
use poly_types::{BoundingBox, ExPolygon, Point, Polyline};
use tracing::debug;

/// One contiguous piece of a slightly expanded source contour lying inside
/// exactly one boundary region.
///
/// A source can touch one boundary region at several disjoint locations,
/// so multiple seeds may share the same `(src, boundary)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveSeed {
    /// Index into the source region array.
    pub src: u32,
    /// Index into the boundary region array.
    pub boundary: u32,
    /// The seed path. Closed (first point repeated at the end) when the
    /// whole expanded contour lies inside the boundary.
    pub path: Polyline,
}

/// Seeds produced by [`wave_seeds`].
pub type WaveSeeds = Vec<WaveSeed>;

/// Extract wave seeds: the pieces of the source outlines, nudged outward
/// by `tiny_expansion`, that lie inside a boundary region.
///
/// Every source contour is offset by `tiny_expansion` (holes by the
/// negated distance), opened by repeating its first point, and clipped
/// against the closed boundary contours in one tagged-intersection pass.
/// Pieces cut apart at a contour's artificial opening point are
/// reconnected afterwards. An open piece reads its `(src, boundary)` pair
/// from the clip event at one of its ends; a closed piece lies entirely
/// inside one boundary, which is resolved by point-in-polygon against a
/// lazily built tree over the boundary bounding boxes.
///
/// A source overlapping no boundary contributes no seeds. With `sorted`,
/// the output is ordered by `(boundary, src)`, which wave propagation
/// requires.
#[must_use]
pub fn wave_seeds(
    src: &[ExPolygon],
    boundary: &[ExPolygon],
    tiny_expansion: f64,
    sorted: bool,
) -> WaveSeeds {
    debug_assert!(tiny_expansion > 0.0);

    if src.is_empty() || boundary.is_empty() {
        return Vec::new();
    }

    let (subjects, mut splits) = expand_and_open_sources(src, tiny_expansion);

    let mut clips = Vec::new();
    for (iboundary, expoly) in boundary.iter().enumerate() {
        for icontour in 0..expoly.num_contours() {
            clips.push(TaggedPath::from_polygon(expoly.contour_or_hole(icontour), iboundary as u32));
        }
    }

    let mut segments = intersect_polylines_tagged(&subjects, &clips);
    merge_splits(&mut segments, &mut splits);

    // Tree over boundary bounding boxes. Only built if some seed contour
    // is closed and thus carries no clip event to read the boundary from.
    let mut aabb_tree: Option<AabbTree> = None;

    let mut out = WaveSeeds::with_capacity(segments.len());
    for segment in segments {
        debug_assert!(segment.points.len() >= 2);
        let intersection = match segment.origins.first() {
            Some(&PointOrigin::Intersection { subject, clip }) => Some((subject, clip)),
            _ => match segment.origins.last() {
                Some(&PointOrigin::Intersection { subject, clip }) => Some((subject, clip)),
                _ => None,
            },
        };
        if let Some((src_id, boundary_id)) = intersection {
            // The piece was cut by the boundary contour at least at one
            // end; both ends lie in the same boundary region.
            out.push(WaveSeed {
                src: src_id,
                boundary: boundary_id,
                path: Polyline::from(segment.points),
            });
        } else {
            // The whole expanded contour lies inside one boundary region.
            debug_assert!(segment.is_closed());
            let src_id = match segment.origins[0] {
                PointOrigin::Subject { tag } => tag,
                PointOrigin::Intersection { subject, .. } => subject,
            };
            let sample = segment.points[0];
            let tree = aabb_tree.get_or_insert_with(|| aabb_tree_over_expolygons(boundary));
            let found = sample_in_expolygons(tree, boundary, sample);
            debug_assert!(found.is_some());
            if let Some(boundary_id) = found {
                out.push(WaveSeed {
                    src: src_id,
                    boundary: boundary_id as u32,
                    path: Polyline::from(segment.points),
                });
            }
        }
    }

    if sorted {
        out.sort_by(|l, r| (l.boundary, l.src).cmp(&(r.boundary, r.src)));
    }
    debug!(
        sources = src.len(),
        boundaries = boundary.len(),
        seeds = out.len(),
        "extracted wave seeds"
    );
    out
}

/// Offset every source contour by `expansion` (holes by the negated
/// distance, since the offsetter reorients the outermost contour to
/// positive area) and open each result by repeating its first point.
///
/// Returns the opened tagged paths and the opening points, sorted
/// lexicographically, each paired with `-1` for [`merge_splits`].
fn expand_and_open_sources(
    src: &[ExPolygon],
    expansion: f64,
) -> (Vec<TaggedPath>, Vec<(Point, i32)>) {
    let mut subjects = Vec::new();
    let mut splits = Vec::new();
    let mut offsetter = Offsetter::new();
    offsetter.shortest_edge_length = expansion * OFFSET_SHORTEST_EDGE_FACTOR;
    for (isrc, expoly) in src.iter().enumerate() {
        for icontour in 0..expoly.num_contours() {
            offsetter.clear();
            offsetter.add_path(
                &expoly.contour_or_hole(icontour).points,
                JoinType::Square,
                EndType::ClosedPolygon,
            );
            let delta = if icontour == 0 { expansion } else { -expansion };
            for mut piece in offsetter.execute(delta) {
                debug_assert!(piece.len() >= 3);
                let first = piece.points[0];
                piece.points.push(first);
                splits.push((first, -1));
                subjects.push(TaggedPath::new(piece.points, isrc as u32));
            }
        }
    }
    splits.sort_unstable_by_key(|&(pt, _)| pt);
    (subjects, splits)
}

/// Reconnect pieces that were cut apart at a source contour's artificial
/// opening point.
///
/// The clipped pieces of an opened contour are expected to be open, with
/// one exception: a contour entirely inside the boundary stays closed and
/// is left alone. `splits` maps each opening point to the piece index
/// first seen ending there, or `-1`.
fn merge_splits(paths: &mut Vec<ClippedPolyline>, splits: &mut [(Point, i32)]) {
    let mut ipath = 0;
    while ipath < paths.len() {
        debug_assert!(paths[ipath].points.len() >= 2);
        let (front, back) = match paths[ipath].points.as_slice() {
            [front, .., back] => (*front, *back),
            _ => {
                ipath += 1;
                continue;
            }
        };
        let mut merged = false;
        if front != back {
            let mut end_front = true;
            let mut slot = find_split(splits, front);
            if slot.is_none() {
                end_front = false;
                slot = find_split(splits, back);
            }
            if let Some(islot) = slot {
                if splits[islot].1 < 0 {
                    // Open end seen for the first time; remember the piece
                    // and wait for its counterpart.
                    splits[islot].1 = ipath as i32;
                } else {
                    let other = splits[islot].1 as usize;
                    debug_assert!(other < ipath);
                    let piece = paths.swap_remove(ipath);
                    let other_front = paths[other].points[0] == splits[islot].0;
                    merge_polylines(&mut paths[other], other_front, piece, end_front);
                    merged = true;
                }
            }
        }
        if !merged {
            ipath += 1;
        }
    }
}

/// Join `src` onto `dst` at the shared end point, dropping the duplicate.
/// `dst_front` / `src_front` say which end of each piece carries the
/// shared point.
fn merge_polylines(dst: &mut ClippedPolyline, dst_front: bool, mut src: ClippedPolyline, src_front: bool) {
    if dst_front {
        if src_front {
            dst.points.reverse();
            dst.origins.reverse();
        } else {
            std::mem::swap(dst, &mut src);
        }
    } else if !src_front {
        src.points.reverse();
        src.origins.reverse();
    }
    debug_assert_eq!(dst.points.last(), src.points.first());
    dst.points.extend_from_slice(&src.points[1..]);
    dst.origins.extend_from_slice(&src.origins[1..]);
}

fn find_split(splits: &[(Point, i32)], pt: Point) -> Option<usize> {
    splits.binary_search_by(|probe| probe.0.cmp(&pt)).ok()
}

/// Tree over the bounding boxes of the regions' outer contours.
pub(crate) fn aabb_tree_over_expolygons(expolygons: &[ExPolygon]) -> AabbTree {
    let bboxes: Vec<BoundingBox> = expolygons.iter().map(ExPolygon::bounding_box).collect();
    AabbTree::build(&bboxes)
}

/// Index of the region containing `sample`, if any.
pub(crate) fn sample_in_expolygons(
    tree: &AabbTree,
    expolygons: &[ExPolygon],
    sample: Point,
) -> Option<usize> {
    tree.query_point(sample)
        .into_iter()
        .map(|idx| idx as usize)
        .find(|&idx| expolygons[idx].contains(sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_types::Polygon;

    fn rect(x0: i64, y0: i64, w: i64, h: i64) -> ExPolygon {
        ExPolygon::from(Polygon::from(vec![
            Point::new(x0, y0),
            Point::new(x0 + w, y0),
            Point::new(x0 + w, y0 + h),
            Point::new(x0, y0 + h),
        ]))
    }

    #[test]
    fn test_source_inside_boundary_yields_single_closed_seed() {
        let src = vec![rect(0, 0, 10_000, 10_000)];
        let boundary = vec![rect(-50_000, -50_000, 100_000, 100_000)];
        let seeds = wave_seeds(&src, &boundary, 100.0, true);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].src, 0);
        assert_eq!(seeds[0].boundary, 0);
        assert!(seeds[0].path.is_closed());
        // A square-join expansion of a square bevels each corner into two
        // points; opening repeats the first one.
        assert_eq!(seeds[0].path.len(), 9);
    }

    #[test]
    fn test_disjoint_source_yields_no_seeds() {
        let src = vec![rect(100_000, 100_000, 10_000, 10_000)];
        let boundary = vec![rect(-50_000, -50_000, 40_000, 40_000)];
        assert!(wave_seeds(&src, &boundary, 100.0, true).is_empty());
        assert!(wave_seeds(&[], &boundary, 100.0, true).is_empty());
        assert!(wave_seeds(&src, &[], 100.0, true).is_empty());
    }

    #[test]
    fn test_straddling_source_yields_seed_per_boundary() {
        // One source centered on the shared edge of two abutting
        // boundaries. The pieces around the artificial opening point must
        // be reconnected, leaving exactly one seed per boundary.
        let src = vec![rect(-5_000, -5_000, 10_000, 10_000)];
        let boundary = vec![
            rect(-50_000, -50_000, 50_000, 100_000),
            rect(0, -50_000, 50_000, 100_000),
        ];
        let seeds = wave_seeds(&src, &boundary, 100.0, true);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].boundary, 0);
        assert_eq!(seeds[1].boundary, 1);
        assert_eq!(seeds[0].src, 0);
        assert_eq!(seeds[1].src, 0);
        assert!(!seeds[0].path.is_closed());
        assert!(seeds[0].path.points.iter().all(|p| p.x <= 0));
        assert!(seeds[1].path.points.iter().all(|p| p.x >= 0));
    }

    #[test]
    fn test_sorted_output_is_non_decreasing() {
        let src = vec![
            rect(-5_000, -25_000, 10_000, 10_000),
            rect(-5_000, 15_000, 10_000, 10_000),
        ];
        let boundary = vec![
            rect(-50_000, -50_000, 50_000, 100_000),
            rect(0, -50_000, 50_000, 100_000),
        ];
        let seeds = wave_seeds(&src, &boundary, 100.0, true);
        assert_eq!(seeds.len(), 4);
        let keys: Vec<(u32, u32)> = seeds.iter().map(|s| (s.boundary, s.src)).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_sample_in_expolygons_resolves_region() {
        let regions = vec![rect(0, 0, 10, 10), rect(20, 0, 10, 10)];
        let tree = aabb_tree_over_expolygons(&regions);
        assert_eq!(sample_in_expolygons(&tree, &regions, Point::new(5, 5)), Some(0));
        assert_eq!(sample_in_expolygons(&tree, &regions, Point::new(25, 5)), Some(1));
        assert_eq!(sample_in_expolygons(&tree, &regions, Point::new(15, 5)), None);
    }
}
