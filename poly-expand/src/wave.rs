//! Wavefront propagation from seeds into boundary regions.
//!
//! Each wave starts as a round offset of its seed paths and grows by a
//! fixed schedule of further offsets, clipped against the owning boundary
//! region after every step so it flows around holes and along narrow
//! channels instead of jumping across them.

use poly_clip::{intersection_with_fill, union_ex, EndType, FillRule, JoinType, Offsetter};
use poly_types::{BoundingBox, Coord, ExPolygon, Polygon, Polygons, Polyline};
use tracing::debug;

use crate::params::ExpansionParameters;
use crate::seeds::{wave_seeds, WaveSeed};

/// One piece of expanded area, in flat polygon form.
///
/// The polygons produced for one `(src_id, boundary_id)` pair jointly
/// describe the area the wave covered; holes among them are clockwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionExpansion {
    /// A contour of the expanded area.
    pub polygon: Polygon,
    /// Index of the source region the wave started from.
    pub src_id: u32,
    /// Index of the boundary region the wave was confined to.
    pub boundary_id: u32,
}

/// One piece of expanded area, grouped into a region with holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionExpansionEx {
    /// The expanded area.
    pub expolygon: ExPolygon,
    /// Index of the source region the wave started from.
    pub src_id: u32,
    /// Index of the boundary region the wave was confined to.
    pub boundary_id: u32,
}

/// Expand `src` into `boundary` and return the expanded areas as flat
/// polygons tagged with their `(src, boundary)` pair.
///
/// Output is sorted by `(boundary_id, src_id)`. Sources not overlapping
/// any boundary produce nothing.
#[must_use]
pub fn propagate_waves(
    src: &[ExPolygon],
    boundary: &[ExPolygon],
    params: &ExpansionParameters,
) -> Vec<RegionExpansion> {
    propagate_waves_seeded(&wave_seeds(src, boundary, params.tiny_expansion, true), boundary, params)
}

/// [`propagate_waves`] for seeds extracted up front with [`wave_seeds`].
///
/// `seeds` must be sorted by `(boundary, src)` and refer to the same
/// `boundary` slice they were extracted against.
#[must_use]
pub fn propagate_waves_seeded(
    seeds: &[WaveSeed],
    boundary: &[ExPolygon],
    params: &ExpansionParameters,
) -> Vec<RegionExpansion> {
    debug_assert!(seeds
        .windows(2)
        .all(|w| (w[0].boundary, w[0].src) <= (w[1].boundary, w[1].src)));

    let mut out = Vec::new();
    let mut offsetter = Offsetter::new();
    offsetter.arc_tolerance = params.arc_tolerance;
    offsetter.shortest_edge_length = params.shortest_edge_length;

    let mut paths: Vec<&Polyline> = Vec::new();
    let mut ihead = 0;
    while ihead < seeds.len() {
        let head = &seeds[ihead];
        paths.clear();
        let mut itail = ihead;
        while itail < seeds.len()
            && seeds[itail].boundary == head.boundary
            && seeds[itail].src == head.src
        {
            paths.push(&seeds[itail].path);
            itail += 1;
        }
        for polygon in propagate_wave_from_boundary(
            &mut offsetter,
            &paths,
            &boundary[head.boundary as usize],
            params,
        ) {
            out.push(RegionExpansion { polygon, src_id: head.src, boundary_id: head.boundary });
        }
        ihead = itail;
    }
    debug!(seeds = seeds.len(), expansions = out.len(), "propagated waves");
    out
}

/// Expand `src` into `boundary` and return the expanded areas grouped
/// into regions with holes, tagged with their `(src, boundary)` pair.
///
/// Output is sorted by `(boundary_id, src_id)`.
#[must_use]
pub fn propagate_waves_ex(
    src: &[ExPolygon],
    boundary: &[ExPolygon],
    params: &ExpansionParameters,
) -> Vec<RegionExpansionEx> {
    propagate_waves_ex_seeded(&wave_seeds(src, boundary, params.tiny_expansion, true), boundary, params)
}

/// [`propagate_waves_ex`] for seeds extracted up front with
/// [`wave_seeds`].
#[must_use]
pub fn propagate_waves_ex_seeded(
    seeds: &[WaveSeed],
    boundary: &[ExPolygon],
    params: &ExpansionParameters,
) -> Vec<RegionExpansionEx> {
    let expanded = propagate_waves_seeded(seeds, boundary, params);

    // Group the flat polygons of each (boundary, src) run into regions.
    let mut out = Vec::new();
    let mut acc = Polygons::new();
    let mut run_key: Option<(u32, u32)> = None;
    for expansion in expanded {
        let key = (expansion.boundary_id, expansion.src_id);
        if run_key != Some(key) {
            flush_expansion_run(&mut out, &mut acc, run_key);
            run_key = Some(key);
        }
        acc.push(expansion.polygon);
    }
    flush_expansion_run(&mut out, &mut acc, run_key);
    out
}

fn flush_expansion_run(
    out: &mut Vec<RegionExpansionEx>,
    acc: &mut Polygons,
    key: Option<(u32, u32)>,
) {
    let Some((boundary_id, src_id)) = key else { return };
    if acc.len() == 1 {
        // A single contour of a clipped wave is always an outer contour.
        if let Some(polygon) = acc.pop() {
            out.push(RegionExpansionEx { expolygon: ExPolygon::from(polygon), src_id, boundary_id });
        }
    } else {
        for expolygon in union_ex(acc) {
            out.push(RegionExpansionEx { expolygon, src_id, boundary_id });
        }
        acc.clear();
    }
}

/// Offset a single closed contour, preserving its orientation.
///
/// [`Offsetter::execute`] reorients its input so the outermost contour
/// has positive area, which would turn shrinking a clockwise hole into
/// growing it. This negates the offset for clockwise input and reverses
/// the output back, so a wavefront's hole contours keep shrinking as the
/// wave advances over them.
#[must_use]
pub fn offset_with_orientation(
    offsetter: &mut Offsetter,
    polygon: &Polygon,
    delta: f64,
) -> Polygons {
    let ccw = polygon.is_counter_clockwise();
    offsetter.clear();
    offsetter.add_path(&polygon.points, JoinType::Round, EndType::ClosedPolygon);
    let mut out = offsetter.execute(if ccw { delta } else { -delta });
    if !ccw {
        for piece in &mut out {
            piece.reverse();
        }
    }
    out
}

/// First wavefront: the seed paths offset by the initial step.
///
/// A closed seed is offset to both sides into a ring; an open seed grows
/// into a rounded band around the path.
fn wavefront_initial(offsetter: &mut Offsetter, seed: &[&Polyline], step: f64) -> Polygons {
    let mut out = Polygons::new();
    for path in seed {
        debug_assert!(path.len() >= 2);
        if path.len() < 2 {
            continue;
        }
        offsetter.clear();
        let end_type = if path.is_closed() { EndType::ClosedLine } else { EndType::OpenRound };
        offsetter.add_path(&path.points, JoinType::Round, end_type);
        out.extend(offsetter.execute(step));
    }
    out
}

/// Advance the wavefront by one step, growing every contour outward and
/// shrinking every hole.
fn wavefront_step(offsetter: &mut Offsetter, wave: &Polygons, step: f64) -> Polygons {
    let mut out = Polygons::with_capacity(wave.len());
    for polygon in wave {
        out.extend(offset_with_orientation(offsetter, polygon, step));
    }
    out
}

/// Clip the wavefront against the trimmed boundary. The positive fill
/// rule resolves overlaps between wave lobes that have grown into each
/// other.
fn wavefront_clip(wave: &Polygons, clipping: &Polygons) -> Polygons {
    intersection_with_fill(wave, FillRule::Positive, clipping, FillRule::Positive)
}

/// The boundary region reduced to the reach of this wave: everything
/// beyond the seed extents inflated by the maximum inflation is cut away
/// before any wave step runs against it.
fn trim_boundary_to_seed(seed: &[&Polyline], boundary: &ExPolygon, max_inflation: f64) -> Polygons {
    let mut bbox = BoundingBox::empty();
    for path in seed {
        bbox.merge(&BoundingBox::from_points(&path.points));
    }
    let clip = bbox.inflated(max_inflation as Coord).to_polygon();
    intersection_with_fill(&boundary.to_polygons(), FillRule::NonZero, &[clip], FillRule::NonZero)
}

/// Run the full expansion schedule for the seeds of one `(boundary, src)`
/// pair, clipping after every step.
fn propagate_wave_from_boundary(
    offsetter: &mut Offsetter,
    seed: &[&Polyline],
    boundary: &ExPolygon,
    params: &ExpansionParameters,
) -> Polygons {
    debug_assert!(!seed.is_empty() && seed[0].len() >= 2);
    let clipping = trim_boundary_to_seed(seed, boundary, params.max_inflation);
    let mut wave = wavefront_clip(&wavefront_initial(offsetter, seed, params.initial_step), &clipping);
    for _ in 0..params.num_other_steps {
        wave = wavefront_clip(&wavefront_step(offsetter, &wave, params.other_step), &clipping);
    }
    wave
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_types::{scale, Point};

    fn rect(x0: i64, y0: i64, w: i64, h: i64) -> ExPolygon {
        ExPolygon::from(Polygon::from(vec![
            Point::new(x0, y0),
            Point::new(x0 + w, y0),
            Point::new(x0 + w, y0 + h),
            Point::new(x0, y0 + h),
        ]))
    }

    fn max_abs_coord(polygon: &Polygon) -> i64 {
        polygon.points.iter().map(|p| p.x.abs().max(p.y.abs())).max().unwrap_or(0)
    }

    #[test]
    fn test_offset_with_orientation_preserves_winding() {
        let mut square = Polygon::from(vec![
            Point::new(0, 0),
            Point::new(10_000, 0),
            Point::new(10_000, 10_000),
            Point::new(0, 10_000),
        ]);
        let mut offsetter = Offsetter::new();

        let grown = offset_with_orientation(&mut offsetter, &square, 1_000.0);
        assert_eq!(grown.len(), 1);
        assert!(grown[0].is_counter_clockwise());
        assert!(grown[0].double_area() > square.double_area());

        square.reverse();
        let shrunk = offset_with_orientation(&mut offsetter, &square, 1_000.0);
        assert_eq!(shrunk.len(), 1);
        assert!(!shrunk[0].is_counter_clockwise());
        assert!(shrunk[0].double_area().abs() < square.double_area().abs());
    }

    #[test]
    fn test_single_step_wave_forms_ring_around_source() {
        // 10x10 mm source in a wide open boundary; the whole expansion
        // runs in one fallback step of 0.8 * 5 mm after a 1 mm seed.
        let src = vec![rect(-5_000_000, -5_000_000, 10_000_000, 10_000_000)];
        let boundary = vec![rect(-50_000_000, -50_000_000, 100_000_000, 100_000_000)];
        let params = ExpansionParameters::build(scale(5.0), scale(5.0), 1);
        assert_eq!(params.num_other_steps, 0);

        let out = propagate_waves_ex(&src, &boundary, &params);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].src_id, 0);
        assert_eq!(out[0].boundary_id, 0);
        // A ring: the closed seed was offset to both sides.
        assert_eq!(out[0].expolygon.num_contours(), 2);

        // The outer front sits 5 mm out from the source edge.
        let reach = max_abs_coord(&out[0].expolygon.contour);
        assert!((9_999_990..=10_000_010).contains(&reach), "reach {reach}");

        // Ring area: a 20 mm rounded square minus the 4x4 mm inner hole.
        let area_mm2 = out[0].expolygon.area() * 1e-12;
        assert!((355.0..366.0).contains(&area_mm2), "area {area_mm2}");
    }

    #[test]
    fn test_multi_step_wave_reaches_full_expansion() {
        let src = vec![rect(-5_000_000, -5_000_000, 10_000_000, 10_000_000)];
        let boundary = vec![rect(-50_000_000, -50_000_000, 100_000_000, 100_000_000)];
        let params = ExpansionParameters::build(scale(2.0), scale(0.4), 10);
        assert_eq!(params.num_other_steps, 4);

        let out = propagate_waves(&src, &boundary, &params);
        assert!(!out.is_empty());
        assert!(out.iter().all(|e| e.src_id == 0 && e.boundary_id == 0));
        // The wave ring keeps a hole over the source interior.
        assert!(out.iter().any(|e| !e.polygon.is_counter_clockwise()));

        let reach = out.iter().map(|e| max_abs_coord(&e.polygon)).max().unwrap_or(0);
        assert!((6_999_990..=7_000_010).contains(&reach), "reach {reach}");
    }

    #[test]
    fn test_waves_stay_inside_their_boundary() {
        // A source straddling two abutting boundary regions: each wave
        // expands only into its own region and stops at the shared edge.
        let src = vec![rect(-5_000_000, -5_000_000, 10_000_000, 10_000_000)];
        let boundary = vec![
            rect(-50_000_000, -50_000_000, 50_000_000, 100_000_000),
            rect(0, -50_000_000, 50_000_000, 100_000_000),
        ];
        let params = ExpansionParameters::build(scale(1.0), scale(1.0), 1);

        let out = propagate_waves_ex(&src, &boundary, &params);
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].boundary_id, out[0].src_id), (0, 0));
        assert_eq!((out[1].boundary_id, out[1].src_id), (1, 0));

        let all_points = |ex: &ExPolygon| ex.to_polygons().iter().flat_map(|p| p.points.clone()).collect::<Vec<_>>();
        let left = all_points(&out[0].expolygon);
        let right = all_points(&out[1].expolygon);
        assert!(left.iter().all(|p| p.x <= 1));
        assert!(right.iter().all(|p| p.x >= -1));
        // Both waves reach the shared edge.
        assert!(left.iter().any(|p| p.x.abs() <= 1));
        assert!(right.iter().any(|p| p.x.abs() <= 1));

        let area_left = out[0].expolygon.area();
        let area_right = out[1].expolygon.area();
        assert!(area_left > 0.0 && area_right > 0.0);
        let diff = (area_left - area_right).abs() / area_left.max(area_right);
        assert!(diff < 0.015, "asymmetry {diff}");
    }
}
