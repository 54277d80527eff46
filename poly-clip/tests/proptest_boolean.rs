//! Property-based tests for the boolean and offset kernels.
//!
//! Axis-aligned rectangles keep every intersection point on the integer
//! lattice, so the area identities below hold exactly.
//!
//! Run with: cargo test -p poly-clip -- proptest

use approx::assert_relative_eq;
use poly_clip::{
    difference, intersection, union, union_ex, EndType, JoinType, Offsetter, Point, Polygon,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate an axis-aligned rectangle with positive extents.
fn arb_rect() -> impl Strategy<Value = Polygon> {
    (
        -1_000_000i64..1_000_000,
        -1_000_000i64..1_000_000,
        1i64..500_000,
        1i64..500_000,
    )
        .prop_map(|(x0, y0, w, h)| rect(x0, y0, w, h))
}

/// Generate an arbitrary quad, possibly degenerate or self-intersecting.
fn arb_quad() -> impl Strategy<Value = Polygon> {
    prop::collection::vec((-10_000i64..10_000, -10_000i64..10_000), 4).prop_map(|pts| {
        Polygon::from(pts.into_iter().map(|(x, y)| Point::new(x, y)).collect::<Vec<_>>())
    })
}

fn rect(x0: i64, y0: i64, w: i64, h: i64) -> Polygon {
    Polygon::from(vec![
        Point::new(x0, y0),
        Point::new(x0 + w, y0),
        Point::new(x0 + w, y0 + h),
        Point::new(x0, y0 + h),
    ])
}

fn area2(polygons: &[Polygon]) -> i128 {
    polygons.iter().map(Polygon::double_area).sum()
}

// =============================================================================
// Property Tests: Boolean identities
// =============================================================================

proptest! {
    /// Inclusion-exclusion: |A u B| + |A n B| = |A| + |B|, exactly.
    #[test]
    fn union_intersection_inclusion_exclusion(a in arb_rect(), b in arb_rect()) {
        let union_area = area2(&union(&[a.clone(), b.clone()]));
        let inter_area = area2(&intersection(&[a.clone()], &[b.clone()]));
        prop_assert_eq!(union_area + inter_area, a.double_area() + b.double_area());
    }

    /// Difference removes exactly the overlap: |A - B| = |A| - |A n B|.
    #[test]
    fn difference_complements_intersection(a in arb_rect(), b in arb_rect()) {
        let diff_area = area2(&difference(&[a.clone()], &[b.clone()]));
        let inter_area = area2(&intersection(&[a.clone()], &[b.clone()]));
        prop_assert_eq!(diff_area, a.double_area() - inter_area);
    }

    /// Union output uses the region convention: outers counter-clockwise.
    /// Two rectangles can never produce a hole.
    #[test]
    fn union_of_rects_is_counter_clockwise(a in arb_rect(), b in arb_rect()) {
        for poly in union(&[a, b]) {
            prop_assert!(poly.double_area() > 0);
        }
    }

    /// A second union is a no-op on area and region count.
    #[test]
    fn union_is_idempotent(a in arb_rect(), b in arb_rect(), c in arb_rect()) {
        let first = union(&[a, b, c]);
        let second = union(&first);
        prop_assert_eq!(area2(&second), area2(&first));
        prop_assert_eq!(second.len(), first.len());
    }

    /// Intersection is contained in both inputs.
    #[test]
    fn intersection_is_contained(a in arb_rect(), b in arb_rect()) {
        let inter = intersection(&[a.clone()], &[b.clone()]);
        prop_assert!(area2(&inter) <= a.double_area());
        prop_assert!(area2(&inter) <= b.double_area());
        prop_assert!(area2(&inter) >= 0);
    }

    /// Grouping into regions preserves net area.
    #[test]
    fn union_ex_preserves_area(a in arb_rect(), b in arb_rect()) {
        let flat = area2(&union(&[a.clone(), b.clone()]));
        let grouped: f64 = union_ex(&[a, b]).iter().map(poly_clip::ExPolygon::area).sum();
        prop_assert_eq!(grouped, flat as f64 / 2.0);
    }

    /// Self-intersecting or degenerate input never panics and yields
    /// properly oriented output.
    #[test]
    fn arbitrary_quads_are_handled(a in arb_quad(), b in arb_quad()) {
        for poly in union(&[a, b]) {
            prop_assert!(poly.len() >= 3);
            prop_assert!(poly.double_area() != 0);
        }
    }
}

// =============================================================================
// Property Tests: Offsetting
// =============================================================================

proptest! {
    /// Miter-growing a rectangle by delta is exact: right-angle corners
    /// stay sharp within the default miter limit.
    #[test]
    fn miter_grow_rect_is_exact(
        x0 in -100_000i64..100_000,
        y0 in -100_000i64..100_000,
        w in 10i64..10_000,
        h in 10i64..10_000,
        delta in 1i64..1_000,
    ) {
        let mut offsetter = Offsetter::new();
        offsetter.add_path(&rect(x0, y0, w, h).points, JoinType::Miter, EndType::ClosedPolygon);
        let grown = offsetter.execute(delta as f64);
        let expected = 2 * i128::from(w + 2 * delta) * i128::from(h + 2 * delta);
        prop_assert_eq!(area2(&grown), expected);
    }

    /// Shrinking a rectangle by less than half its width is exact.
    #[test]
    fn shrink_rect_is_exact(
        w in 100i64..10_000,
        h in 100i64..10_000,
        delta in 1i64..40,
    ) {
        let mut offsetter = Offsetter::new();
        offsetter.add_path(&rect(0, 0, w, h).points, JoinType::Round, EndType::ClosedPolygon);
        let shrunk = offsetter.execute(-delta as f64);
        let expected = 2 * i128::from(w - 2 * delta) * i128::from(h - 2 * delta);
        prop_assert_eq!(area2(&shrunk), expected);
    }

    /// Round-growing stays between the miter bound and the true rounded
    /// area (arcs are inscribed, so slightly smaller).
    #[test]
    fn round_grow_rect_is_bounded(
        w in 100i64..10_000,
        h in 100i64..10_000,
        delta in 50i64..500,
    ) {
        let mut offsetter = Offsetter::new();
        offsetter.add_path(&rect(0, 0, w, h).points, JoinType::Round, EndType::ClosedPolygon);
        let grown = offsetter.execute(delta as f64);
        let area = area2(&grown) as f64 / 2.0;
        let sharp = ((w + 2 * delta) * (h + 2 * delta)) as f64;
        let rounded = sharp - (4.0 - std::f64::consts::PI) * (delta * delta) as f64;
        // Allow one unit of rounding slack per perimeter vertex.
        prop_assert!(area <= sharp);
        prop_assert!(area > rounded * 0.98, "area {area} rounded {rounded}");
    }
}

// =============================================================================
// Fixed cases
// =============================================================================

#[test]
fn l_shape_union_area() {
    let out = union(&[rect(0, 0, 30, 10), rect(0, 0, 10, 30)]);
    assert_eq!(area2(&out), 2 * (300 + 300 - 100));
}

#[test]
fn nested_rects_difference_makes_ring() {
    let out = difference(&[rect(0, 0, 100, 100)], &[rect(25, 25, 50, 50)]);
    assert_eq!(out.len(), 2);
    assert_eq!(area2(&out), 2 * (10_000 - 2_500));
    let ex = poly_clip::polygons_to_expolygons(out);
    assert_eq!(ex.len(), 1);
    assert_eq!(ex[0].holes.len(), 1);
}

#[test]
fn round_offset_of_small_square_approximates_disk() {
    // With a large delta the square contributes almost nothing; the arc
    // approximation must track the disk area closely.
    let mut offsetter = Offsetter::new();
    offsetter.add_path(&rect(0, 0, 2, 2).points, JoinType::Round, EndType::ClosedPolygon);
    let grown = offsetter.execute(10_000.0);
    assert_eq!(grown.len(), 1);
    let area = grown[0].double_area() as f64 / 2.0;
    assert_relative_eq!(area, std::f64::consts::PI * 1e8, max_relative = 0.01);
}
