//! Benchmarks for region expansion.
//!
//! Run with: cargo bench -p poly-expand
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p poly-expand -- --save-baseline main
//! 2. After changes: cargo bench -p poly-expand -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use poly_expand::{
    expand_merge_expolygons, propagate_waves, wave_seeds, ExpansionParameters,
};
use poly_types::{scale, scaled, ExPolygon, ExPolygons, Point, Polygon};

// =============================================================================
// Test Geometry Generation
// =============================================================================

fn rect_contour_mm(x0: f64, y0: f64, w: f64, h: f64) -> Polygon {
    Polygon::from(vec![
        Point::new(scaled(x0), scaled(y0)),
        Point::new(scaled(x0 + w), scaled(y0)),
        Point::new(scaled(x0 + w), scaled(y0 + h)),
        Point::new(scaled(x0), scaled(y0 + h)),
    ])
}

fn rect_mm(x0: f64, y0: f64, w: f64, h: f64) -> ExPolygon {
    ExPolygon::from(rect_contour_mm(x0, y0, w, h))
}

/// An n x n grid of small squares, one source region each.
fn grid_of_squares(n: usize, side_mm: f64, pitch_mm: f64) -> ExPolygons {
    let mut out = ExPolygons::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            out.push(rect_mm(i as f64 * pitch_mm, j as f64 * pitch_mm, side_mm, side_mm));
        }
    }
    out
}

/// A square boundary with an n x n grid of square holes punched out.
fn pegboard_mm(size_mm: f64, n: usize, hole_mm: f64) -> ExPolygon {
    let pitch = size_mm / (n as f64 + 1.0);
    let mut holes = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let x0 = pitch.mul_add(i as f64 + 1.0, -hole_mm / 2.0);
            let y0 = pitch.mul_add(j as f64 + 1.0, -hole_mm / 2.0);
            let mut hole = rect_contour_mm(x0, y0, hole_mm, hole_mm);
            hole.reverse();
            holes.push(hole);
        }
    }
    ExPolygon {
        contour: rect_contour_mm(0.0, 0.0, size_mm, size_mm),
        holes,
    }
}

// =============================================================================
// Expansion Benchmarks
// =============================================================================

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expansion");
    group.sample_size(10); // Full waves involve repeated offset + clip rounds

    let src = grid_of_squares(4, 5.0, 10.0);
    let boundary = vec![rect_mm(-5.0, -5.0, 50.0, 50.0)];
    let params = ExpansionParameters::build(scale(2.0), scale(0.5), 10);

    group.throughput(Throughput::Elements(src.len() as u64));

    group.bench_function("wave_seeds_grid16", |b| {
        b.iter(|| wave_seeds(black_box(&src), black_box(&boundary), params.tiny_expansion, true));
    });

    group.bench_function("propagate_waves_grid16", |b| {
        b.iter(|| propagate_waves(black_box(&src), black_box(&boundary), black_box(&params)));
    });

    group.bench_function("expand_merge_grid16", |b| {
        b.iter(|| {
            expand_merge_expolygons(black_box(src.clone()), black_box(&boundary), black_box(&params))
        });
    });

    group.finish();
}

fn bench_constrained_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("ConstrainedBoundary");
    group.sample_size(10);

    // A strip expanding deep into a boundary full of holes, so every wave
    // step gets clipped against many contours.
    let boundary = vec![pegboard_mm(40.0, 5, 2.0)];
    let src = vec![rect_mm(0.0, 0.0, 4.0, 40.0)];
    let params = ExpansionParameters::build(scale(10.0), scale(2.0), 10);

    group.throughput(Throughput::Elements(boundary[0].num_contours() as u64));

    group.bench_function("propagate_waves_pegboard", |b| {
        b.iter(|| propagate_waves(black_box(&src), black_box(&boundary), black_box(&params)));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_expansion, bench_constrained_boundary);
criterion_main!(benches);
