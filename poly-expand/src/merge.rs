//! Merging expanded areas back into their source regions.

use poly_clip::union_safety_offset_ex;
use poly_types::{ExPolygon, ExPolygons, Polygons};
use tracing::debug;

use crate::params::ExpansionParameters;
use crate::seeds::{aabb_tree_over_expolygons, sample_in_expolygons};
use crate::wave::{propagate_waves, RegionExpansion};

/// Union every source region with the areas expanded from it, yielding
/// one region per source in source order.
///
/// Sources that produced no expansion pass through unchanged. When the
/// union of a source with its expansions falls apart into several
/// regions, only the one containing the source is kept.
#[must_use]
pub fn merge_expansions_into_expolygons(
    src: ExPolygons,
    mut expanded: Vec<RegionExpansion>,
) -> ExPolygons {
    // Expansions arrive sorted by boundary; merging walks the sources, so
    // re-sort by source id.
    expanded.sort_by_key(|e| e.src_id);

    let mut out = ExPolygons::with_capacity(src.len());
    let mut it = expanded.into_iter().peekable();
    for (isrc, src_ex) in src.into_iter().enumerate() {
        let isrc = isrc as u32;
        let mut acc = Polygons::new();
        while let Some(expansion) = it.next_if(|e| e.src_id == isrc) {
            acc.push(expansion.polygon);
        }
        if acc.is_empty() {
            out.push(src_ex);
            continue;
        }
        debug_assert!(!src_ex.contour.points.is_empty());
        let sample = src_ex.contour.points[0];
        acc.extend(src_ex.into_polygons());
        let mut merged = union_safety_offset_ex(&acc);
        debug_assert!(!merged.is_empty());
        if merged.len() == 1 {
            if let Some(ex) = merged.pop() {
                out.push(ex);
            }
        } else {
            // The seed expansion was not enough to bridge every expanded
            // area back to its source. Keep the region containing the
            // source, drop the stray pieces.
            debug!(src = isrc, components = merged.len(), "expansions did not merge into one region");
            let tree = aabb_tree_over_expolygons(&merged);
            let found = sample_in_expolygons(&tree, &merged, sample);
            debug_assert!(found.is_some());
            if let Some(idx) = found {
                out.push(merged.swap_remove(idx));
            }
        }
    }
    debug_assert!(it.next().is_none());
    out
}

/// Expand `src` into `boundary` and merge each expansion back into its
/// source, yielding one region per source in source order.
#[must_use]
pub fn expand_merge_expolygons(
    src: ExPolygons,
    boundary: &[ExPolygon],
    params: &ExpansionParameters,
) -> ExPolygons {
    let expanded = propagate_waves(&src, boundary, params);
    merge_expansions_into_expolygons(src, expanded)
}

/// Expand `src` into `boundary` and return the raw expanded polygons
/// bucketed per source, without merging them into the sources.
#[must_use]
pub fn expand_expolygons(
    src: &[ExPolygon],
    boundary: &[ExPolygon],
    full_expansion: f64,
    expansion_step: f64,
    max_nr_expansion_steps: usize,
) -> Vec<Polygons> {
    let params = ExpansionParameters::build(full_expansion, expansion_step, max_nr_expansion_steps);
    let mut out = vec![Polygons::new(); src.len()];
    for expansion in propagate_waves(src, boundary, &params) {
        out[expansion.src_id as usize].push(expansion.polygon);
    }
    out
}
