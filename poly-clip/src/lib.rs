//! Polygon clipping and offsetting on fixed-point coordinates.
//!
//! This crate provides the 2D boolean kernel for the expansion pipeline:
//! union, intersection and difference of polygon sets, polygon and
//! polyline offsetting with selectable joins and end caps, a tagged
//! intersection that tracks the provenance of every output point, and a
//! bounding box tree for point-in-region lookups.
//!
//! All predicates run on integer coordinates; intermediate winding and
//! intersection arithmetic uses `i128`, so results are exact except where
//! an intersection point is rounded to the nearest coordinate unit.
//! Coordinates are expected to stay well below `2^60`, which leaves
//! headroom for the doubled-coordinate tests used internally.
//!
//! # Quick Start
//!
//! ```ignore
//! use poly_clip::{intersection, union_ex, EndType, JoinType, Offsetter};
//!
//! let merged = union_ex(&contours);
//!
//! let mut offsetter = Offsetter::new();
//! offsetter.add_path(&contour.points, JoinType::Round, EndType::ClosedPolygon);
//! let grown = offsetter.execute(50_000.0);
//! ```
//!
//! # Orientation
//!
//! Outputs follow the region convention: outer boundaries wind
//! counter-clockwise and holes clockwise. Inputs of either orientation are
//! accepted and interpreted through the chosen [`FillRule`].

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that conflict with API design choices
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
// Allow single-char names in math-heavy code (standard in graphics/geometry algorithms)
#![allow(clippy::many_single_char_names)]
// Allow casts - coordinates are bounded well inside the lossless ranges
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::too_many_lines)]

pub mod boolean;
mod intersect;
pub mod offset;
pub mod safety;
pub mod spatial;
mod subdivide;
pub mod tagged;

// Re-export main types and functions for convenient access
pub use boolean::{
    clip_polygons, difference, intersection, intersection_with_fill, polygons_to_expolygons,
    union, union_ex, union_with_fill, BooleanOp, FillRule,
};
pub use offset::{EndType, JoinType, Offsetter, OFFSET_SHORTEST_EDGE_FACTOR};
pub use safety::{safety_offset, union_safety_offset_ex, SAFETY_OFFSET};
pub use spatial::AabbTree;
pub use tagged::{intersect_polylines_tagged, ClippedPolyline, PointOrigin, TaggedPath};

// Re-export the geometry types for convenience
pub use poly_types::{ExPolygon, ExPolygons, Point, Polygon, Polygons};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```ignore
/// use poly_clip::prelude::*;
///
/// let merged = union_ex(&contours);
/// ```
pub mod prelude {
    pub use crate::boolean::{
        clip_polygons, difference, intersection, intersection_with_fill, polygons_to_expolygons,
        union, union_ex, union_with_fill, BooleanOp, FillRule,
    };
    pub use crate::offset::{EndType, JoinType, Offsetter};
    pub use crate::safety::{safety_offset, union_safety_offset_ex};
    pub use crate::spatial::AabbTree;
    pub use crate::tagged::{intersect_polylines_tagged, ClippedPolyline, PointOrigin, TaggedPath};
}
