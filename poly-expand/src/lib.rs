//! Region expansion by wavefront propagation.
//!
//! This crate grows 2D source regions into boundary regions by a fixed
//! distance, the way infill or bridge areas are anchored into their
//! surrounding shells when slicing for 3D printing. Instead of one large
//! offset clipped at the end, each source emits a wave that advances in
//! small steps and is clipped against its boundary after every step, so
//! the expansion flows around holes and along narrow channels rather than
//! jumping across them.
//!
//! # Features
//!
//! - **Seed extraction**: Find where each source touches each boundary
//! - **Wave propagation**: Grow seeds in steps, confined to their boundary
//! - **Merging**: Union the expanded areas back into their sources
//! - **Expansion schedules**: Derive step sizes from a target distance
//! - **SVG export**: Render boundaries, sources and expansions for inspection
//!
//! # Example
//!
//! ```
//! use poly_expand::{expand_merge_expolygons, ExpansionParameters};
//! use poly_types::{scale, scaled, ExPolygon, Point, Polygon};
//!
//! let src = vec![ExPolygon::from(Polygon::from(vec![
//!     Point::new(0, 0),
//!     Point::new(scaled(10.0), 0),
//!     Point::new(scaled(10.0), scaled(10.0)),
//!     Point::new(0, scaled(10.0)),
//! ]))];
//! let boundary = vec![ExPolygon::from(Polygon::from(vec![
//!     Point::new(scaled(-20.0), scaled(-20.0)),
//!     Point::new(scaled(40.0), scaled(-20.0)),
//!     Point::new(scaled(40.0), scaled(40.0)),
//!     Point::new(scaled(-20.0), scaled(40.0)),
//! ]))];
//!
//! // Expand the source by 2 mm in 0.4 mm steps, staying inside the boundary.
//! let params = ExpansionParameters::build(scale(2.0), scale(0.4), 10);
//! let grown = expand_merge_expolygons(src, &boundary, &params);
//! assert_eq!(grown.len(), 1);
//! assert!(grown[0].area() > scale(10.0) * scale(10.0));
//! ```
//!
//! # Units
//!
//! All distances are in fixed-point coordinate units with
//! [`SCALING_FACTOR`](poly_types::SCALING_FACTOR) millimeters per unit;
//! [`scale`](poly_types::scale) converts millimeter distances for the
//! parameter builder.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow casts - region counts and coordinates stay well inside the lossless ranges
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod error;
mod export;
mod merge;
mod params;
mod seeds;
mod wave;

// Re-export main types and functions
pub use error::{ExpandError, ExpandResult};
pub use export::{export_expansion_svg, write_expansion_svg, SvgExportParams};
pub use merge::{expand_expolygons, expand_merge_expolygons, merge_expansions_into_expolygons};
pub use params::ExpansionParameters;
pub use seeds::{wave_seeds, WaveSeed, WaveSeeds};
pub use wave::{
    offset_with_orientation, propagate_waves, propagate_waves_ex, propagate_waves_ex_seeded,
    propagate_waves_seeded, RegionExpansion, RegionExpansionEx,
};

// Re-export the geometry types for convenience
pub use poly_types::{ExPolygon, ExPolygons, Point, Polygon, Polygons, Polyline};
