//! Core 2D polygon types for the region-expansion engine.
//!
//! This crate provides the foundational value types shared by the clipping
//! kernel and the expansion engine:
//!
//! - [`Point`] - A fixed-point 2D point with exact integer predicates
//! - [`Polygon`] - A closed contour whose orientation is meaningful
//! - [`Polyline`] - An open path
//! - [`ExPolygon`] - One outer contour plus hole contours
//! - [`BoundingBox`] - Axis-aligned integer bounding box
//!
//! # Units
//!
//! Coordinates are `i64` fixed-point with [`SCALING_FACTOR`] millimeters per
//! unit (one unit is a nanometer). [`scaled`]/[`unscaled`] convert between
//! millimeters and coordinate units.
//!
//! # Orientation
//!
//! Contours are stored in mathematical (y-up) orientation: a
//! counter-clockwise contour encloses positive area and represents an outer
//! boundary, a clockwise contour represents a hole.
//!
//! # Example
//!
//! ```
//! use poly_types::{scaled, ExPolygon, Point, Polygon};
//!
//! let square = Polygon::from(vec![
//!     Point::new(0, 0),
//!     Point::new(scaled(10.0), 0),
//!     Point::new(scaled(10.0), scaled(10.0)),
//!     Point::new(0, scaled(10.0)),
//! ]);
//! assert!(square.is_counter_clockwise());
//!
//! let region = ExPolygon::from(square);
//! assert_eq!(region.num_contours(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

mod bounds;
mod coord;
mod expolygon;
mod point;
mod polygon;
mod polyline;

// Re-export core types
pub use bounds::BoundingBox;
pub use coord::{scale, scaled, unscale, unscaled, Coord, CoordF, SCALING_FACTOR};
pub use expolygon::{ExPolygon, ExPolygons};
pub use point::Point;
pub use polygon::{PointPosition, Polygon, Polygons};
pub use polyline::Polyline;
