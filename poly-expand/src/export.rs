//! SVG export of expansion results for visual inspection.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use poly_types::{unscaled, BoundingBox, ExPolygon};

use crate::error::{ExpandError, ExpandResult};
use crate::wave::RegionExpansionEx;

/// Parameters for SVG export.
#[derive(Debug, Clone)]
pub struct SvgExportParams {
    /// Width of the SVG in pixels.
    pub width: u32,
    /// Height of the SVG in pixels.
    pub height: u32,
    /// Padding around the content in pixels.
    pub padding: u32,
    /// Stroke width for contours.
    pub stroke_width: f64,
    /// Fill color for boundary regions (CSS color string).
    pub boundary_color: String,
    /// Fill color for source regions.
    pub src_color: String,
    /// Fill color for expanded regions.
    pub expansion_color: String,
    /// Background color.
    pub background_color: String,
    /// Whether to draw the boundary regions.
    pub show_boundary: bool,
}

impl Default for SvgExportParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: 20,
            stroke_width: 1.0,
            boundary_color: "#e8e8e8".to_string(),
            src_color: "#2d5986".to_string(),
            expansion_color: "#4a90d9".to_string(),
            background_color: "#f5f5f5".to_string(),
            show_boundary: true,
        }
    }
}

impl SvgExportParams {
    /// Create params with custom fill colors.
    #[must_use]
    pub fn with_colors(mut self, src: &str, expansion: &str, boundary: &str) -> Self {
        self.src_color = src.to_string();
        self.expansion_color = expansion.to_string();
        self.boundary_color = boundary.to_string();
        self
    }

    /// Create params with custom size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Export an expansion result to SVG format.
///
/// Boundary regions are drawn first, the expanded regions over them and
/// the source regions on top, all in millimeter coordinates.
///
/// # Example
///
/// ```
/// use poly_expand::{export_expansion_svg, SvgExportParams};
///
/// let svg = export_expansion_svg(&[], &[], &[], &SvgExportParams::default());
/// assert!(svg.contains("<svg"));
/// ```
#[must_use]
pub fn export_expansion_svg(
    boundary: &[ExPolygon],
    src: &[ExPolygon],
    expanded: &[RegionExpansionEx],
    params: &SvgExportParams,
) -> String {
    let mut bounds = BoundingBox::empty();
    for expoly in boundary.iter().chain(src) {
        bounds.merge(&expoly.bounding_box());
    }
    for expansion in expanded {
        bounds.merge(&expansion.expolygon.bounding_box());
    }

    if !bounds.is_valid() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n\
  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n\
  <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" fill=\"#999\">Nothing to render</text>\n\
</svg>",
            params.width, params.height, params.width, params.height, params.background_color
        );
    }

    // Calculate bounds and scale in millimeters
    let min_x = unscaled(bounds.min.x);
    let max_y = unscaled(bounds.max.y);
    let content_width = unscaled(bounds.width());
    let content_height = unscaled(bounds.height());

    let padding = f64::from(params.padding);
    let available_width = 2.0f64.mul_add(-padding, f64::from(params.width));
    let available_height = 2.0f64.mul_add(-padding, f64::from(params.height));

    let scale = if content_width > 0.0 && content_height > 0.0 {
        (available_width / content_width).min(available_height / content_height)
    } else {
        1.0
    };

    let offset_x = padding + content_width.mul_add(-scale, available_width) / 2.0;
    let offset_y = padding + content_height.mul_add(-scale, available_height) / 2.0;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  <rect width="100%" height="100%" fill="{}"/>
  <g transform="translate({:.2},{:.2}) scale({:.6},{:.6})">
"#,
        params.width,
        params.height,
        params.width,
        params.height,
        params.background_color,
        min_x.mul_add(-scale, offset_x),
        max_y.mul_add(scale, offset_y), // SVG Y is inverted
        scale,
        -scale // Flip Y axis
    );

    let stroke_width = params.stroke_width / scale;
    if params.show_boundary {
        for expoly in boundary {
            write_expolygon_path(&mut svg, expoly, &params.boundary_color, "#bbbbbb", stroke_width);
        }
    }
    for expansion in expanded {
        write_expolygon_path(
            &mut svg,
            &expansion.expolygon,
            &params.expansion_color,
            "#2d5986",
            stroke_width,
        );
    }
    for expoly in src {
        write_expolygon_path(&mut svg, expoly, &params.src_color, "none", stroke_width);
    }

    svg.push_str("  </g>\n");

    let _ = write!(
        svg,
        "  <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"12\" fill=\"#666\">\n\
    {} sources, {} boundaries, {} expanded regions\n\
  </text>\n",
        src.len(),
        boundary.len(),
        expanded.len()
    );

    svg.push_str("</svg>");

    svg
}

/// Export an expansion result to an SVG file.
///
/// # Errors
///
/// Returns [`ExpandError::IoWrite`] when the file cannot be written.
pub fn write_expansion_svg(
    path: &Path,
    boundary: &[ExPolygon],
    src: &[ExPolygon],
    expanded: &[RegionExpansionEx],
    params: &SvgExportParams,
) -> ExpandResult<()> {
    let svg = export_expansion_svg(boundary, src, expanded, params);
    fs::write(path, svg).map_err(|source| ExpandError::IoWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Append one region as a single path element; hole subpaths cut out via
/// the even-odd fill rule.
fn write_expolygon_path(svg: &mut String, expoly: &ExPolygon, fill: &str, stroke: &str, stroke_width: f64) {
    let mut path = String::new();
    for idx in 0..expoly.num_contours() {
        let contour = expoly.contour_or_hole(idx);
        for (i, point) in contour.points.iter().enumerate() {
            if i == 0 {
                if idx > 0 {
                    path.push(' ');
                }
                let _ = write!(path, "M {:.4} {:.4}", unscaled(point.x), unscaled(point.y));
            } else {
                let _ = write!(path, " L {:.4} {:.4}", unscaled(point.x), unscaled(point.y));
            }
        }
        path.push_str(" Z");
    }
    let _ = writeln!(
        svg,
        r#"    <path d="{}" fill-rule="evenodd" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
        path, fill, stroke, stroke_width
    );
}
