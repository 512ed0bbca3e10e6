//! Standalone SVG documents for the dashboard widgets
//!
//! Each renderer returns a complete `<svg>` element that can be written to a
//! file or embedded in HTML. Geometry comes from the sibling modules; this
//! module only adds markup, colours and labels.

use super::donut::{ChartSegment, DonutGeometry, compute_donut_segments_with};
use super::gauge::{ColorTier, GAUGE_RADIUS, GAUGE_STROKE_WIDTH, compute_gauge_stroke};
use super::progress::progress_fill;
use super::sparkline::{compute_sparkline_points, polyline_points};
use super::fmt_coord;
use serde::{Deserialize, Serialize};

/// Widget colours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_warning")]
    pub warning: String,
    #[serde(default = "default_danger")]
    pub danger: String,
    /// Sparkline and progress fill
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Unfilled gauge and progress track
    #[serde(default = "default_track")]
    pub track: String,
    /// Donut hole and chart background
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            success: default_success(),
            warning: default_warning(),
            danger: default_danger(),
            accent: default_accent(),
            track: default_track(),
            background: default_background(),
        }
    }
}

fn default_success() -> String {
    "#10B981".to_string()
}

fn default_warning() -> String {
    "#F59E0B".to_string()
}

fn default_danger() -> String {
    "#EF4444".to_string()
}

fn default_accent() -> String {
    "#3B82F6".to_string()
}

fn default_track() -> String {
    "#E5E7EB".to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

impl Palette {
    pub fn tier_color(&self, tier: ColorTier) -> &str {
        match tier {
            ColorTier::Success => &self.success,
            ColorTier::Warning => &self.warning,
            ColorTier::Danger => &self.danger,
        }
    }

    /// All colours with their field names, for validation
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("success", &self.success),
            ("warning", &self.warning),
            ("danger", &self.danger),
            ("accent", &self.accent),
            ("track", &self.track),
            ("background", &self.background),
        ]
    }
}

/// Renders a donut chart with a centre hole and one `<title>` per slice.
///
/// When the segments sum to zero a neutral ring is drawn instead.
pub fn render_donut_svg(
    segments: &[ChartSegment],
    geometry: &DonutGeometry,
    palette: &Palette,
    title: &str,
) -> String {
    let size = fmt_coord(geometry.size);
    let c = fmt_coord(geometry.center());
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" aria-label=\"{}\">",
        escape_xml(title)
    );

    let slices = compute_donut_segments_with(geometry, segments);
    if slices.is_empty() {
        svg.push_str(&format!(
            "<circle cx=\"{c}\" cy=\"{c}\" r=\"{}\" fill=\"{}\"><title>No data</title></circle>",
            fmt_coord(geometry.radius),
            escape_xml(&palette.track)
        ));
    }
    for slice in &slices {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\"><title>{}: {} ({}%)</title></path>",
            slice.path_data,
            escape_xml(&slice.segment.color),
            escape_xml(&slice.segment.label),
            fmt_coord(slice.segment.value),
            fmt_coord(slice.percentage.round())
        ));
    }

    svg.push_str(&format!(
        "<circle cx=\"{c}\" cy=\"{c}\" r=\"{}\" fill=\"{}\"/>",
        fmt_coord(geometry.hole_radius()),
        escape_xml(&palette.background)
    ));
    svg.push_str("</svg>");
    svg
}

/// Renders a radial gauge with a background track and the value in the centre.
pub fn render_gauge_svg(value: f64, label: &str, size: f64, palette: &Palette) -> String {
    let stroke = compute_gauge_stroke(value, GAUGE_RADIUS, GAUGE_STROKE_WIDTH);
    let color = palette.tier_color(stroke.color_tier);
    let s = fmt_coord(size);
    let c = fmt_coord(size / 2.0);
    let r = fmt_coord(stroke.normalized_radius);
    let width = fmt_coord(GAUGE_STROKE_WIDTH);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {s} {s}\" aria-label=\"{}: {}%\">",
        escape_xml(label),
        fmt_coord(value)
    );
    svg.push_str(&format!(
        "<circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"transparent\" stroke=\"{}\" stroke-width=\"{width}\"/>",
        escape_xml(&palette.track)
    ));
    // Rotate so the stroke starts at 12 o'clock like the donut slices
    svg.push_str(&format!(
        "<circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"transparent\" stroke=\"{}\" stroke-width=\"{width}\" stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\" stroke-linecap=\"round\" transform=\"rotate(-90 {c} {c})\" data-tier=\"{}\"/>",
        escape_xml(color),
        stroke.dash_array,
        fmt_coord(stroke.dash_offset),
        stroke.color_tier
    ));
    svg.push_str(&format!(
        "<text x=\"{c}\" y=\"{c}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-size=\"20\" font-weight=\"bold\">{}%</text>",
        fmt_coord(value)
    ));
    svg.push_str("</svg>");
    svg
}

/// Renders a sparkline in a stretchable `0 0 100 100` viewBox.
///
/// Returns `None` for an empty series, which has nothing to draw.
pub fn render_sparkline_svg(values: &[f64], color: &str, point_label: &str) -> Option<String> {
    let points = compute_sparkline_points(values);
    if points.is_empty() {
        return None;
    }

    let color = escape_xml(color);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"40\" viewBox=\"0 0 100 100\" preserveAspectRatio=\"none\" aria-label=\"Sparkline chart with {} data points\">",
        points.len()
    );
    svg.push_str(&format!(
        "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" points=\"{}\" vector-effect=\"non-scaling-stroke\"/>",
        polyline_points(&points)
    ));
    for (i, (point, value)) in points.iter().zip(values).enumerate() {
        svg.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"1\" fill=\"{color}\"><title>Day {}: {} {}</title></circle>",
            fmt_coord(point.x),
            fmt_coord(point.y),
            i + 1,
            fmt_coord(*value),
            escape_xml(point_label)
        ));
    }
    svg.push_str("</svg>");
    Some(svg)
}

/// Renders a labelled horizontal progress bar.
pub fn render_progress_svg(value: f64, label: &str, palette: &Palette) -> String {
    let fill = fmt_coord(progress_fill(value) * 2.0);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"36\" viewBox=\"0 0 200 36\" aria-label=\"{}: {}%\">",
        escape_xml(label),
        fmt_coord(value)
    );
    svg.push_str(&format!(
        "<text x=\"0\" y=\"12\" font-size=\"12\">{}</text>",
        escape_xml(label)
    ));
    svg.push_str(&format!(
        "<text x=\"200\" y=\"12\" font-size=\"12\" font-weight=\"bold\" text-anchor=\"end\">{}%</text>",
        fmt_coord(value)
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"22\" width=\"200\" height=\"12\" rx=\"6\" fill=\"{}\"/>",
        escape_xml(&palette.track)
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"22\" width=\"{fill}\" height=\"12\" rx=\"6\" fill=\"{}\"/>",
        escape_xml(&palette.accent)
    ));
    svg.push_str("</svg>");
    svg
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
