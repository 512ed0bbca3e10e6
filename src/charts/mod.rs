//! Chart geometry for the dashboard widgets
//!
//! Pure functions that turn numbers into SVG geometry:
//!
//! - [`donut`]: proportional values to contiguous pie-slice paths
//! - [`gauge`]: a percentage to a circular stroke offset and colour tier
//! - [`sparkline`]: a series to points in a normalised 0–100 box
//! - [`progress`]: a percentage to a bar fill width
//! - [`svg`]: standalone SVG documents built from the above
//!
//! None of these functions can fail. Degenerate input (zero total, flat series)
//! is substituted with a safe value so rendering never panics.

pub mod donut;
pub mod gauge;
pub mod progress;
pub mod sparkline;
pub mod svg;

pub use donut::{ChartSegment, DonutGeometry, DonutSlice, compute_donut_segments};
pub use gauge::{ColorTier, GaugeStroke, compute_gauge_stroke};
pub use progress::progress_fill;
pub use sparkline::{Point, compute_sparkline_points};
pub use svg::Palette;

/// Formats a coordinate for SVG output.
///
/// Rounds to three decimals and trims trailing zeros so paths stay readable
/// (`60` instead of `60.000000000000003`). Negative zero prints as `0`.
pub fn fmt_coord(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
