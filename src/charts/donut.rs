//! Donut chart slice geometry
//!
//! Each segment becomes a closed pie-slice path: move to the centre, line to
//! the start point on the circle, arc to the end point, close. Slices start at
//! 12 o'clock and run clockwise in input order with no gaps or overlaps.
//!
//! # Example
//!
//! ```
//! use kgdash::charts::{ChartSegment, compute_donut_segments};
//!
//! let segments = vec![
//!     ChartSegment::new("Existing", 50.0, "#3B82F6"),
//!     ChartSegment::new("Inverse", 50.0, "#10B981"),
//! ];
//! let slices = compute_donut_segments(&segments);
//! assert_eq!(slices[0].path_data, "M 60 60 L 60 15 A 45 45 0 0 1 60 105 Z");
//! ```

use super::fmt_coord;
use serde::{Deserialize, Serialize};

/// Degrees per percentage point (360 / 100)
const DEGREES_PER_PERCENT: f64 = 3.6;

/// Rotates the origin from 3 o'clock to 12 o'clock
const ANGLE_OFFSET: f64 = -90.0;

/// One slice of a donut chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub label: String,
    /// Relative magnitude; values need not sum to 100
    pub value: f64,
    pub color: String,
}

impl ChartSegment {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }

    /// Value used for proportions: negative and NaN count as zero.
    fn weight(&self) -> f64 {
        if self.value.is_nan() {
            0.0
        } else {
            self.value.max(0.0)
        }
    }
}

/// Canvas and circle dimensions for a donut chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutGeometry {
    /// Width and height of the square canvas
    pub size: f64,
    /// Outer radius of the slices
    pub radius: f64,
    /// Ring thickness; the centre hole has radius `radius - stroke_width`
    pub stroke_width: f64,
}

impl DonutGeometry {
    pub fn center(&self) -> f64 {
        self.size / 2.0
    }

    pub fn hole_radius(&self) -> f64 {
        self.radius - self.stroke_width
    }

    fn point_at(&self, angle_deg: f64) -> (f64, f64) {
        let rad = angle_deg.to_radians();
        let c = self.center();
        (c + self.radius * rad.cos(), c + self.radius * rad.sin())
    }
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            size: 120.0,
            radius: 45.0,
            stroke_width: 10.0,
        }
    }
}

/// Computed geometry for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice<'a> {
    pub segment: &'a ChartSegment,
    /// Share of the total, 0–100
    pub percentage: f64,
    /// Start angle in degrees (-90 is 12 o'clock)
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    /// SVG path `d` attribute
    pub path_data: String,
}

impl DonutSlice<'_> {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Computes slices with the default dashboard geometry (120px canvas, radius 45).
pub fn compute_donut_segments(segments: &[ChartSegment]) -> Vec<DonutSlice<'_>> {
    compute_donut_segments_with(&DonutGeometry::default(), segments)
}

/// Computes contiguous pie-slice paths for `segments`.
///
/// Returns an empty list when the total is zero or not finite; callers render
/// a "no data" state instead.
pub fn compute_donut_segments_with<'a>(
    geometry: &DonutGeometry,
    segments: &'a [ChartSegment],
) -> Vec<DonutSlice<'a>> {
    let total: f64 = segments.iter().map(ChartSegment::weight).sum();
    if !total.is_finite() || total <= 0.0 {
        tracing::debug!(segments = segments.len(), "donut total is zero, no slices");
        return Vec::new();
    }

    let mut cumulative = 0.0;
    segments
        .iter()
        .map(|segment| {
            let percentage = segment.weight() / total * 100.0;
            let slice = build_slice(geometry, segment, percentage, cumulative);
            cumulative += percentage;
            slice
        })
        .collect()
}

fn build_slice<'a>(
    geometry: &DonutGeometry,
    segment: &'a ChartSegment,
    percentage: f64,
    cumulative: f64,
) -> DonutSlice<'a> {
    let start_angle = cumulative * DEGREES_PER_PERCENT + ANGLE_OFFSET;
    let end_angle = (cumulative + percentage) * DEGREES_PER_PERCENT + ANGLE_OFFSET;
    let large_arc = percentage > 50.0;

    let c = fmt_coord(geometry.center());
    let r = fmt_coord(geometry.radius);
    let (x1, y1) = geometry.point_at(start_angle);

    // A full circle has identical endpoints, which SVG renders as nothing.
    // Split it into two half arcs through the opposite point.
    let path_data = if percentage >= 100.0 - 1e-9 {
        let (xm, ym) = geometry.point_at(start_angle + 180.0);
        format!(
            "M {c} {c} L {x1} {y1} A {r} {r} 0 1 1 {xm} {ym} A {r} {r} 0 1 1 {x1} {y1} Z",
            x1 = fmt_coord(x1),
            y1 = fmt_coord(y1),
            xm = fmt_coord(xm),
            ym = fmt_coord(ym),
        )
    } else {
        let (x2, y2) = geometry.point_at(end_angle);
        format!(
            "M {c} {c} L {x1} {y1} A {r} {r} 0 {flag} 1 {x2} {y2} Z",
            x1 = fmt_coord(x1),
            y1 = fmt_coord(y1),
            flag = u8::from(large_arc),
            x2 = fmt_coord(x2),
            y2 = fmt_coord(y2),
        )
    };

    DonutSlice {
        segment,
        percentage,
        start_angle,
        end_angle,
        large_arc,
        path_data,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sweeps_sum_to_full_circle(values in proptest::collection::vec(0.01f64..1000.0, 1..12)) {
            let segments: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| ChartSegment::new(format!("s{i}"), *v, "#000"))
                .collect();
            let slices = compute_donut_segments(&segments);

            let total: f64 = slices.iter().map(DonutSlice::sweep).sum();
            prop_assert!((total - 360.0).abs() < 1e-6);
            prop_assert!((slices[0].start_angle + 90.0).abs() < 1e-9);
            for pair in slices.windows(2) {
                prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-9);
            }
        }
    }
}
