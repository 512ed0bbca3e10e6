//! Sparkline normalisation
//!
//! Maps a series into a 0–100 box with the origin at the top left, so larger
//! values get smaller `y` and render higher.

use super::fmt_coord;
use serde::{Deserialize, Serialize};

/// A point in the normalised 0–100 coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Normalises `values` into sparkline points.
///
/// A flat series (max == min) uses a range of 1 and renders as a flat line.
/// An empty series yields no points; a single value sits at `x = 50`.
pub fn compute_sparkline_points(values: &[f64]) -> Vec<Point> {
    if values.is_empty() {
        return Vec::new();
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last = values.len() - 1;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = if last == 0 {
                50.0
            } else {
                i as f64 / last as f64 * 100.0
            };
            let y = 100.0 - (value - min) / range * 100.0;
            Point { x, y }
        })
        .collect()
}

/// Formats points as an SVG `points` attribute (`x,y x,y ...`).
pub fn polyline_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_does_not_divide_by_zero() {
        let points = compute_sparkline_points(&[5.0, 5.0, 5.0]);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.y == points[0].y));
        assert!(points.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn test_min_at_bottom_max_at_top() {
        let points = compute_sparkline_points(&[12.0, 28.0, 8.0]);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].x, 50.0);
        assert_eq!(points[2].x, 100.0);
        assert_eq!(points[1].y, 0.0);
        assert_eq!(points[2].y, 100.0);
        assert!((points[0].y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(compute_sparkline_points(&[]).is_empty());
        let single = compute_sparkline_points(&[42.0]);
        assert_eq!(single, vec![Point { x: 50.0, y: 100.0 }]);
    }

    #[test]
    fn test_recomputed_from_full_input() {
        let first = compute_sparkline_points(&[1.0, 2.0]);
        let second = compute_sparkline_points(&[1.0, 2.0, 3.0]);
        assert_eq!(first[1].y, 0.0);
        assert_eq!(second[1].y, 50.0);
    }

    #[test]
    fn test_polyline_points_format() {
        let points = compute_sparkline_points(&[0.0, 10.0]);
        assert_eq!(polyline_points(&points), "0,100 100,0");
    }
}
