//! Radial gauge stroke geometry
//!
//! A gauge is a circle whose stroke is revealed proportionally to a
//! percentage using `stroke-dasharray` / `stroke-dashoffset`. The offset
//! shrinks as the value grows: 0% hides the whole stroke, 100% shows all of it.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Outer radius used by the dashboard gauges
pub const GAUGE_RADIUS: f64 = 45.0;

/// Stroke width used by the dashboard gauges
pub const GAUGE_STROKE_WIDTH: f64 = 8.0;

/// Lower bound (inclusive) of the success tier
pub const SUCCESS_THRESHOLD: f64 = 80.0;

/// Lower bound (inclusive) of the warning tier
pub const WARNING_THRESHOLD: f64 = 50.0;

/// Threshold-based colour bucket for a gauge value
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorTier {
    /// value >= 80
    Success,
    /// 50 <= value < 80
    Warning,
    /// value < 50
    Danger,
}

impl ColorTier {
    /// Buckets a percentage. NaN falls into [`ColorTier::Danger`].
    pub fn for_value(value: f64) -> Self {
        if value >= SUCCESS_THRESHOLD {
            Self::Success
        } else if value >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Danger
        }
    }
}

/// Stroke parameters for the progress circle of a gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeStroke {
    /// Radius of the drawn circle: `radius - 2 * stroke_width`
    pub normalized_radius: f64,
    pub circumference: f64,
    /// `stroke-dasharray` value: one full-length dash and one full-length gap
    pub dash_array: String,
    /// `stroke-dashoffset` value
    pub dash_offset: f64,
    pub color_tier: ColorTier,
}

/// Computes the stroke for a gauge showing `value` percent.
///
/// Values outside `[0, 100]` are not clamped; they produce a valid but
/// overflowing (negative or larger than circumference) offset.
pub fn compute_gauge_stroke(value: f64, radius: f64, stroke_width: f64) -> GaugeStroke {
    let normalized_radius = radius - stroke_width * 2.0;
    let circumference = normalized_radius * 2.0 * PI;
    let dash_offset = circumference - value / 100.0 * circumference;

    GaugeStroke {
        normalized_radius,
        circumference,
        dash_array: format!("{circumference} {circumference}"),
        dash_offset,
        color_tier: ColorTier::for_value(value),
    }
}
