//! Horizontal progress bar fill

/// Fill width of a progress bar in percent of the track.
///
/// Clamped to `[0, 100]` so the bar never overflows its track; the label
/// shown next to the bar keeps the raw value. NaN renders as empty.
pub fn progress_fill(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Percentage of `part` in `whole`, or 0 when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
