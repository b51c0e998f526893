//! Period-over-period change and averages

use crate::models::market::TimeSeriesPoint;

/// Percentage change from `previous` to `current`, unrounded.
///
/// `None` when `previous` is zero or the result is not finite.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let change = (current - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// Change between the last two values of a series; `None` with fewer than two
pub fn latest_change(values: &[f64]) -> Option<f64> {
    match values {
        [.., previous, current] => percent_change(*current, *previous),
        _ => None,
    }
}

/// Arithmetic mean; 0 for an empty sequence
pub fn rolling_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Floored mean of a series, drawn as a flat reference line on trend charts
pub fn reference_average(points: &[TimeSeriesPoint]) -> f64 {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    rolling_average(&values).floor()
}
