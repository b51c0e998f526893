//! Min/max normalization and the discrete badge tiers built on it

use serde::Serialize;

/// Position reported for a degenerate (`min == max`) range
pub const NEUTRAL_POSITION: f64 = 0.5;

/// Position of `value` inside `[min, max]`, clamped to `[0, 1]`
pub fn normalized_position(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() || !value.is_finite() {
        return NEUTRAL_POSITION;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Visual tier of a price badge, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Lowest,
    Low,
    Middle,
    High,
    Highest,
}

/// Step function with breakpoints 0.2 / 0.4 / 0.6 / 0.8
pub fn bucket_badge_tier(position: f64) -> BadgeTier {
    if position <= 0.2 {
        BadgeTier::Lowest
    } else if position >= 0.8 {
        BadgeTier::Highest
    } else if position <= 0.4 {
        BadgeTier::Low
    } else if position <= 0.6 {
        BadgeTier::Middle
    } else {
        BadgeTier::High
    }
}

/// `(min, max)` of the finite values, `None` when there are none
pub fn value_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}
