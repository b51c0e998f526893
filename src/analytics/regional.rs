//! Above/below-average classification for the per-region price list

use crate::analytics::change::rolling_average;
use crate::models::market::RegionPrice;

/// Flag entries priced above the mean of the available entries and return that mean.
///
/// Unavailable entries (failed or empty fetches) are excluded from the mean
/// and never flagged.
pub fn classify_against_average(entries: &mut [RegionPrice]) -> f64 {
    let prices: Vec<f64> = entries
        .iter()
        .filter(|e| e.available)
        .map(|e| e.avg_price_per_unit)
        .collect();
    let average = rolling_average(&prices);

    for entry in entries.iter_mut() {
        entry.above_average = entry.available && entry.avg_price_per_unit > average;
    }
    average
}
