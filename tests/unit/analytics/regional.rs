//! Unit tests for above-average classification

use marketpulse::analytics::classify_against_average;
use marketpulse::models::market::RegionPrice;

fn entry(code: &str, price: f64, available: bool) -> RegionPrice {
    RegionPrice {
        code: code.to_string(),
        name: code.to_string(),
        avg_price_per_unit: price,
        transaction_count: u64::from(available),
        available,
        above_average: false,
    }
}

#[test]
fn unavailable_entries_are_excluded_from_average() {
    let mut entries = vec![
        entry("a", 100.0, true),
        entry("b", 300.0, true),
        entry("c", 0.0, false),
    ];
    let average = classify_against_average(&mut entries);

    assert_eq!(average, 200.0);
    assert!(!entries[0].above_average);
    assert!(entries[1].above_average);
    assert!(!entries[2].above_average);
}

#[test]
fn nothing_available_means_zero_average() {
    let mut entries = vec![entry("a", 0.0, false), entry("b", 0.0, false)];
    assert_eq!(classify_against_average(&mut entries), 0.0);
    assert!(entries.iter().all(|e| !e.above_average));
}
