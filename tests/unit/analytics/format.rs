//! Unit tests for display formatting and summary labels

use marketpulse::analytics::{
    format_area, format_currency_scale, format_indian_number, format_percent, ActivityLevel,
    AreaVolume, PropertySize, TrendLabel,
};

#[test]
fn currency_scale_tiers() {
    assert_eq!(format_currency_scale(1_250_000_000.0), "₹125.0Cr");
    assert_eq!(format_currency_scale(2_500_000.0), "₹25.0L");
    assert_eq!(format_currency_scale(45_000.0), "₹45.0K");
    assert_eq!(format_currency_scale(999.0), "₹999");
    assert_eq!(format_currency_scale(0.0), "₹0");
}

#[test]
fn currency_scale_boundaries() {
    assert_eq!(format_currency_scale(10_000_000.0), "₹1.0Cr");
    assert_eq!(format_currency_scale(100_000.0), "₹1.0L");
    assert_eq!(format_currency_scale(1_000.0), "₹1.0K");
}

#[test]
fn currency_scale_keeps_sign() {
    assert_eq!(format_currency_scale(-15_000_000.0), "-₹1.5Cr");
}

#[test]
fn indian_digit_grouping() {
    assert_eq!(format_indian_number(1_234_567.0), "12,34,567");
    assert_eq!(format_indian_number(100_000.0), "1,00,000");
    assert_eq!(format_indian_number(1_000.0), "1,000");
    assert_eq!(format_indian_number(999.4), "999");
    assert_eq!(format_indian_number(-12_345.0), "-12,345");
}

#[test]
fn area_formatting() {
    assert_eq!(format_area(3_200.0), "3.2K sq yd");
    assert_eq!(format_area(850.0), "850 sq yd");
}

#[test]
fn percent_formatting() {
    assert_eq!(format_percent(Some(5.24)), "+5.2%");
    assert_eq!(format_percent(Some(-3.0)), "-3.0%");
    assert_eq!(format_percent(Some(0.0)), "+0.0%");
    assert_eq!(format_percent(None), "n/a");
}

#[test]
fn activity_levels() {
    assert_eq!(ActivityLevel::from_transactions(101), ActivityLevel::High);
    assert_eq!(ActivityLevel::from_transactions(100), ActivityLevel::Moderate);
    assert_eq!(ActivityLevel::from_transactions(50), ActivityLevel::Steady);
    assert_eq!(ActivityLevel::High.description(), "High activity period");
}

#[test]
fn area_and_size_levels() {
    assert_eq!(AreaVolume::from_area(10_001.0), AreaVolume::High);
    assert_eq!(AreaVolume::from_area(6_000.0), AreaVolume::Moderate);
    assert_eq!(AreaVolume::from_area(5_000.0), AreaVolume::Steady);
    assert_eq!(PropertySize::from_average(501.0), PropertySize::Large);
    assert_eq!(PropertySize::from_average(300.0), PropertySize::Medium);
    assert_eq!(PropertySize::from_average(200.0), PropertySize::Compact);
}

#[test]
fn trend_labels() {
    assert_eq!(TrendLabel::from_change(Some(7.5)), TrendLabel::StrongUpward);
    assert_eq!(TrendLabel::from_change(Some(-7.5)), TrendLabel::Correction);
    assert_eq!(TrendLabel::from_change(Some(5.0)), TrendLabel::Stable);
    assert_eq!(TrendLabel::from_change(None), TrendLabel::Stable);
}
