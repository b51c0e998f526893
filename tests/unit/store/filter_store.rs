//! Unit tests for the filter store

use chrono::NaiveDate;
use marketpulse::models::filter::{
    AdvancedFilterKind, AdvancedFiltersPatch, RangeFilter, SortBy, Timeframe, AREA_RANGE_LIMITS,
    PRICE_RANGE_LIMITS,
};
use marketpulse::store::{FilterSnapshot, FilterStore, FixedClock, StoreError};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_at(today: NaiveDate) -> FilterStore {
    FilterStore::new(Arc::new(FixedClock(today)))
}

fn store() -> FilterStore {
    store_at(date(2025, 1, 28))
}

#[test]
fn initial_state_uses_thirty_day_window() {
    let store = store();
    let state = store.get_state();

    assert_eq!(state.revision, 0);
    assert_eq!(state.timeframe, Timeframe::Days30);
    assert_eq!(state.date_from, date(2024, 12, 29));
    assert_eq!(state.date_to, date(2025, 1, 28));
    assert!(state.selected_zones.is_empty());
    assert!(state.selected_regions.is_empty());
    assert_eq!(state.active_filter_count(), 0);
}

#[test]
fn seven_day_timeframe_ends_today() {
    let mut store = store();
    let state = store.set_timeframe(Timeframe::Days7);

    assert_eq!(state.timeframe, Timeframe::Days7);
    assert_eq!(state.date_from, date(2025, 1, 21));
    assert_eq!(state.date_to, date(2025, 1, 28));
}

#[test]
fn custom_timeframe_keeps_dates() {
    let mut store = store();
    store.set_timeframe(Timeframe::Days90);
    let before = store.get_state();

    let after = store.set_timeframe(Timeframe::Custom);
    assert_eq!(after.timeframe, Timeframe::Custom);
    assert_eq!(after.date_from, before.date_from);
    assert_eq!(after.date_to, before.date_to);
}

#[test]
fn inverted_date_range_is_rejected_without_change() {
    let mut store = store();
    let before = store.get_state();

    let result = store.set_date_range(date(2025, 1, 20), date(2025, 1, 10));
    assert_eq!(
        result,
        Err(StoreError::InvalidDateRange {
            from: date(2025, 1, 20),
            to: date(2025, 1, 10),
        })
    );
    assert_eq!(store.get_state(), before);
}

#[test]
fn date_range_does_not_alter_timeframe() {
    let mut store = store();
    let state = store
        .set_date_range(date(2025, 1, 1), date(2025, 1, 15))
        .expect("valid range");

    assert_eq!(state.timeframe, Timeframe::Days30);
    assert_eq!(state.date_from, date(2025, 1, 1));
    assert_eq!(state.date_to, date(2025, 1, 15));
}

#[test]
fn single_day_range_is_accepted() {
    let mut store = store();
    tokio_test::assert_ok!(store.set_date_range(date(2025, 1, 5), date(2025, 1, 5)));
}

#[test]
fn deselecting_zone_drops_its_regions() {
    let mut store = store();
    store.toggle_zone("central");
    store.toggle_zone("west");
    store.toggle_region("charminar");
    store.toggle_region("golconda");

    let state = store.toggle_zone("central");
    assert!(!state.selected_zones.contains("central"));
    assert!(!state.selected_regions.contains("charminar"));
    assert!(state.selected_regions.contains("golconda"));
}

#[test]
fn deselecting_zone_drops_regions_selected_by_sro_code() {
    let mut store = store();
    store.toggle_zone("north");
    store.toggle_region("1606");

    let state = store.toggle_zone("north");
    assert!(state.selected_regions.is_empty());
}

#[test]
fn selecting_zone_adds_no_regions() {
    let mut store = store();
    let state = store.toggle_zone("east");

    assert_eq!(state.selected_zones, BTreeSet::from(["east".to_string()]));
    assert!(state.selected_regions.is_empty());
}

#[test]
fn region_toggle_is_not_validated_against_zones() {
    let mut store = store();
    store.toggle_zone("east");
    let state = store.toggle_region("golconda");
    assert!(state.selected_regions.contains("golconda"));

    let state = store.toggle_region("golconda");
    assert!(!state.selected_regions.contains("golconda"));
}

#[test]
fn zone_toggle_reconciles_regions_outside_selection() {
    let mut store = store();
    store.toggle_zone("east");
    store.toggle_region("golconda");
    store.toggle_region("uppal");

    let state = store.toggle_zone("north");
    assert!(state.selected_regions.contains("uppal"));
    assert!(!state.selected_regions.contains("golconda"));
}

#[test]
fn clearing_zones_clears_regions() {
    let mut store = store();
    store.toggle_zone("central");
    store.toggle_region("abids");

    let state = store.clear_zones();
    assert!(state.selected_zones.is_empty());
    assert!(state.selected_regions.is_empty());
}

#[test]
fn set_selected_regions_replaces_selection() {
    let mut store = store();
    store.toggle_region("abids");

    let state = store.set_selected_regions(["uppal", "alwal"]);
    assert_eq!(
        state.selected_regions,
        BTreeSet::from(["alwal".to_string(), "uppal".to_string()])
    );

    let state = store.clear_regions();
    assert!(state.selected_regions.is_empty());
}

#[test]
fn search_query_activity_ignores_whitespace() {
    let mut store = store();
    assert!(!store.set_search_query("   ").is_search_active());
    assert!(store.set_search_query("villa").is_search_active());
    assert!(!store.clear_search().is_search_active());
}

#[test]
fn advanced_filter_patch_merges_fields() {
    let mut store = store();
    let state = store
        .set_advanced_filters(AdvancedFiltersPatch {
            price_range: Some(RangeFilter {
                min: 1_000_000,
                max: 5_000_000,
            }),
            property_types: Some(BTreeSet::from(["apartment".to_string()])),
            sort_by: Some(SortBy::Price),
            ..Default::default()
        })
        .expect("valid patch");

    let filters = &state.advanced_filters;
    assert_eq!(filters.price_range.min, 1_000_000);
    assert_eq!(filters.area_range, AREA_RANGE_LIMITS);
    assert_eq!(filters.sort_by, SortBy::Price);
    assert_eq!(state.active_filter_count(), 2);
}

#[test]
fn inverted_advanced_range_rejects_whole_patch() {
    let mut store = store();
    let before = store.get_state();

    let result = store.set_advanced_filters(AdvancedFiltersPatch {
        area_range: Some(RangeFilter { min: 900, max: 100 }),
        sort_by: Some(SortBy::Area),
        ..Default::default()
    });

    assert!(matches!(
        result,
        Err(StoreError::InvalidRange { field: "areaRange", .. })
    ));
    assert_eq!(store.get_state(), before);
}

#[test]
fn removing_advanced_filters() {
    let mut store = store();
    store
        .set_advanced_filters(AdvancedFiltersPatch {
            price_range: Some(RangeFilter { min: 10, max: 20 }),
            amenities: Some(BTreeSet::from(["gym".to_string(), "pool".to_string()])),
            ..Default::default()
        })
        .expect("valid patch");

    let state = store.remove_advanced_filter(AdvancedFilterKind::Amenities, Some("gym"));
    assert_eq!(
        state.advanced_filters.amenities,
        BTreeSet::from(["pool".to_string()])
    );

    let state = store.remove_advanced_filter(AdvancedFilterKind::PriceRange, None);
    assert_eq!(state.advanced_filters.price_range, PRICE_RANGE_LIMITS);

    let state = store.remove_advanced_filter(AdvancedFilterKind::Amenities, None);
    assert!(state.advanced_filters.amenities.is_empty());
    assert_eq!(state.active_filter_count(), 0);
}

#[test]
fn reset_all_restores_defaults() {
    let mut store = store();
    let initial = store.get_state();
    store.toggle_zone("west");
    store.toggle_region("gachibowli");
    store.set_timeframe(Timeframe::Days7);
    store.set_search_query("plots");

    let state = store.reset_all();
    assert_eq!(*state.state, *initial.state);
    assert!(state.revision > initial.revision);
}

#[test]
fn subscribers_are_notified_synchronously() {
    let mut store = store();
    let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let id = store.subscribe(move |snapshot: &FilterSnapshot| {
        sink.lock().unwrap().push(snapshot.revision);
    });

    store.toggle_zone("central");
    store.set_timeframe(Timeframe::Days7);
    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.toggle_zone("central");
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn unchanged_mutation_keeps_revision() {
    let mut store = store();
    store.set_timeframe(Timeframe::Days30);
    assert_eq!(store.revision(), 0);

    store.clear_regions();
    assert_eq!(store.revision(), 0);
}

#[test]
fn snapshots_are_immutable() {
    let mut store = store();
    let before = store.get_state();
    store.toggle_zone("north");

    assert!(before.selected_zones.is_empty());
    assert_eq!(store.get_state().selected_zones.len(), 1);
}

#[test]
fn seven_day_default_store() {
    let store = FilterStore::with_default_timeframe(
        Arc::new(FixedClock(date(2025, 1, 28))),
        Timeframe::Days7,
    );
    assert_eq!(store.get_state().date_from, date(2025, 1, 21));
}
