//! Unit tests for the zone/region catalog

use marketpulse::catalog::{
    api_region_code, region_by_id, regions_for_zones, sro_by_code, zone_by_id, zone_of, REGIONS,
    SRO_OFFICES, ZONES,
};
use std::collections::HashSet;

#[test]
fn zone_region_counts_match_regions() {
    for zone in ZONES.iter() {
        let count = REGIONS.iter().filter(|r| r.zone_id == zone.id).count();
        assert_eq!(count as u32, zone.region_count, "zone {}", zone.id);
    }
}

#[test]
fn every_region_belongs_to_a_known_zone() {
    for region in REGIONS.iter() {
        assert!(zone_by_id(region.zone_id).is_some(), "region {}", region.id);
    }
}

#[test]
fn identifiers_are_unique() {
    let regions: HashSet<_> = REGIONS.iter().map(|r| r.id).collect();
    assert_eq!(regions.len(), REGIONS.len());
    let codes: HashSet<_> = SRO_OFFICES.iter().map(|s| s.code).collect();
    assert_eq!(codes.len(), 29);
}

#[test]
fn region_sro_codes_exist_in_office_table() {
    for region in REGIONS.iter() {
        if let Some(code) = region.sro_code {
            assert!(sro_by_code(code).is_some(), "region {} code {}", region.id, code);
        }
    }
}

#[test]
fn empty_zone_selection_lists_all_regions() {
    let none: [&str; 0] = [];
    assert_eq!(regions_for_zones(&none).len(), REGIONS.len());

    let east = regions_for_zones(&["east"]);
    assert_eq!(east.len(), 3);
    assert!(east.iter().all(|r| r.zone_id == "east"));
}

#[test]
fn lookups_by_id_and_code() {
    assert_eq!(region_by_id("golconda").map(|r| r.name), Some("Golconda"));
    assert_eq!(zone_of("golconda"), Some("west"));
    assert_eq!(zone_of("1608"), Some("central"));
    assert_eq!(zone_of("nowhere"), None);
}

#[test]
fn api_codes_map_known_regions_and_pass_through_others() {
    assert_eq!(api_region_code("charminar"), "1608");
    assert_eq!(api_region_code("1527"), "1527");
    assert_eq!(api_region_code("abids"), "abids");
}
