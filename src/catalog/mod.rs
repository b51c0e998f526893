//! Zone/region reference catalog, loaded once and never mutated

use crate::models::catalog::{Classification, Region, SroOffice, Zone};

use Classification::{Emerging, Hot, Stable};

pub static ZONES: [Zone; 4] = [
    zone("central", "Central Zone", 6, 189, 12.4),
    zone("north", "North Zone", 5, 145, 8.7),
    zone("west", "West Zone", 4, 234, 15.8),
    zone("east", "East Zone", 3, 156, 10.2),
];

pub static REGIONS: [Region; 18] = [
    region("charminar", "Charminar", "central", 15000.0, 8.5, 28, Stable, Some("1608")),
    region("doodhbowli", "Doodhbowli", "central", 12000.0, 6.2, 19, Stable, Some("1603")),
    region("sultanBazar", "Sultan Bazar", "central", 18000.0, 14.7, 32, Emerging, None),
    region("abids", "Abids", "central", 20000.0, 11.3, 25, Hot, None),
    region("kotiWomens", "Koti Womens", "central", 16500.0, 9.8, 22, Stable, None),
    region("malakpet", "Malakpet", "central", 14500.0, 7.9, 18, Stable, None),
    region("secunderabad", "Secunderabad", "north", 19000.0, 10.5, 35, Hot, Some("1606")),
    region("maredpally", "Maredpally", "north", 17500.0, 8.9, 28, Stable, Some("1605")),
    region("trimulgherry", "Trimulgherry", "north", 16000.0, 7.2, 22, Stable, None),
    region("tirumalagiri", "Tirumalagiri", "north", 15500.0, 9.1, 24, Emerging, None),
    region("alwal", "Alwal", "north", 13500.0, 6.8, 18, Stable, None),
    region("golconda", "Golconda", "west", 25000.0, 18.5, 45, Hot, Some("1610")),
    region("gandipet", "Gandipet", "west", 22000.0, 16.2, 38, Hot, Some("1525")),
    region("gachibowli", "Gachibowli", "west", 28000.0, 20.3, 67, Hot, None),
    region("kondapur", "Kondapur", "west", 24500.0, 17.8, 56, Emerging, None),
    region("champapet", "Champapet", "east", 16800.0, 11.2, 33, Emerging, Some("1514")),
    region("lbNagar", "L.B.Nagar", "east", 18500.0, 12.7, 42, Emerging, Some("1527")),
    region("uppal", "Uppal", "east", 15200.0, 8.9, 28, Stable, None),
];

/// Sub-registrar offices queried one by one for the regional price ticker
pub static SRO_OFFICES: [SroOffice; 29] = [
    sro("1531", "ABDULLAPURMET"),
    sro("1601", "Azampura"),
    sro("1604", "BANJARAHILLS (R.O)"),
    sro("1609", "BOWENPALLY"),
    sro("1514", "CHAMPAPET"),
    sro("1608", "CHARMINAR"),
    sro("1501", "CHEVELLA"),
    sro("1602", "CHIKKADPALLY"),
    sro("1603", "DOODHBOWLI"),
    sro("1415", "FAROOQ NAGAR"),
    sro("1525", "GANDIPET"),
    sro("1610", "GOLCONDA"),
    sro("1502", "HAYATHNAGAR"),
    sro("1607", "HYDERABAD (R.O)"),
    sro("1503", "IBRAHIMPATNAM"),
    sro("1527", "L.B.NAGAR"),
    sro("1519", "MAHESWARAM"),
    sro("1605", "MAREDPALLY"),
    sro("1515", "PEDDA AMBERPET"),
    sro("1518", "RAJENDRA NAGAR"),
    sro("1510", "RANGA REDDY (R.O)"),
    sro("1611", "S.R.NAGAR"),
    sro("1513", "SAROORNAGAR"),
    sro("1606", "SECUNDERABAD"),
    sro("1522", "SERILINGAMPALLI"),
    sro("1411", "SHADNAGAR"),
    sro("1520", "SHAMSHABAD"),
    sro("1524", "SHANKARPALLY"),
    sro("1528", "VANASTHALIPURAM"),
];

const fn zone(
    id: &'static str,
    name: &'static str,
    region_count: u32,
    total_transactions: u32,
    avg_price_change: f64,
) -> Zone {
    Zone {
        id,
        name,
        region_count,
        total_transactions,
        avg_price_change,
    }
}

const fn region(
    id: &'static str,
    name: &'static str,
    zone_id: &'static str,
    avg_price: f64,
    change_percent: f64,
    transaction_count: u32,
    classification: Classification,
    sro_code: Option<&'static str>,
) -> Region {
    Region {
        id,
        name,
        zone_id,
        avg_price,
        change_percent,
        transaction_count,
        classification,
        sro_code,
    }
}

const fn sro(code: &'static str, name: &'static str) -> SroOffice {
    SroOffice { code, name }
}

/// Regions belonging to any of `zone_ids`; every region when `zone_ids` is empty
pub fn regions_for_zones<S: AsRef<str>>(zone_ids: &[S]) -> Vec<&'static Region> {
    if zone_ids.is_empty() {
        return REGIONS.iter().collect();
    }
    REGIONS
        .iter()
        .filter(|r| zone_ids.iter().any(|z| z.as_ref() == r.zone_id))
        .collect()
}

pub fn zone_by_id(zone_id: &str) -> Option<&'static Zone> {
    ZONES.iter().find(|z| z.id == zone_id)
}

pub fn region_by_id(region_id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == region_id)
}

pub fn region_by_sro_code(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.sro_code == Some(code))
}

/// Zone owning a region, addressed either by catalog id or by SRO code
pub fn zone_of(region_id: &str) -> Option<&'static str> {
    region_by_id(region_id)
        .or_else(|| region_by_sro_code(region_id))
        .map(|r| r.zone_id)
}

/// Code sent to the analytics API for a selected region; unknown ids pass through
pub fn api_region_code(region_id: &str) -> &str {
    match region_by_id(region_id).and_then(|r| r.sro_code) {
        Some(code) => code,
        None => region_id,
    }
}

pub fn sro_by_code(code: &str) -> Option<&'static SroOffice> {
    SRO_OFFICES.iter().find(|s| s.code == code)
}

