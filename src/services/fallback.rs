//! Placeholder values substituted when the analytics API is unavailable.
//!
//! Values are deterministic so repeated fallbacks do not flicker; callers
//! mark them as demo data through `DataSource::Fallback`.

use crate::models::catalog::SroOffice;
use crate::models::market::{
    ActivityRecord, AreaRecord, DailyIntelligence, MarketSummary, PriceRecord, RegionPrice,
    RegionPriceList, TopTransaction,
};

const TICKER_REGIONS: [&str; 8] = [
    "Charminar",
    "Secunderabad",
    "Golconda",
    "Champapet",
    "Shaikpet",
    "L.B.Nagar",
    "Maredpally",
    "Tolichowki",
];

const PROPERTY_KINDS: [&str; 2] = ["Residential", "Commercial"];

pub fn zeroed_summary() -> MarketSummary {
    MarketSummary::default()
}

pub fn zeroed_region_prices(offices: &[SroOffice]) -> RegionPriceList {
    RegionPriceList {
        entries: offices
            .iter()
            .map(|office| RegionPrice {
                code: office.code.to_string(),
                name: office.name.to_string(),
                avg_price_per_unit: 0.0,
                transaction_count: 0,
                available: false,
                above_average: false,
            })
            .collect(),
        average: 0.0,
        failed: offices.len(),
    }
}

/// Ticker entries priced between 20 lakh and 1 crore
pub fn placeholder_transactions(count: usize) -> Vec<TopTransaction> {
    (0..count)
        .map(|i| {
            let step = (i * 37 % 100) as f64 / 100.0;
            let price = (2_000_000.0 + step * 8_000_000.0).floor();
            let area = (1000.0 + step * 3000.0).floor();
            TopTransaction {
                id: format!("fallback_{}", i),
                region: TICKER_REGIONS[i % TICKER_REGIONS.len()].to_string(),
                village: PROPERTY_KINDS[i % PROPERTY_KINDS.len()].to_string(),
                consideration_value: price,
                price_per_unit: (price / area).floor(),
                extent: area,
                unit_of_extent: "Sq.Yd".to_string(),
                registered_on: None,
            }
        })
        .collect()
}

pub fn placeholder_daily() -> DailyIntelligence {
    DailyIntelligence {
        costliest: PriceRecord {
            region: "Banjara Hills".to_string(),
            price_per_unit: 10_500.0,
            total_price: 55_000_000.0,
        },
        most_affordable: PriceRecord {
            region: "Kukatpally".to_string(),
            price_per_unit: 3_000.0,
            total_price: 4_500_000.0,
        },
        most_active: ActivityRecord {
            region: "Gachibowli".to_string(),
            transaction_count: 15,
        },
        total_transactions: 55,
        largest_area: AreaRecord {
            region: "Kondapur".to_string(),
            area: 5_500.0,
        },
        market_record: None,
    }
}
