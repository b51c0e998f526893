//! Query-string encoding; the only place `DD-MM-YYYY` dates are produced

use crate::analytics::dates::to_api_date;
use crate::services::market_data::MarketQuery;

pub const SUMMARY_PATH: &str = "/market/value/summary";
pub const TIME_SERIES_PATH: &str = "/market/value/timeseries_top10_sum";
pub const TOP_TRANSACTIONS_PATH: &str = "/market/value/top10_detailed";
pub const RECENT_TRANSACTIONS_PATH: &str = "/recent-transactions";
pub const DAILY_INTELLIGENCE_PATH: &str = "/market/value/daily-intelligence";

/// `startDate`, `endDate` and, when regions are selected, a comma-joined `sroCode`
pub fn market_params(query: &MarketQuery) -> Vec<(&'static str, String)> {
    let mut params = date_params(query);
    if !query.region_codes.is_empty() {
        params.push(("sroCode", query.region_codes.join(",")));
    }
    params
}

/// Same window scoped to a single office
pub fn region_params(query: &MarketQuery, code: &str) -> Vec<(&'static str, String)> {
    let mut params = date_params(query);
    params.push(("sroCode", code.to_string()));
    params
}

pub fn recent_params(limit: usize) -> Vec<(&'static str, String)> {
    vec![("limit", limit.to_string())]
}

fn date_params(query: &MarketQuery) -> Vec<(&'static str, String)> {
    vec![
        ("startDate", to_api_date(query.range.from)),
        ("endDate", to_api_date(query.range.to)),
    ]
}
