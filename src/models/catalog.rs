//! Static zone and region reference data types

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Hot,
    Stable,
    Emerging,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: &'static str,
    pub name: &'static str,
    pub region_count: u32,
    pub total_transactions: u32,
    pub avg_price_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub zone_id: &'static str,
    pub avg_price: f64,
    pub change_percent: f64,
    pub transaction_count: u32,
    pub classification: Classification,
    /// Sub-registrar office code the analytics API knows this region by
    pub sro_code: Option<&'static str>,
}

/// Sub-registrar office known to the analytics API by numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SroOffice {
    pub code: &'static str,
    pub name: &'static str,
}
