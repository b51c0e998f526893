//! Normalized view-models produced by the remote data gateway

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a snapshot carries fallback data instead of live data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Transport,
    HttpStatus,
    Malformed,
    ApiError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    /// Synthetic or zeroed placeholder; the UI shows a "demo data" marker
    Fallback { reason: FailureKind },
}

/// Result of one gateway call, tagged with the store revision it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub source: DataSource,
    pub revision: u64,
}

impl<T> Snapshot<T> {
    pub fn live(data: T, revision: u64) -> Self {
        Self {
            data,
            source: DataSource::Live,
            revision,
        }
    }

    pub fn fallback(data: T, reason: FailureKind, revision: u64) -> Self {
        Self {
            data,
            source: DataSource::Fallback { reason },
            revision,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Fallback { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Snapshot<U> {
        Snapshot {
            data: f(self.data),
            source: self.source,
            revision: self.revision,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub total_transactions: u64,
    pub total_value: f64,
    pub total_area_sold: f64,
    pub average_property_size: f64,
    /// Average price per unit of extent (sq.yd)
    pub avg_price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price_per_transaction: Option<f64>,
    /// Period-over-period change when the API reports a previous period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
}

impl MarketSummary {
    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub transactions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopTransaction {
    pub id: String,
    pub region: String,
    pub village: String,
    pub consideration_value: f64,
    pub price_per_unit: f64,
    pub extent: f64,
    pub unit_of_extent: String,
    pub registered_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPrice {
    pub code: String,
    pub name: String,
    pub avg_price_per_unit: f64,
    pub transaction_count: u64,
    /// False when the region's request failed or returned no transactions
    pub available: bool,
    pub above_average: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPriceList {
    pub entries: Vec<RegionPrice>,
    /// Mean over available entries only
    pub average: f64,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub region: String,
    pub price_per_unit: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub region: String,
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    pub region: String,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub kind: String,
    pub value: String,
    pub description: String,
}

/// Superlatives for the most recent day with data, independent of filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIntelligence {
    pub costliest: PriceRecord,
    pub most_affordable: PriceRecord,
    pub most_active: ActivityRecord,
    pub total_transactions: u64,
    pub largest_area: AreaRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_record: Option<MarketRecord>,
}
