//! Wire shapes returned by the two API variants and their normalization
//! into the canonical view-models.

use crate::analytics::change::percent_change;
use crate::analytics::dates::{parse_date, SourceFormat};
use crate::models::market::{
    ActivityRecord, AreaRecord, DailyIntelligence, MarketRecord, MarketSummary, PriceRecord,
    TimeSeriesPoint, TopTransaction,
};
use crate::services::error::GatewayError;
use serde::Deserialize;

/// `{success, data, error}` wrapper used by the edge-function variant
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, GatewayError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(GatewayError::Decode("successful envelope without data".to_string())),
            (false, _) => Err(GatewayError::Api(
                self.error
                    .unwrap_or_else(|| "request was not successful".to_string()),
            )),
        }
    }
}

// ---- market summary ----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Envelope(Envelope<AnalyticsData>),
    Flat(FlatSummary),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSummary {
    pub total_transactions: u64,
    #[serde(default)]
    pub total_market_value: f64,
    #[serde(default)]
    pub total_area_sold: f64,
    #[serde(default)]
    pub average_property_size: f64,
    #[serde(default)]
    pub average_price_per_extent: f64,
    #[serde(default)]
    pub average_price_per_transaction: Option<f64>,
    #[serde(default)]
    pub previous_period: Option<PeriodStats>,
    #[serde(default)]
    pub comparisons: Option<Comparisons>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparisons {
    #[serde(default)]
    pub previous_period: Option<PeriodStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub average_price_per_extent: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub summary: EnvelopeSummary,
    #[serde(default)]
    pub trend_data: Vec<TrendPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub total_transactions: u64,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub avg_price_per_sqft: f64,
    #[serde(default)]
    pub price_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    #[serde(default)]
    pub avg_price: f64,
    #[serde(default)]
    pub transactions: u64,
}

impl SummaryResponse {
    pub fn normalize(self) -> Result<MarketSummary, GatewayError> {
        match self {
            SummaryResponse::Flat(flat) => {
                let previous = flat
                    .previous_period
                    .or_else(|| flat.comparisons.and_then(|c| c.previous_period));
                Ok(MarketSummary {
                    total_transactions: flat.total_transactions,
                    total_value: flat.total_market_value,
                    total_area_sold: flat.total_area_sold,
                    average_property_size: flat.average_property_size,
                    avg_price_per_unit: flat.average_price_per_extent,
                    avg_price_per_transaction: flat.average_price_per_transaction,
                    price_change: previous.and_then(|p| {
                        percent_change(flat.average_price_per_extent, p.average_price_per_extent)
                    }),
                })
            }
            SummaryResponse::Envelope(envelope) => {
                let summary = envelope.into_result()?.summary;
                let avg_price_per_transaction = (summary.avg_price > 0.0).then_some(summary.avg_price);
                Ok(MarketSummary {
                    total_transactions: summary.total_transactions,
                    total_value: summary.total_value,
                    total_area_sold: 0.0,
                    average_property_size: 0.0,
                    avg_price_per_unit: summary.avg_price_per_sqft,
                    avg_price_per_transaction,
                    price_change: summary.price_change,
                })
            }
        }
    }
}

// ---- time series ----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TimeSeriesResponse {
    Envelope(Envelope<AnalyticsData>),
    Top10(Top10Series),
}

#[derive(Debug, Deserialize)]
pub struct Top10Series {
    pub timeseries_data: Vec<Top10Point>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Top10Point {
    pub date: String,
    #[serde(default)]
    pub sum_top10_consideration_value: f64,
    #[serde(default)]
    pub transactions: u64,
}

impl TimeSeriesResponse {
    /// Points sorted by date; any unparseable date rejects the whole body
    pub fn normalize(self) -> Result<Vec<TimeSeriesPoint>, GatewayError> {
        let mut points = match self {
            TimeSeriesResponse::Top10(series) => series
                .timeseries_data
                .into_iter()
                .map(|p| point(&p.date, p.sum_top10_consideration_value, p.transactions))
                .collect::<Result<Vec<_>, _>>()?,
            TimeSeriesResponse::Envelope(envelope) => envelope
                .into_result()?
                .trend_data
                .into_iter()
                .map(|p| point(&p.date, p.avg_price, p.transactions))
                .collect::<Result<Vec<_>, _>>()?,
        };
        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

fn point(date: &str, value: f64, transactions: u64) -> Result<TimeSeriesPoint, GatewayError> {
    let date = parse_date(date, SourceFormat::Detect).map_err(|e| GatewayError::Decode(e.to_string()))?;
    Ok(TimeSeriesPoint {
        date,
        value,
        transactions,
    })
}

// ---- top / recent transactions ----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransactionsResponse {
    Envelope(Envelope<Vec<RecentTransaction>>),
    Detailed(DetailedTransactions),
}

#[derive(Debug, Deserialize)]
pub struct DetailedTransactions {
    pub top_documents: Vec<TopDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDocument {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sro_name: Option<String>,
    #[serde(default)]
    pub consideration_value: Option<f64>,
    #[serde(default)]
    pub price_per_extent: Option<f64>,
    #[serde(default)]
    pub extent: Option<f64>,
    #[serde(default, alias = "extentUnit")]
    pub unit_of_extent: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub date_of_registration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: String,
    pub region: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub price_per_sqft: f64,
    #[serde(default)]
    pub area: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TransactionsResponse {
    pub fn normalize(self) -> Result<Vec<TopTransaction>, GatewayError> {
        match self {
            TransactionsResponse::Detailed(detailed) => Ok(detailed
                .top_documents
                .into_iter()
                .enumerate()
                .map(|(index, doc)| TopTransaction {
                    id: doc.id.unwrap_or_else(|| format!("transaction-{}", index)),
                    region: doc.sro_name.unwrap_or_else(|| "N/A".to_string()),
                    village: doc.village.unwrap_or_else(|| "N/A".to_string()),
                    consideration_value: doc.consideration_value.unwrap_or(0.0),
                    price_per_unit: doc.price_per_extent.unwrap_or(0.0),
                    extent: doc.extent.unwrap_or(0.0),
                    unit_of_extent: doc.unit_of_extent.unwrap_or_default(),
                    registered_on: doc
                        .date_of_registration
                        .and_then(|raw| parse_date(&raw, SourceFormat::DayMonthYear).ok()),
                })
                .collect()),
            TransactionsResponse::Envelope(envelope) => Ok(envelope
                .into_result()?
                .into_iter()
                .map(|tx| TopTransaction {
                    id: tx.id,
                    region: tx.region,
                    village: tx.kind,
                    consideration_value: tx.price,
                    price_per_unit: tx.price_per_sqft,
                    extent: tx.area,
                    unit_of_extent: "sqft".to_string(),
                    registered_on: tx
                        .timestamp
                        .and_then(|raw| parse_date(&raw, SourceFormat::Iso).ok()),
                })
                .collect()),
        }
    }
}

// ---- daily intelligence ----

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DailyResponse {
    Failed { error: String },
    Report(DailyReport),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub costliest_transaction: DailyPrice,
    pub most_affordable_transaction: DailyPrice,
    pub most_active_region: DailyActivity,
    pub total_transactions_today: u64,
    pub largest_area_sold: DailyArea,
    #[serde(default)]
    pub market_record: Option<DailyRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPrice {
    pub region: String,
    pub price_per_sq_yd: f64,
    pub total_price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub region: String,
    pub transaction_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyArea {
    pub region: String,
    pub area_sq_yd: f64,
}

#[derive(Debug, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub description: String,
}

impl DailyResponse {
    pub fn normalize(self) -> Result<DailyIntelligence, GatewayError> {
        let report = match self {
            DailyResponse::Failed { error } => return Err(GatewayError::Api(error)),
            DailyResponse::Report(report) => report,
        };
        let price = |p: DailyPrice| PriceRecord {
            region: p.region,
            price_per_unit: p.price_per_sq_yd,
            total_price: p.total_price,
        };
        Ok(DailyIntelligence {
            costliest: price(report.costliest_transaction),
            most_affordable: price(report.most_affordable_transaction),
            most_active: ActivityRecord {
                region: report.most_active_region.region,
                transaction_count: report.most_active_region.transaction_count,
            },
            total_transactions: report.total_transactions_today,
            largest_area: AreaRecord {
                region: report.largest_area_sold.region,
                area: report.largest_area_sold.area_sq_yd,
            },
            market_record: report.market_record.map(|r| MarketRecord {
                kind: r.kind,
                value: r.value,
                description: r.description,
            }),
        })
    }
}
