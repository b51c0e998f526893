//! Presentation models built from normalized gateway data

use crate::analytics::change::{latest_change, reference_average};
use crate::analytics::dates::display_date;
use crate::analytics::format::{
    format_area, format_currency_scale, format_indian_number, format_percent,
};
use crate::analytics::labels::{ActivityLevel, AreaVolume, PropertySize, TrendLabel};
use crate::analytics::scale::{bucket_badge_tier, normalized_position, value_bounds, BadgeTier};
use crate::models::filter::Timeframe;
use crate::models::market::{
    DailyIntelligence, MarketRecord, MarketSummary, RegionPriceList, TimeSeriesPoint,
    TopTransaction,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub period: &'static str,
    pub total_transactions: String,
    pub total_value: String,
    pub avg_price_per_unit: String,
    pub avg_price_per_transaction: Option<String>,
    pub total_area_sold: String,
    pub average_property_size: String,
    pub price_change: String,
    pub activity: ActivityLevel,
    pub activity_description: &'static str,
    pub area_volume: AreaVolume,
    pub area_volume_description: &'static str,
    pub property_size: PropertySize,
    pub property_size_description: &'static str,
    pub trend: TrendLabel,
    pub trend_description: &'static str,
}

impl SummaryCards {
    pub fn build(summary: &MarketSummary, timeframe: Timeframe) -> Self {
        let activity = ActivityLevel::from_transactions(summary.total_transactions);
        let area_volume = AreaVolume::from_area(summary.total_area_sold);
        let property_size = PropertySize::from_average(summary.average_property_size);
        let trend = TrendLabel::from_change(summary.price_change);
        Self {
            period: timeframe.period_name(),
            total_transactions: format_indian_number(summary.total_transactions as f64),
            total_value: format_currency_scale(summary.total_value),
            avg_price_per_unit: format_currency_scale(summary.avg_price_per_unit),
            avg_price_per_transaction: summary.avg_price_per_transaction.map(format_currency_scale),
            total_area_sold: format_area(summary.total_area_sold),
            average_property_size: format_area(summary.average_property_size),
            price_change: format_percent(summary.price_change),
            activity,
            activity_description: activity.description(),
            area_volume,
            area_volume_description: area_volume.description(),
            property_size,
            property_size_description: property_size.description(),
            trend,
            trend_description: trend.description(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
    pub transactions: u64,
    /// Flat overlay line at the floored series mean
    pub reference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChart {
    pub points: Vec<TrendPoint>,
    pub reference_average: f64,
    pub latest_change: Option<f64>,
    pub latest_change_label: String,
}

impl TrendChart {
    pub fn build(series: &[TimeSeriesPoint]) -> Self {
        let reference = reference_average(series);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let change = latest_change(&values);
        Self {
            points: series
                .iter()
                .map(|p| TrendPoint {
                    label: display_date(p.date),
                    value: p.value,
                    transactions: p.transactions,
                    reference,
                })
                .collect(),
            reference_average: reference,
            latest_change: change,
            latest_change_label: format_percent(change),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub id: String,
    pub region: String,
    pub village: String,
    pub value: String,
    pub price_per_unit: String,
    pub extent: String,
    pub registered_on: Option<String>,
}

impl TransactionRow {
    pub fn build(tx: &TopTransaction) -> Self {
        Self {
            id: tx.id.clone(),
            region: tx.region.clone(),
            village: tx.village.clone(),
            value: format_currency_scale(tx.consideration_value),
            price_per_unit: format_currency_scale(tx.price_per_unit),
            extent: format!("{} {}", format_indian_number(tx.extent), tx.unit_of_extent)
                .trim_end()
                .to_string(),
            registered_on: tx.registered_on.map(display_date),
        }
    }

    pub fn build_all(transactions: &[TopTransaction]) -> Vec<Self> {
        transactions.iter().map(Self::build).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBadge {
    pub code: String,
    pub name: String,
    pub price: String,
    pub transactions: u64,
    pub available: bool,
    pub above_average: bool,
    /// `None` for regions without data
    pub tier: Option<BadgeTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBoard {
    pub badges: Vec<RegionBadge>,
    pub average: String,
    pub failed: usize,
}

impl RegionBoard {
    /// Tiers are positioned within the min/max of the available prices. When
    /// all available prices are equal every badge gets the lowest tier.
    pub fn build(list: &RegionPriceList) -> Self {
        let bounds = value_bounds(
            list.entries
                .iter()
                .filter(|e| e.available)
                .map(|e| e.avg_price_per_unit),
        );
        let badges = list
            .entries
            .iter()
            .map(|entry| RegionBadge {
                code: entry.code.clone(),
                name: entry.name.clone(),
                price: format_currency_scale(entry.avg_price_per_unit),
                transactions: entry.transaction_count,
                available: entry.available,
                above_average: entry.above_average,
                tier: match bounds {
                    // No spread to position against: every badge takes the base style
                    Some((min, max)) if entry.available && min == max => Some(BadgeTier::Lowest),
                    Some((min, max)) if entry.available => Some(bucket_badge_tier(
                        normalized_position(entry.avg_price_per_unit, min, max),
                    )),
                    _ => None,
                },
            })
            .collect();
        Self {
            badges,
            average: format_currency_scale(list.average),
            failed: list.failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDigest {
    pub costliest: String,
    pub most_affordable: String,
    pub most_active: String,
    pub total_transactions: String,
    pub largest_area: String,
    pub market_record: Option<MarketRecord>,
}

impl DailyDigest {
    pub fn build(daily: &DailyIntelligence) -> Self {
        Self {
            costliest: format!(
                "{}: {}/sq yd ({})",
                daily.costliest.region,
                format_indian_number(daily.costliest.price_per_unit),
                format_currency_scale(daily.costliest.total_price)
            ),
            most_affordable: format!(
                "{}: {}/sq yd ({})",
                daily.most_affordable.region,
                format_indian_number(daily.most_affordable.price_per_unit),
                format_currency_scale(daily.most_affordable.total_price)
            ),
            most_active: format!(
                "{}: {} transactions",
                daily.most_active.region, daily.most_active.transaction_count
            ),
            total_transactions: format_indian_number(daily.total_transactions as f64),
            largest_area: format!(
                "{}: {}",
                daily.largest_area.region,
                format_area(daily.largest_area.area)
            ),
            market_record: daily.market_record.clone(),
        }
    }
}
