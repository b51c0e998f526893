//! Filter state held by the session store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub type ZoneId = String;
pub type RegionId = String;

pub const PRICE_RANGE_LIMITS: RangeFilter = RangeFilter {
    min: 0,
    max: 100_000_000,
};
pub const AREA_RANGE_LIMITS: RangeFilter = RangeFilter { min: 0, max: 50_000 };

/// Rolling or custom date window used to scope queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "7")]
    Days7,
    #[serde(rename = "30")]
    Days30,
    #[serde(rename = "90")]
    Days90,
    #[serde(rename = "custom")]
    Custom,
}

impl Timeframe {
    /// Length of the rolling window; `None` for custom ranges
    pub fn days(self) -> Option<i64> {
        match self {
            Timeframe::Days7 => Some(7),
            Timeframe::Days30 => Some(30),
            Timeframe::Days90 => Some(90),
            Timeframe::Custom => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Days7 => "7 days",
            Timeframe::Days30 => "30 days",
            Timeframe::Days90 => "3 months",
            Timeframe::Custom => "Custom",
        }
    }

    /// Noun used in sentences such as "Market Intelligence for week"
    pub fn period_name(self) -> &'static str {
        match self {
            Timeframe::Days7 => "week",
            Timeframe::Days30 => "month",
            Timeframe::Days90 => "quarter",
            Timeframe::Custom => "period",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days() {
            Some(days) => write!(f, "{}", days),
            None => f.write_str("custom"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe '{0}'")]
pub struct ParseTimeframeError(pub String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7" | "7days" => Ok(Timeframe::Days7),
            "30" | "30days" => Ok(Timeframe::Days30),
            "90" | "90days" => Ok(Timeframe::Days90),
            "custom" => Ok(Timeframe::Custom),
            other => Err(ParseTimeframeError(other.to_string())),
        }
    }
}

/// Inclusive date window, always `from <= to` once accepted by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

/// Inclusive numeric bounds for the advanced filter sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: u64,
    pub max: u64,
}

impl RangeFilter {
    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Price,
    Area,
    Date,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search/results filter dimension layered on top of region and date filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFilters {
    pub price_range: RangeFilter,
    pub area_range: RangeFilter,
    pub property_types: BTreeSet<String>,
    pub transaction_types: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for AdvancedFilters {
    fn default() -> Self {
        Self {
            price_range: PRICE_RANGE_LIMITS,
            area_range: AREA_RANGE_LIMITS,
            property_types: BTreeSet::new(),
            transaction_types: BTreeSet::new(),
            amenities: BTreeSet::new(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl AdvancedFilters {
    /// Number of removable filter tags this set contributes
    pub fn active_count(&self) -> usize {
        let mut count = self.property_types.len() + self.transaction_types.len() + self.amenities.len();
        if self.price_range != PRICE_RANGE_LIMITS {
            count += 1;
        }
        if self.area_range != AREA_RANGE_LIMITS {
            count += 1;
        }
        count
    }
}

/// Partial update for [`AdvancedFilters`]; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedFiltersPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_range: Option<RangeFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_types: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_types: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// One removable dimension of the advanced filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvancedFilterKind {
    PriceRange,
    AreaRange,
    PropertyTypes,
    TransactionTypes,
    Amenities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Empty means "all zones"
    pub selected_zones: BTreeSet<ZoneId>,
    pub selected_regions: BTreeSet<RegionId>,
    pub timeframe: Timeframe,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub search_query: String,
    pub advanced_filters: AdvancedFilters,
}

impl FilterState {
    /// Defaults for a fresh session anchored on `today`
    pub fn initial(today: NaiveDate, timeframe: Timeframe) -> Self {
        let days = timeframe.days().unwrap_or(30);
        Self {
            selected_zones: BTreeSet::new(),
            selected_regions: BTreeSet::new(),
            timeframe,
            date_from: today - chrono::Duration::days(days),
            date_to: today,
            search_query: String::new(),
            advanced_filters: AdvancedFilters::default(),
        }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            from: self.date_from,
            to: self.date_to,
        }
    }

    pub fn is_search_active(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Count of filter tags a user could remove one by one
    pub fn active_filter_count(&self) -> usize {
        let search = usize::from(self.is_search_active());
        self.selected_zones.len()
            + self.selected_regions.len()
            + search
            + self.advanced_filters.active_count()
    }
}
