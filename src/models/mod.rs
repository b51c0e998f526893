//! Shared data models spanning the store, gateway and view layers.

pub mod catalog;
pub mod filter;
pub mod market;

pub use catalog::{Classification, Region, SroOffice, Zone};
pub use filter::{
    AdvancedFilterKind, AdvancedFilters, AdvancedFiltersPatch, DateRange, FilterState,
    RangeFilter, RegionId, SortBy, SortOrder, Timeframe, ZoneId, AREA_RANGE_LIMITS,
    PRICE_RANGE_LIMITS,
};
pub use market::{
    ActivityRecord, AreaRecord, DailyIntelligence, DataSource, FailureKind, MarketRecord,
    MarketSummary, PriceRecord, RegionPrice, RegionPriceList, Snapshot, TimeSeriesPoint,
    TopTransaction,
};
