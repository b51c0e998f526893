//! Gateway interface consumed by the view layer

use crate::catalog;
use crate::models::catalog::SroOffice;
use crate::models::filter::DateRange;
use crate::models::market::{
    DailyIntelligence, FailureKind, MarketSummary, RegionPriceList, Snapshot, TimeSeriesPoint,
    TopTransaction,
};
use crate::services::fallback;
use crate::store::FilterSnapshot;

/// Subset of the filter state a market request depends on, captured when the
/// fetch is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuery {
    pub revision: u64,
    pub range: DateRange,
    /// API region codes; empty means no region filter
    pub region_codes: Vec<String>,
}

impl MarketQuery {
    pub fn from_snapshot(snapshot: &FilterSnapshot) -> Self {
        Self {
            revision: snapshot.revision,
            range: snapshot.date_range(),
            region_codes: snapshot
                .selected_regions
                .iter()
                .map(|id| catalog::api_region_code(id).to_string())
                .collect(),
        }
    }
}

/// One operation per view concern. Implementations never fail outright:
/// failures come back as fallback snapshots.
#[async_trait::async_trait]
pub trait MarketDataGateway: Send + Sync {
    async fn market_summary(&self, query: &MarketQuery) -> Snapshot<MarketSummary>;

    async fn time_series(&self, query: &MarketQuery) -> Snapshot<Vec<TimeSeriesPoint>>;

    async fn top_transactions(&self, query: &MarketQuery) -> Snapshot<Vec<TopTransaction>>;

    /// One request per office, merged; failed offices are kept at zero
    async fn region_prices(
        &self,
        query: &MarketQuery,
        offices: &[SroOffice],
    ) -> Snapshot<RegionPriceList>;

    /// Latest registrations for the scrolling ticker, independent of filters
    async fn recent_transactions(&self, limit: usize) -> Snapshot<Vec<TopTransaction>>;

    /// Daily superlatives, independent of filters
    async fn daily_intelligence(&self) -> Snapshot<DailyIntelligence>;
}

/// Gateway that never touches the network and always answers with fallback data
pub struct OfflineGateway;

#[async_trait::async_trait]
impl MarketDataGateway for OfflineGateway {
    async fn market_summary(&self, query: &MarketQuery) -> Snapshot<MarketSummary> {
        Snapshot::fallback(fallback::zeroed_summary(), FailureKind::Transport, query.revision)
    }

    async fn time_series(&self, query: &MarketQuery) -> Snapshot<Vec<TimeSeriesPoint>> {
        Snapshot::fallback(Vec::new(), FailureKind::Transport, query.revision)
    }

    async fn top_transactions(&self, query: &MarketQuery) -> Snapshot<Vec<TopTransaction>> {
        Snapshot::fallback(Vec::new(), FailureKind::Transport, query.revision)
    }

    async fn region_prices(
        &self,
        query: &MarketQuery,
        offices: &[SroOffice],
    ) -> Snapshot<RegionPriceList> {
        Snapshot::fallback(
            fallback::zeroed_region_prices(offices),
            FailureKind::Transport,
            query.revision,
        )
    }

    async fn recent_transactions(&self, limit: usize) -> Snapshot<Vec<TopTransaction>> {
        Snapshot::fallback(
            fallback::placeholder_transactions(limit),
            FailureKind::Transport,
            0,
        )
    }

    async fn daily_intelligence(&self) -> Snapshot<DailyIntelligence> {
        Snapshot::fallback(fallback::placeholder_daily(), FailureKind::Transport, 0)
    }
}
