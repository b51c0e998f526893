//! Unit tests for the dashboard orchestrator

use async_trait::async_trait;
use chrono::NaiveDate;
use marketpulse::models::catalog::SroOffice;
use marketpulse::models::market::{
    DailyIntelligence, MarketSummary, RegionPriceList, Snapshot, TimeSeriesPoint, TopTransaction,
};
use marketpulse::services::fallback;
use marketpulse::services::market_data::{MarketDataGateway, MarketQuery, OfflineGateway};
use marketpulse::store::{FilterStore, FixedClock};
use marketpulse::views::{Dashboard, FetchState};
use std::sync::Arc;
use std::time::Duration;

/// Live gateway whose responses for revision 1 arrive late
struct SlowFirstRevision;

impl SlowFirstRevision {
    async fn delay(revision: u64) {
        if revision == 1 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}

#[async_trait]
impl MarketDataGateway for SlowFirstRevision {
    async fn market_summary(&self, query: &MarketQuery) -> Snapshot<MarketSummary> {
        Self::delay(query.revision).await;
        let summary = MarketSummary {
            total_transactions: query.revision * 100,
            ..Default::default()
        };
        Snapshot::live(summary, query.revision)
    }

    async fn time_series(&self, query: &MarketQuery) -> Snapshot<Vec<TimeSeriesPoint>> {
        Self::delay(query.revision).await;
        Snapshot::live(Vec::new(), query.revision)
    }

    async fn top_transactions(&self, query: &MarketQuery) -> Snapshot<Vec<TopTransaction>> {
        Self::delay(query.revision).await;
        Snapshot::live(fallback::placeholder_transactions(2), query.revision)
    }

    async fn region_prices(
        &self,
        query: &MarketQuery,
        offices: &[SroOffice],
    ) -> Snapshot<RegionPriceList> {
        Self::delay(query.revision).await;
        Snapshot::live(fallback::zeroed_region_prices(offices), query.revision)
    }

    async fn recent_transactions(&self, limit: usize) -> Snapshot<Vec<TopTransaction>> {
        Snapshot::live(fallback::placeholder_transactions(limit), 0)
    }

    async fn daily_intelligence(&self) -> Snapshot<DailyIntelligence> {
        Snapshot::live(fallback::placeholder_daily(), 0)
    }
}

fn store() -> FilterStore {
    FilterStore::new(Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
    )))
}

#[tokio::test]
async fn stale_refresh_is_discarded() {
    let mut store = store();
    let first = store.toggle_zone("central");
    let second = store.toggle_zone("west");

    let dashboard = Dashboard::new(Arc::new(SlowFirstRevision));
    let (applied_first, applied_second) =
        tokio::join!(dashboard.refresh(&first), dashboard.refresh(&second));

    assert_eq!(applied_first, 0);
    assert_eq!(applied_second, 4);
    match dashboard.summary_state().await {
        FetchState::Success(snapshot) => {
            assert_eq!(snapshot.revision, 2);
            assert_eq!(snapshot.data.total_transactions, 200);
        }
        other => panic!("unexpected summary state: {:?}", other),
    }
}

#[tokio::test]
async fn older_snapshot_refreshed_after_newer_is_skipped() {
    let mut store = store();
    let older = store.toggle_zone("central");
    let newer = store.toggle_zone("west");

    let dashboard = Dashboard::new(Arc::new(SlowFirstRevision));
    assert_eq!(dashboard.refresh(&newer).await, 4);
    assert_eq!(dashboard.refresh(&older).await, 0);

    let state = dashboard.summary_state().await;
    assert_eq!(state.revision(), Some(newer.revision));
    assert_eq!(state.data().map(|s| s.total_transactions), Some(200));
    assert_eq!(dashboard.region_state().await.revision(), Some(newer.revision));
}

#[tokio::test]
async fn empty_live_panels_render_no_data() {
    let store = store();
    let dashboard = Dashboard::with_offices(Arc::new(SlowFirstRevision), Vec::new());
    assert_eq!(dashboard.refresh(&store.get_state()).await, 4);
    let view = dashboard.view().await;

    assert_eq!(view.trend.status, "no_data");
    assert_eq!(view.region_prices.status, "no_data");
    assert_eq!(view.top_transactions.status, "success");
    assert!(!view.top_transactions.demo);
}

#[tokio::test]
async fn offline_dashboard_flags_demo_data() {
    let store = store();
    let dashboard = Dashboard::new(Arc::new(OfflineGateway)).with_ticker_limit(5);

    dashboard.refresh(&store.get_state()).await;
    dashboard.refresh_digest().await;
    let view = dashboard.view().await;

    assert_eq!(view.summary.status, "fallback");
    assert!(view.summary.demo);
    assert_eq!(view.region_prices.data.as_ref().map(|b| b.badges.len()), Some(29));
    assert_eq!(view.ticker.data.as_ref().map(Vec::len), Some(5));
    assert!(view.daily.demo);
}

#[tokio::test]
async fn idle_dashboard_has_no_panels_loaded() {
    let dashboard = Dashboard::new(Arc::new(OfflineGateway));
    let view = dashboard.view().await;
    assert_eq!(view.summary.status, "idle");
    assert!(view.summary.data.is_none());
    assert!(matches!(dashboard.region_state().await, FetchState::Idle));
}
