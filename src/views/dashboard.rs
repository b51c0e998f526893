//! Dashboard orchestrator: fans a filter snapshot out to every panel

use super::panels::{DailyDigest, RegionBoard, SummaryCards, TransactionRow, TrendChart};
use super::{FetchState, PanelData, ViewPanel};
use crate::catalog::SRO_OFFICES;
use crate::models::catalog::SroOffice;
use crate::models::filter::Timeframe;
use crate::models::market::{
    DailyIntelligence, DataSource, FailureKind, MarketSummary, RegionPriceList, Snapshot,
    TimeSeriesPoint, TopTransaction,
};
use crate::services::market_data::{MarketDataGateway, MarketQuery};
use crate::store::FilterSnapshot;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const DEFAULT_TICKER_LIMIT: usize = 20;

struct Panels {
    timeframe: Timeframe,
    summary: ViewPanel<MarketSummary>,
    trend: ViewPanel<Vec<TimeSeriesPoint>>,
    top: ViewPanel<Vec<TopTransaction>>,
    regions: ViewPanel<RegionPriceList>,
    ticker: ViewPanel<Vec<TopTransaction>>,
    daily: ViewPanel<DailyIntelligence>,
}

pub struct Dashboard {
    gateway: Arc<dyn MarketDataGateway>,
    offices: Vec<SroOffice>,
    ticker_limit: usize,
    panels: Mutex<Panels>,
}

impl Dashboard {
    /// Dashboard covering every known sub-registrar office
    pub fn new(gateway: Arc<dyn MarketDataGateway>) -> Self {
        Self::with_offices(gateway, SRO_OFFICES.to_vec())
    }

    pub fn with_offices(gateway: Arc<dyn MarketDataGateway>, offices: Vec<SroOffice>) -> Self {
        Self {
            gateway,
            offices,
            ticker_limit: DEFAULT_TICKER_LIMIT,
            panels: Mutex::new(Panels {
                timeframe: Timeframe::Days30,
                summary: ViewPanel::new("summary"),
                trend: ViewPanel::new("trend"),
                top: ViewPanel::new("top_transactions"),
                regions: ViewPanel::new("region_prices"),
                ticker: ViewPanel::new("ticker"),
                daily: ViewPanel::new("daily"),
            }),
        }
    }

    pub fn with_ticker_limit(mut self, limit: usize) -> Self {
        self.ticker_limit = limit;
        self
    }

    /// Reload the filter-dependent panels for `snapshot`.
    ///
    /// Returns how many panels accepted their response. A newer refresh that
    /// began while this one was in flight causes these responses to be dropped,
    /// and a snapshot older than the panels' current revision fetches nothing.
    pub async fn refresh(&self, snapshot: &FilterSnapshot) -> usize {
        let query = MarketQuery::from_snapshot(snapshot);
        let [summary_started, trend_started, top_started, regions_started] = {
            let mut panels = self.panels.lock().await;
            let started = [
                panels.summary.begin(query.revision),
                panels.trend.begin(query.revision),
                panels.top.begin(query.revision),
                panels.regions.begin(query.revision),
            ];
            if !started.contains(&true) {
                debug!(revision = query.revision, "Skipped refresh for superseded revision");
                return 0;
            }
            panels.timeframe = snapshot.timeframe;
            started
        };
        debug!(revision = query.revision, regions = query.region_codes.len(), "Refreshing dashboard panels");

        let (summary, trend, top, regions) = tokio::join!(
            fetch_if(summary_started, self.gateway.market_summary(&query)),
            fetch_if(trend_started, self.gateway.time_series(&query)),
            fetch_if(top_started, self.gateway.top_transactions(&query)),
            fetch_if(regions_started, self.gateway.region_prices(&query, &self.offices)),
        );

        let mut panels = self.panels.lock().await;
        let applied = [
            settle(&mut panels.summary, summary),
            settle(&mut panels.trend, trend),
            settle(&mut panels.top, top),
            settle(&mut panels.regions, regions),
        ]
        .into_iter()
        .filter(|applied| *applied)
        .count();
        info!(revision = query.revision, applied, "Dashboard refresh settled");
        applied
    }

    /// Reload the filter-independent ticker and daily digest
    pub async fn refresh_digest(&self) {
        {
            let mut panels = self.panels.lock().await;
            // Filter-independent panels always load revision 0
            panels.ticker.begin(0);
            panels.daily.begin(0);
        }
        let (ticker, daily) = tokio::join!(
            self.gateway.recent_transactions(self.ticker_limit),
            self.gateway.daily_intelligence(),
        );
        let mut panels = self.panels.lock().await;
        panels.ticker.resolve(ticker);
        panels.daily.resolve(daily);
    }

    pub async fn view(&self) -> DashboardView {
        let panels = self.panels.lock().await;
        let timeframe = panels.timeframe;
        DashboardView {
            summary: PanelView::present(&panels.summary, |s| SummaryCards::build(s, timeframe)),
            trend: PanelView::present(&panels.trend, |s| TrendChart::build(s)),
            top_transactions: PanelView::present(&panels.top, |t| TransactionRow::build_all(t)),
            region_prices: PanelView::present(&panels.regions, RegionBoard::build),
            ticker: PanelView::present(&panels.ticker, |t| TransactionRow::build_all(t)),
            daily: PanelView::present(&panels.daily, DailyDigest::build),
        }
    }

    pub async fn summary_state(&self) -> FetchState<MarketSummary> {
        self.panels.lock().await.summary.state().clone()
    }

    pub async fn region_state(&self) -> FetchState<RegionPriceList> {
        self.panels.lock().await.regions.state().clone()
    }
}

async fn fetch_if<T>(started: bool, fetch: impl Future<Output = T>) -> Option<T> {
    if started {
        Some(fetch.await)
    } else {
        None
    }
}

fn settle<T: PanelData>(panel: &mut ViewPanel<T>, response: Option<Snapshot<T>>) -> bool {
    response.is_some_and(|snapshot| panel.resolve(snapshot))
}

/// Rendered panel: lifecycle status, demo marker and presentation payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView<V> {
    pub status: &'static str,
    pub revision: Option<u64>,
    pub demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FailureKind>,
    pub data: Option<V>,
}

impl<V> PanelView<V> {
    pub fn present<T: PanelData>(panel: &ViewPanel<T>, build: impl FnOnce(&T) -> V) -> Self {
        let state = panel.state();
        let fallback_reason = match state {
            FetchState::Fallback(snapshot) => match snapshot.source {
                DataSource::Fallback { reason } => Some(reason),
                DataSource::Live => None,
            },
            _ => None,
        };
        Self {
            status: state.status(),
            revision: state.revision(),
            demo: fallback_reason.is_some(),
            fallback_reason,
            data: state.data().map(build),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: PanelView<SummaryCards>,
    pub trend: PanelView<TrendChart>,
    pub top_transactions: PanelView<Vec<TransactionRow>>,
    pub region_prices: PanelView<RegionBoard>,
    pub ticker: PanelView<Vec<TransactionRow>>,
    pub daily: PanelView<DailyDigest>,
}
