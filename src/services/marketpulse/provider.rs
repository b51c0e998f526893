//! Analytics API gateway: live data when the API answers, fallback otherwise

use super::client::ApiClient;
use super::params::{
    market_params, recent_params, region_params, DAILY_INTELLIGENCE_PATH,
    RECENT_TRANSACTIONS_PATH, SUMMARY_PATH, TIME_SERIES_PATH, TOP_TRANSACTIONS_PATH,
};
use super::responses::{DailyResponse, SummaryResponse, TimeSeriesResponse, TransactionsResponse};
use crate::analytics::regional::classify_against_average;
use crate::config::GatewayConfig;
use crate::metrics::Metrics;
use crate::models::catalog::SroOffice;
use crate::models::market::{
    DailyIntelligence, MarketSummary, RegionPrice, RegionPriceList, Snapshot, TimeSeriesPoint,
    TopTransaction,
};
use crate::services::error::GatewayError;
use crate::services::fallback;
use crate::services::market_data::{MarketDataGateway, MarketQuery};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct MarketPulseGateway {
    client: ApiClient,
    fanout_concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl MarketPulseGateway {
    pub fn new(config: GatewayConfig, metrics: Option<Arc<Metrics>>) -> Result<Self, GatewayError> {
        let client = ApiClient::new(&config)?.with_metrics(metrics.clone());
        Ok(Self::from_parts(client, &config, metrics))
    }

    pub fn with_client(
        config: GatewayConfig,
        http: reqwest::Client,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<Self, GatewayError> {
        let client = ApiClient::with_client(&config, http)?.with_metrics(metrics.clone());
        Ok(Self::from_parts(client, &config, metrics))
    }

    fn from_parts(client: ApiClient, config: &GatewayConfig, metrics: Option<Arc<Metrics>>) -> Self {
        Self {
            client,
            fanout_concurrency: config.fanout_concurrency.max(1),
            metrics,
        }
    }

    /// Turn a call result into a snapshot, substituting `fallback` on failure
    fn settle<T>(
        &self,
        endpoint: &'static str,
        revision: u64,
        result: Result<T, GatewayError>,
        is_empty: impl FnOnce(&T) -> bool,
        fallback: impl FnOnce() -> T,
    ) -> Snapshot<T> {
        match result {
            Ok(data) => {
                let outcome = if is_empty(&data) { "empty" } else { "live" };
                self.record(endpoint, outcome);
                debug!(endpoint, revision, outcome, "Analytics API call settled");
                Snapshot::live(data, revision)
            }
            Err(err) => {
                self.record(endpoint, "fallback");
                warn!(endpoint, revision, error = %err, "Analytics API unavailable, serving fallback data");
                Snapshot::fallback(fallback(), err.kind(), revision)
            }
        }
    }

    fn record(&self, endpoint: &str, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_gateway_outcome(endpoint, outcome);
        }
    }

    async fn fetch_summary(
        &self,
        endpoint: &'static str,
        params: &[(&'static str, String)],
    ) -> Result<MarketSummary, GatewayError> {
        self.client
            .get_json::<SummaryResponse>(endpoint, SUMMARY_PATH, params)
            .await?
            .normalize()
    }

    async fn fetch_region(
        &self,
        query: &MarketQuery,
        office: SroOffice,
    ) -> (SroOffice, Result<MarketSummary, GatewayError>) {
        let params = region_params(query, office.code);
        let result = self.fetch_summary("region_summary", &params).await;
        if let Err(err) = &result {
            warn!(code = office.code, name = office.name, error = %err, "Region price fetch failed");
        }
        (office, result)
    }
}

#[async_trait::async_trait]
impl MarketDataGateway for MarketPulseGateway {
    async fn market_summary(&self, query: &MarketQuery) -> Snapshot<MarketSummary> {
        let result = self.fetch_summary("summary", &market_params(query)).await;
        self.settle("summary", query.revision, result, MarketSummary::is_empty, fallback::zeroed_summary)
    }

    async fn time_series(&self, query: &MarketQuery) -> Snapshot<Vec<TimeSeriesPoint>> {
        let result = match self
            .client
            .get_json::<TimeSeriesResponse>("time_series", TIME_SERIES_PATH, &market_params(query))
            .await
        {
            Ok(response) => response.normalize(),
            Err(err) => Err(err),
        };
        self.settle("time_series", query.revision, result, Vec::is_empty, Vec::new)
    }

    async fn top_transactions(&self, query: &MarketQuery) -> Snapshot<Vec<TopTransaction>> {
        let result = match self
            .client
            .get_json::<TransactionsResponse>(
                "top_transactions",
                TOP_TRANSACTIONS_PATH,
                &market_params(query),
            )
            .await
        {
            Ok(response) => response.normalize(),
            Err(err) => Err(err),
        };
        self.settle("top_transactions", query.revision, result, Vec::is_empty, Vec::new)
    }

    async fn region_prices(
        &self,
        query: &MarketQuery,
        offices: &[SroOffice],
    ) -> Snapshot<RegionPriceList> {
        // Output order follows `offices` regardless of completion order
        let requests: Vec<_> = offices
            .iter()
            .map(|office| self.fetch_region(query, *office))
            .collect();
        let results: Vec<(SroOffice, Result<MarketSummary, GatewayError>)> = stream::iter(requests)
            .buffered(self.fanout_concurrency)
            .collect()
            .await;

        let mut failed = 0;
        let mut last_error = None;
        let mut entries: Vec<RegionPrice> = results
            .into_iter()
            .map(|(office, result)| {
                let summary = match result {
                    Ok(summary) => summary,
                    Err(err) => {
                        failed += 1;
                        last_error = Some(err);
                        MarketSummary::default()
                    }
                };
                RegionPrice {
                    code: office.code.to_string(),
                    name: office.name.to_string(),
                    avg_price_per_unit: summary.avg_price_per_unit,
                    transaction_count: summary.total_transactions,
                    available: !summary.is_empty(),
                    above_average: false,
                }
            })
            .collect();
        let average = classify_against_average(&mut entries);
        let list = RegionPriceList {
            entries,
            average,
            failed,
        };

        match last_error {
            Some(err) if failed == offices.len() => {
                self.record("region_prices", "fallback");
                warn!(offices = offices.len(), error = %err, "Every region fetch failed, serving fallback data");
                Snapshot::fallback(list, err.kind(), query.revision)
            }
            _ => {
                let outcome = if list.entries.iter().any(|e| e.available) { "live" } else { "empty" };
                self.record("region_prices", outcome);
                debug!(offices = offices.len(), failed, average, "Region prices merged");
                Snapshot::live(list, query.revision)
            }
        }
    }

    async fn recent_transactions(&self, limit: usize) -> Snapshot<Vec<TopTransaction>> {
        let result = match self
            .client
            .get_json::<TransactionsResponse>(
                "recent_transactions",
                RECENT_TRANSACTIONS_PATH,
                &recent_params(limit),
            )
            .await
        {
            Ok(response) => response.normalize().map(|mut txs| {
                txs.truncate(limit);
                txs
            }),
            Err(err) => Err(err),
        };
        self.settle("recent_transactions", 0, result, Vec::is_empty, || {
            fallback::placeholder_transactions(limit)
        })
    }

    async fn daily_intelligence(&self) -> Snapshot<DailyIntelligence> {
        let result = match self
            .client
            .get_json::<DailyResponse>("daily_intelligence", DAILY_INTELLIGENCE_PATH, &[])
            .await
        {
            Ok(response) => response.normalize(),
            Err(err) => Err(err),
        };
        self.settle("daily_intelligence", 0, result, |_| false, fallback::placeholder_daily)
    }
}
