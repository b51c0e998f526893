//! HTTP client for the analytics API: bounded waits and retried GETs

use crate::config::GatewayConfig;
use crate::metrics::Metrics;
use crate::services::error::GatewayError;
use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    max_retries: usize,
    retry_base_delay: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl ApiClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(GatewayError::from_reqwest)?;
        Self::with_client(config, http)
    }

    /// Use a caller-provided `reqwest::Client`; the configured timeout is still
    /// applied to every request.
    pub fn with_client(config: &GatewayConfig, http: reqwest::Client) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        Ok(Self {
            http,
            base_url,
            timeout: config.request_timeout,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Option<Arc<Metrics>>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON body, retrying retryable failures with
    /// exponential backoff (base delay doubling each attempt).
    pub async fn get_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.url_for(path, query);
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_base_delay)
            .with_max_delay(self.retry_base_delay.saturating_mul(8))
            .with_factor(2.0)
            .with_max_times(self.max_retries);

        let fetch = || self.fetch_once::<T>(url.clone());
        fetch
            .retry(backoff)
            .when(GatewayError::is_retryable)
            .notify(|err: &GatewayError, delay: Duration| {
                debug!(
                    endpoint,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying analytics API request"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_retry(endpoint);
                }
            })
            .await
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(GatewayError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(GatewayError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    fn url_for(&self, path: &str, query: &[(&'static str, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }
}
