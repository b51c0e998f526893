//! Prometheus metrics for the dashboard server and the remote data gateway

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    /// Labels: `endpoint`, `outcome` (`live`, `empty`, `fallback`)
    pub gateway_requests_total: IntCounterVec,
    pub gateway_retries_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let gateway_requests_total = IntCounterVec::new(
            Opts::new(
                "gateway_requests_total",
                "Remote analytics API calls by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;
        let gateway_retries_total = IntCounterVec::new(
            Opts::new("gateway_retries_total", "Retried remote analytics API calls"),
            &["endpoint"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(gateway_requests_total.clone()))?;
        registry.register(Box::new(gateway_retries_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            gateway_requests_total,
            gateway_retries_total,
        })
    }

    pub fn record_gateway_outcome(&self, endpoint: &str, outcome: &str) {
        self.gateway_requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();
    }

    pub fn record_retry(&self, endpoint: &str) {
        self.gateway_retries_total.with_label_values(&[endpoint]).inc();
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
