//! Environment-driven configuration

use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://marketpulse-production.up.railway.app";

/// Deployment environment name (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Base URL of the remote analytics API
pub fn get_api_base_url() -> String {
    env::var("MARKETPULSE_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub fn get_port() -> u16 {
    parse_env("PORT", 8080)
}

/// Floor for `MARKETPULSE_TIMEOUT_SECS`; zero would fail every call
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Knobs for the remote data gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    /// Bounded wait for a single HTTP attempt
    pub request_timeout: Duration,
    /// Additional attempts after the first one
    pub max_retries: usize,
    /// First backoff delay; doubles on each retry
    pub retry_base_delay: Duration,
    /// Concurrent requests during the per-region fan-out
    pub fanout_concurrency: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
            fanout_concurrency: 8,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: get_api_base_url(),
            request_timeout: Duration::from_secs(
                parse_env("MARKETPULSE_TIMEOUT_SECS", defaults.request_timeout.as_secs())
                    .max(MIN_TIMEOUT_SECS),
            ),
            max_retries: parse_env("MARKETPULSE_MAX_RETRIES", defaults.max_retries),
            retry_base_delay: Duration::from_millis(parse_env(
                "MARKETPULSE_RETRY_BASE_MS",
                defaults.retry_base_delay.as_millis() as u64,
            )),
            fanout_concurrency: parse_env(
                "MARKETPULSE_FANOUT_CONCURRENCY",
                defaults.fanout_concurrency,
            )
            .max(1),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: usize, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_base_delay = base_delay;
        self
    }
}

fn parse_env<T: std::str::FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key = key, value = %raw, default = %default, "Invalid config value, using default");
                default
            }
        },
        Err(_) => default,
    }
}
