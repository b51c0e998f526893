//! Client for the MarketPulse analytics API

pub mod client;
pub mod params;
pub mod provider;
pub mod responses;

pub use client::ApiClient;
pub use provider::MarketPulseGateway;
