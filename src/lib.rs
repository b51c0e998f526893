//! MarketPulse: filter state, derived metrics and remote data gateway for the
//! real-estate market analytics dashboard.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod store;
pub mod views;
