pub mod error;
pub mod fallback;
pub mod market_data;
pub mod marketpulse;

pub use error::GatewayError;
pub use market_data::{MarketDataGateway, MarketQuery, OfflineGateway};
pub use marketpulse::MarketPulseGateway;
