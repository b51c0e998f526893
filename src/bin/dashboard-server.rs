//! MarketPulse dashboard server
//!
//! Serves the filter store, the zone/region catalog and the rendered
//! dashboard panels over HTTP, backed by the remote analytics API.

use dotenvy::dotenv;
use marketpulse::config;
use marketpulse::core::http::start_server;
use marketpulse::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = config::get_port();
    let env = config::get_environment();
    info!("Starting MarketPulse dashboard server");
    info!(environment = %env, "Environment");
    info!(api_url = %config::get_api_base_url(), "Analytics API");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
