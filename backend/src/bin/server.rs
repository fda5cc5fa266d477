//! AQI Forecast HTTP Server Binary
//!
//! Main entry point for the forecast REST API server. Loads configuration,
//! builds the forecasting client, sets up the HTTP router and starts serving.
//!
//! # Usage
//!
//! ```bash
//! AQI_API_URL=http://localhost:8000 cargo run --bin aqi-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `AQI_API_URL`: Forecasting service base URL (default: http://localhost:8000)
//! - `UPSTREAM_TIMEOUT_SECS`: Forecasting request timeout (default: 10)
//! - `DEFAULT_LOCATION`: Location forwarded for unknown cities (default: los-angeles)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aqi_forecast::config::ServiceConfig;
use aqi_forecast::http::{create_router, AppState};
use aqi_forecast::services::PredictionService;
use aqi_forecast::upstream::HttpForecastSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting AQI forecast server");

    let config = ServiceConfig::load()?;
    let source = HttpForecastSource::from_settings(&config.upstream)?;
    info!(
        "Forecasting source: {} (timeout {}s)",
        source.base_url(),
        config.upstream.timeout_secs
    );

    let predictions = PredictionService::new(Arc::new(source), config.upstream.default_location.clone());
    let state = AppState::new(predictions, config.upstream.base_url.clone());

    let app = create_router(state);

    let addr = config.bind_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
