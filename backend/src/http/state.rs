//! Application state for the HTTP server.

use crate::services::PredictionService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Prediction orchestration over the configured forecasting source
    pub predictions: PredictionService,
    /// Forecasting source base URL, reported by the health check
    pub upstream_base_url: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(predictions: PredictionService, upstream_base_url: impl Into<String>) -> Self {
        Self {
            predictions,
            upstream_base_url: upstream_base_url.into(),
        }
    }
}
