//! Data Transfer Objects for the HTTP API.
//!
//! Query strings use the camelCase names the web client sends; response
//! bodies are camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::models::{HeatmapWeightPoint, HistoricalSample, PredictionResponse, StationReading};
use crate::services::heatmap::{HeatmapLayer, RadiusPolicyResult};

/// City used when a request names none.
pub const DEFAULT_CITY: &str = "los-angeles";

/// Zoom assumed when the heatmap request names none.
pub const DEFAULT_ZOOM: i32 = 10;

/// Query parameters for the prediction endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictQuery {
    #[serde(default)]
    pub city: Option<String>,
    /// `pm25|pm10|o3|no2|so2|co|aqi`, default `pm25`
    #[serde(default)]
    pub metric: Option<String>,
}

/// Query parameters for the stations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationsQuery {
    #[serde(default)]
    pub city: Option<String>,
    /// `1` or `true` attaches a latest reading to each station
    #[serde(default, rename = "includeLatest", alias = "withData")]
    pub include_latest: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
}

/// Query parameters for the cities endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitiesQuery {
    /// Region (US state) code
    #[serde(default)]
    pub state: Option<String>,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub city: Option<String>,
    /// Number of samples (default: 4)
    #[serde(default)]
    pub points: Option<usize>,
    /// Hours between samples (default: 3)
    #[serde(default)]
    pub step: Option<u32>,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zoom: Option<i32>,
    #[serde(default)]
    pub metric: Option<String>,
    /// `stations` (default) or `cities`
    #[serde(default)]
    pub layer: Option<String>,
    /// Explicit radius in pixels; overrides the zoom policy
    #[serde(default)]
    pub radius: Option<u32>,
}

/// Interpret a query flag such as `includeLatest=1`.
pub fn flag_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

/// Prediction response as served to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionEnvelope {
    pub city: String,
    /// Metric selector the series was built for
    pub metric: &'static str,
    #[serde(flatten)]
    pub prediction: PredictionResponse,
    /// Why simulated data is being served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Stations for a city.
#[derive(Debug, Clone, Serialize)]
pub struct StationsResponse {
    pub city: String,
    pub stations: Vec<StationReading>,
}

/// Synthetic history for a city.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub city: String,
    pub series: Vec<HistoricalSample>,
}

/// Density layer ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapResponse {
    pub city: String,
    pub layer: HeatmapLayer,
    pub zoom: i32,
    #[serde(flatten)]
    pub policy: RadiusPolicyResult,
    pub points: Vec<HeatmapWeightPoint>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Forecasting source base URL
    pub upstream: String,
}
