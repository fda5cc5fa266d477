//! Canonical prediction output.
//!
//! These types are the stable contract handed to the UI: the live path and the
//! simulated fallback populate exactly the same fields.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pollutant::{Metric, PollutantSnapshot};
use crate::aqi::AqiCategory;

/// Provenance of a single prediction point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Nominal,
    Simulated,
}

/// Provenance of a whole response.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    Live,
    SimulatedFallback,
}

/// One forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub timestamp: DateTime<Utc>,
    /// Horizon label as reported, e.g. `"12h"`
    pub horizon: String,
    pub horizon_hours: u32,
    pub value: f64,
    pub quality: Quality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    /// Category label reported by the forecasting source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Model confidence in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollutant_breakdown: Option<PollutantSnapshot>,
}

/// Prediction series for a location, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub location_name: String,
    #[serde(rename = "currentAQI")]
    pub current_aqi: u16,
    /// Standard 6-tier category of `current_aqi`
    pub current_category: AqiCategory,
    pub current_metric_value: f64,
    /// `"AQI"` or the pollutant code the series expresses
    pub current_metric_pollutant: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_pollutant_snapshot: Option<PollutantSnapshot>,
    pub data_source: DataSource,
    /// Source label reported by the forecasting service (e.g. `"OpenAQ"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisories: Option<String>,
    pub points: Vec<PredictionPoint>,
}
