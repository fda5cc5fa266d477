//! Locations, stations and heatmap inputs.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A city the service knows how to forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub slug: &'static str,
    /// Region (US state) code
    pub state: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// A monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// Most recent reading attached to a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub metric: &'static str,
}

/// A station, optionally annotated with its latest reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReading {
    #[serde(flatten)]
    pub station: Station,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestReading>,
}

impl StationReading {
    pub fn latest_value(&self) -> Option<f64> {
        self.latest.as_ref().map(|l| l.value)
    }
}

/// A weighted point of a density layer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct HeatmapWeightPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Non-negative; 0 when no observation exists
    pub weight: f64,
}

/// Synthetic historical sample for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSample {
    pub timestamp: DateTime<Utc>,
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    pub aqi: u16,
    /// Air temperature, °C
    pub temp: f64,
    /// Relative humidity, %
    pub rh: u8,
}

