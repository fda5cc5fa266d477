//! Zoom-adaptive aggregation radius for density layers.
//!
//! Pure functions, called by the rendering side whenever the zoom level or
//! the station weights change.

use serde::Serialize;

use crate::models::{City, HeatmapWeightPoint, StationReading};

pub const MIN_RADIUS_PX: u32 = 10;
pub const MAX_RADIUS_PX: u32 = 80;

/// Which density layer is being drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapLayer {
    #[default]
    Stations,
    Cities,
}

impl HeatmapLayer {
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "stations" => Some(HeatmapLayer::Stations),
            "cities" => Some(HeatmapLayer::Cities),
            _ => None,
        }
    }

    /// Intensity that saturates the colour ramp.
    pub fn max_intensity(self) -> f64 {
        match self {
            HeatmapLayer::Stations => 100.0,
            HeatmapLayer::Cities => 50.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusPolicyResult {
    pub radius_pixels: u32,
    pub max_intensity: f64,
}

/// `clamp(10, 80, 100 - 4 * zoom)`: closer zoom gives a smaller radius.
pub fn radius_for(zoom: i32) -> u32 {
    (100 - 4 * zoom as i64).clamp(MIN_RADIUS_PX as i64, MAX_RADIUS_PX as i64) as u32
}

/// Radius and intensity ceiling for a layer. An explicit radius wins over
/// the zoom policy but is still kept inside the allowed range.
pub fn policy(zoom: i32, layer: HeatmapLayer, radius_override: Option<u32>) -> RadiusPolicyResult {
    let radius_pixels = match radius_override {
        Some(r) => r.clamp(MIN_RADIUS_PX, MAX_RADIUS_PX),
        None => radius_for(zoom),
    };
    RadiusPolicyResult {
        radius_pixels,
        max_intensity: layer.max_intensity(),
    }
}

/// Explicit weight, else the latest observed value, else 0. Never negative.
pub fn weight_for(explicit: Option<f64>, latest: Option<f64>) -> f64 {
    explicit
        .filter(|w| w.is_finite())
        .or(latest.filter(|w| w.is_finite()))
        .map(|w| w.max(0.0))
        .unwrap_or(0.0)
}

pub fn station_points(stations: &[StationReading]) -> Vec<HeatmapWeightPoint> {
    stations
        .iter()
        .map(|s| HeatmapWeightPoint {
            latitude: s.station.lat,
            longitude: s.station.lng,
            weight: weight_for(None, s.latest_value()),
        })
        .collect()
}

/// Weight each city by its latest value, where one exists.
pub fn city_points<F>(cities: &[&City], mut latest: F) -> Vec<HeatmapWeightPoint>
where
    F: FnMut(&City) -> Option<f64>,
{
    cities
        .iter()
        .map(|c| HeatmapWeightPoint {
            latitude: c.lat,
            longitude: c.lng,
            weight: weight_for(None, latest(c)),
        })
        .collect()
}
