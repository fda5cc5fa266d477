//! Simulated prediction series used when the forecasting source fails.
//!
//! Each pollutant follows `baseline + sin(i / 2) * amplitude + U[0, 1) * jitter`
//! across the fixed horizons. Point values are then derived exactly as on the
//! live path, so a simulated response has the same shape and units as a live
//! one.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::normalizer::{resolve_current, round2};
use crate::aqi::{self, classify, classify_standard};
use crate::error::ForecastError;
use crate::models::{
    DataSource, Metric, Pollutant, PollutantSnapshot, PredictionPoint, PredictionResponse, Quality,
};

/// Horizons emitted when there is no real forecast to follow.
pub const FALLBACK_HORIZONS: [u32; 4] = [3, 6, 12, 24];

/// Aggregate AQI reported as "current" on simulated responses.
pub const FALLBACK_CURRENT_AQI: u16 = 80;

/// Advisory attached to every simulated point.
pub const SIMULATED_ADVISORY: &str = "Simulated data (forecast service unavailable)";

/// Label reported as the data source of simulated responses.
pub const SIMULATED_SOURCE: &str = "simulated";

/// Waveform parameters for one series.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FallbackProfile {
    pub baseline: f64,
    pub amplitude: f64,
    pub jitter: f64,
    /// Value reported as the current reading
    pub current: f64,
}

impl FallbackProfile {
    pub fn for_aqi() -> Self {
        Self { baseline: 70.0, amplitude: 8.0, jitter: 10.0, current: FALLBACK_CURRENT_AQI as f64 }
    }

    pub fn for_pollutant(pollutant: Pollutant) -> Self {
        let (baseline, amplitude, jitter, current) = match pollutant {
            Pollutant::Pm25 => (12.0, 3.0, 4.0, 15.5),
            Pollutant::Pm10 => (25.0, 6.0, 8.0, 30.0),
            Pollutant::O3 => (30.0, 5.0, 6.0, 35.0),
            Pollutant::No2 => (20.0, 4.0, 5.0, 22.0),
            Pollutant::So2 => (3.0, 1.0, 2.0, 4.0),
            Pollutant::Co => (0.4, 0.1, 0.2, 0.5),
        };
        Self { baseline, amplitude, jitter, current }
    }

    /// Sample the waveform at horizon index `i`.
    pub fn sample<R: Rng + ?Sized>(&self, i: usize, rng: &mut R) -> f64 {
        let wave = (i as f64 / 2.0).sin() * self.amplitude;
        round2(self.baseline + wave + rng.gen::<f64>() * self.jitter)
    }

    /// Closed interval every sample falls into.
    pub fn band(&self) -> (f64, f64) {
        (
            self.baseline - self.amplitude,
            self.baseline + self.amplitude + self.jitter,
        )
    }
}

/// Range a simulated point value for `metric` is guaranteed to fall into.
///
/// For a configured pollutant this is the sub-index band of its
/// concentration waveform; otherwise the aggregate AQI band.
pub fn plausible_band(metric: Metric) -> (f64, f64) {
    let aqi_band = FallbackProfile::for_aqi().band();
    match metric {
        Metric::Aqi => aqi_band,
        Metric::Pollutant(pollutant) => {
            let (low, high) = FallbackProfile::for_pollutant(pollutant).band();
            match (aqi::compute(pollutant, low), aqi::compute(pollutant, high)) {
                (Ok(lo), Ok(hi)) => (lo.value as f64, hi.value as f64),
                _ => aqi_band,
            }
        }
    }
}

/// Build a simulated response with the thread-local RNG.
pub fn synthesize(
    location_name: &str,
    metric: Metric,
    now: DateTime<Utc>,
    reason: &ForecastError,
) -> PredictionResponse {
    synthesize_with(location_name, metric, now, reason, &mut rand::thread_rng())
}

/// Build a simulated response from an explicit RNG.
pub fn synthesize_with<R: Rng + ?Sized>(
    location_name: &str,
    metric: Metric,
    now: DateTime<Utc>,
    reason: &ForecastError,
    rng: &mut R,
) -> PredictionResponse {
    let aqi_profile = FallbackProfile::for_aqi();

    let points = FALLBACK_HORIZONS
        .iter()
        .enumerate()
        .map(|(i, &hours)| {
            let breakdown: PollutantSnapshot = Pollutant::ALL
                .iter()
                .map(|&p| (p, FallbackProfile::for_pollutant(p).sample(i, rng)))
                .collect();
            let aggregate = aqi_profile.sample(i, rng);

            let value = match metric {
                Metric::Aqi => aggregate,
                Metric::Pollutant(p) => aqi::compute(p, breakdown[&p])
                    .map(|r| r.value as f64)
                    .unwrap_or(aggregate),
            };
            let category = classify(aggregate);

            PredictionPoint {
                timestamp: now + Duration::hours(hours as i64),
                horizon: format!("{}h", hours),
                horizon_hours: hours,
                value,
                quality: Quality::Simulated,
                advisory: Some(SIMULATED_ADVISORY.to_string()),
                category: Some(category.label.to_string()),
                color: Some(category.color.to_string()),
                confidence: None,
                pollutant_breakdown: Some(breakdown),
            }
        })
        .collect();

    let snapshot: PollutantSnapshot = Pollutant::ALL
        .iter()
        .map(|&p| (p, FallbackProfile::for_pollutant(p).current))
        .collect();
    let (current_aqi, current_metric_value) = resolve_current(metric, FALLBACK_CURRENT_AQI, &snapshot);

    PredictionResponse {
        location_name: location_name.to_string(),
        current_aqi,
        current_category: classify_standard(current_aqi),
        current_metric_value,
        current_metric_pollutant: metric,
        current_pollutant_snapshot: Some(snapshot),
        data_source: DataSource::SimulatedFallback,
        upstream_source: Some(SIMULATED_SOURCE.to_string()),
        advisories: Some(format!(
            "Forecast service unavailable, showing simulated data ({})",
            reason
        )),
        points,
    }
}
