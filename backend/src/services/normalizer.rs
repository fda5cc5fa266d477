//! Reconciles a forecasting-source payload with the canonical response.

use chrono::{DateTime, Duration, Utc};

use crate::aqi::{self, classify_standard, AQI_MAX};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{
    DataSource, Metric, PollutantSnapshot, PredictionPoint, PredictionResponse, Quality,
};
use crate::upstream::{pollutant_snapshot, UpstreamEntry, UpstreamForecast};

/// Parse a horizon label such as `"12h"` into hours.
///
/// The trailing `h` is optional; anything else that is not a non-negative
/// integer is rejected.
pub fn parse_horizon(label: &str) -> ForecastResult<u32> {
    let trimmed = label.trim();
    let digits = trimmed
        .strip_suffix('h')
        .or_else(|| trimmed.strip_suffix('H'))
        .unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .map_err(|_| ForecastError::MalformedHorizon(label.to_string()))
}

/// True when horizons never decrease along the series.
pub fn horizons_ascending(points: &[PredictionPoint]) -> bool {
    points
        .windows(2)
        .all(|pair| pair[0].horizon_hours <= pair[1].horizon_hours)
}

/// Clamp an upstream AQI reading onto the integer AQI scale.
pub fn aqi_from_reading(value: f64) -> u16 {
    if value.is_finite() {
        value.round().clamp(0.0, AQI_MAX as f64) as u16
    } else {
        0
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current AQI and current metric value for a snapshot.
///
/// For the aggregate metric both come from `aggregate_aqi`. For a pollutant,
/// the value is its concentration (0 when absent) and the AQI is its
/// sub-index, or `aggregate_aqi` when the pollutant has no breakpoint table.
pub fn resolve_current(metric: Metric, aggregate_aqi: u16, snapshot: &PollutantSnapshot) -> (u16, f64) {
    match metric {
        Metric::Aqi => (aggregate_aqi, aggregate_aqi as f64),
        Metric::Pollutant(pollutant) => {
            let concentration = snapshot.get(&pollutant).copied().unwrap_or(0.0);
            let current_aqi = aqi::compute(pollutant, concentration)
                .map(|r| r.value)
                .unwrap_or(aggregate_aqi);
            (current_aqi, concentration)
        }
    }
}

/// Turns a forecast payload into a [`PredictionResponse`] for one metric.
#[derive(Debug, Clone)]
pub struct PredictionNormalizer {
    metric: Metric,
    evaluated_at: DateTime<Utc>,
    location: String,
}

impl PredictionNormalizer {
    /// `location` names the response when the payload carries no name.
    pub fn new(metric: Metric, evaluated_at: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            metric,
            evaluated_at,
            location: location.into(),
        }
    }

    /// Normalize a payload.
    ///
    /// Entries with unparsable horizons are dropped (and logged); the rest
    /// keep the order the source sent them in.
    ///
    /// # Errors
    /// `MalformedUpstreamPayload` when the current AQI or the forecast list
    /// is missing, or when no entry survives horizon parsing.
    pub fn normalize(&self, payload: &UpstreamForecast) -> ForecastResult<PredictionResponse> {
        let aggregate_aqi = payload
            .current_aqi
            .filter(|v| v.is_finite())
            .map(aqi_from_reading)
            .ok_or_else(|| ForecastError::malformed("missing current AQI (aqi_actual_estimado)"))?;

        let entries = payload
            .entries
            .as_ref()
            .ok_or_else(|| ForecastError::malformed("missing forecast list (predicciones)"))?;

        let points: Vec<PredictionPoint> = entries
            .iter()
            .filter_map(|entry| match self.point(entry) {
                Ok(point) => Some(point),
                Err(e) => {
                    log::warn!("dropping forecast entry: {}", e);
                    None
                }
            })
            .collect();

        if points.is_empty() {
            return Err(ForecastError::malformed("no usable forecast entries"));
        }
        if !horizons_ascending(&points) {
            log::warn!(
                "forecast horizons are not ascending: {:?}",
                points.iter().map(|p| p.horizon.as_str()).collect::<Vec<_>>()
            );
        }

        let snapshot = payload
            .current_concentrations
            .as_ref()
            .map(pollutant_snapshot)
            .unwrap_or_default();
        let (current_aqi, current_metric_value) = resolve_current(self.metric, aggregate_aqi, &snapshot);

        let location_name = payload
            .location_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.location.as_str())
            .to_string();

        Ok(PredictionResponse {
            location_name,
            current_aqi,
            current_category: classify_standard(current_aqi),
            current_metric_value,
            current_metric_pollutant: self.metric,
            current_pollutant_snapshot: (!snapshot.is_empty()).then_some(snapshot),
            data_source: DataSource::Live,
            upstream_source: payload.source.clone(),
            advisories: payload.warnings.as_ref().and_then(|w| w.joined()),
            points,
        })
    }

    fn point(&self, entry: &UpstreamEntry) -> ForecastResult<PredictionPoint> {
        let label = entry
            .horizon
            .as_deref()
            .ok_or_else(|| ForecastError::MalformedHorizon(String::new()))?;
        let hours = parse_horizon(label)?;

        let breakdown = entry
            .concentrations
            .as_ref()
            .map(pollutant_snapshot)
            .unwrap_or_default();

        Ok(PredictionPoint {
            timestamp: self.evaluated_at + Duration::hours(hours as i64),
            horizon: label.trim().to_string(),
            horizon_hours: hours,
            value: round2(self.value(entry, &breakdown)),
            quality: Quality::Nominal,
            advisory: entry.message.clone(),
            category: entry.category.clone(),
            color: entry.color.clone(),
            confidence: entry.confidence,
            pollutant_breakdown: (!breakdown.is_empty()).then_some(breakdown),
        })
    }

    fn value(&self, entry: &UpstreamEntry, breakdown: &PollutantSnapshot) -> f64 {
        match self.metric {
            Metric::Aqi => entry_aqi(entry, breakdown),
            Metric::Pollutant(pollutant) => {
                let concentration = breakdown.get(&pollutant).copied().unwrap_or(0.0);
                match aqi::compute(pollutant, concentration) {
                    Ok(result) => result.value as f64,
                    Err(_) => entry_aqi(entry, breakdown),
                }
            }
        }
    }
}

/// Aggregate AQI of an entry: the precomputed value when present, otherwise
/// the worst sub-index of its concentrations.
fn entry_aqi(entry: &UpstreamEntry, breakdown: &PollutantSnapshot) -> f64 {
    if let Some(value) = entry.aqi.filter(|v| v.is_finite()) {
        return value;
    }
    match aqi::aggregate(breakdown) {
        Some(result) => result.value as f64,
        None => {
            log::warn!(
                "forecast entry {:?} has neither an AQI nor usable concentrations",
                entry.horizon
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pollutant;
    use crate::upstream::Warnings;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry(horizon: &str, aqi: Option<f64>, pm25: f64) -> UpstreamEntry {
        UpstreamEntry {
            horizon: Some(horizon.to_string()),
            aqi,
            category: Some("Bueno".to_string()),
            message: Some("Calidad del aire aceptable".to_string()),
            color: Some("#FFFF00".to_string()),
            confidence: Some(0.8),
            concentrations: Some([("PM2.5".to_string(), json!(pm25))].into_iter().collect()),
        }
    }

    fn payload(entries: Vec<UpstreamEntry>) -> UpstreamForecast {
        UpstreamForecast {
            location_name: Some("Los Angeles, CA".to_string()),
            current_aqi: Some(42.4),
            current_concentrations: Some(
                [
                    ("PM2.5".to_string(), json!(10.2)),
                    ("SO2".to_string(), json!(2.0)),
                ]
                .into_iter()
                .collect(),
            ),
            entries: Some(entries),
            source: Some("OpenAQ".to_string()),
            warnings: Some(Warnings::Many(vec!["sparse coverage".to_string()])),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_horizon() {
        assert_eq!(parse_horizon("3h").unwrap(), 3);
        assert_eq!(parse_horizon(" 24h ").unwrap(), 24);
        assert_eq!(parse_horizon("48H").unwrap(), 48);
        assert_eq!(parse_horizon("6").unwrap(), 6);
        assert!(matches!(parse_horizon("h"), Err(ForecastError::MalformedHorizon(_))));
        assert!(matches!(parse_horizon("-3h"), Err(ForecastError::MalformedHorizon(_))));
        assert!(matches!(parse_horizon("soon"), Err(ForecastError::MalformedHorizon(_))));
    }

    #[test]
    fn test_aggregate_metric_uses_precomputed_aqi() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "los-angeles");
        let response = normalizer
            .normalize(&payload(vec![entry("3h", Some(45.234), 11.0)]))
            .unwrap();

        assert_eq!(response.current_aqi, 42);
        assert_eq!(response.current_metric_value, 42.0);
        assert_eq!(response.points[0].value, 45.23);
        assert_eq!(response.points[0].timestamp, now() + Duration::hours(3));
        assert_eq!(response.points[0].category.as_deref(), Some("Bueno"));
        assert_eq!(response.advisories.as_deref(), Some("sparse coverage"));
        assert_eq!(response.data_source, DataSource::Live);
    }

    #[test]
    fn test_pollutant_metric_uses_subindex() {
        let normalizer = PredictionNormalizer::new(Metric::Pollutant(Pollutant::Pm25), now(), "x");
        let response = normalizer
            .normalize(&payload(vec![entry("3h", Some(45.0), 12.0)]))
            .unwrap();

        assert_eq!(response.points[0].value, 50.0);
        assert_eq!(response.current_metric_value, 10.2);
        assert_eq!(response.current_aqi, aqi::compute(Pollutant::Pm25, 10.2).unwrap().value);
    }

    #[test]
    fn test_unconfigured_pollutant_falls_back_to_aggregate() {
        let normalizer = PredictionNormalizer::new(Metric::Pollutant(Pollutant::So2), now(), "x");
        let response = normalizer
            .normalize(&payload(vec![entry("3h", Some(45.0), 12.0)]))
            .unwrap();

        assert_eq!(response.current_aqi, 42);
        assert_eq!(response.current_metric_value, 2.0);
        assert_eq!(response.points[0].value, 45.0);
    }

    #[test]
    fn test_absent_pollutant_is_zero() {
        let normalizer = PredictionNormalizer::new(Metric::Pollutant(Pollutant::No2), now(), "x");
        let response = normalizer
            .normalize(&payload(vec![entry("3h", Some(45.0), 12.0)]))
            .unwrap();

        assert_eq!(response.points[0].value, 0.0);
        assert_eq!(response.current_metric_value, 0.0);
        assert_eq!(response.current_aqi, 0);
    }

    #[test]
    fn test_missing_entry_aqi_is_derived() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "x");
        let response = normalizer
            .normalize(&payload(vec![entry("3h", None, 35.4)]))
            .unwrap();
        assert_eq!(response.points[0].value, 100.0);
    }

    #[test]
    fn test_malformed_horizon_is_dropped() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "x");
        let response = normalizer
            .normalize(&payload(vec![
                entry("3h", Some(40.0), 1.0),
                entry("later", Some(41.0), 1.0),
                entry("12h", Some(42.0), 1.0),
            ]))
            .unwrap();

        let horizons: Vec<_> = response.points.iter().map(|p| p.horizon_hours).collect();
        assert_eq!(horizons, vec![3, 12]);
    }

    #[test]
    fn test_order_is_preserved_when_not_ascending() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "x");
        let response = normalizer
            .normalize(&payload(vec![
                entry("12h", Some(40.0), 1.0),
                entry("3h", Some(41.0), 1.0),
            ]))
            .unwrap();

        assert!(!horizons_ascending(&response.points));
        assert_eq!(response.points[0].horizon, "12h");
    }

    #[test]
    fn test_missing_required_fields() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "x");

        let mut no_aqi = payload(vec![entry("3h", Some(40.0), 1.0)]);
        no_aqi.current_aqi = None;
        assert!(matches!(
            normalizer.normalize(&no_aqi),
            Err(ForecastError::MalformedUpstreamPayload(_))
        ));

        let mut no_entries = payload(vec![]);
        no_entries.entries = None;
        assert!(matches!(
            normalizer.normalize(&no_entries),
            Err(ForecastError::MalformedUpstreamPayload(_))
        ));

        assert!(matches!(
            normalizer.normalize(&payload(vec![entry("?", Some(1.0), 1.0)])),
            Err(ForecastError::MalformedUpstreamPayload(_))
        ));
    }

    #[test]
    fn test_location_name_defaults_to_request() {
        let normalizer = PredictionNormalizer::new(Metric::Aqi, now(), "miami");
        let mut unnamed = payload(vec![entry("3h", Some(40.0), 1.0)]);
        unnamed.location_name = None;
        assert_eq!(normalizer.normalize(&unnamed).unwrap().location_name, "miami");
    }

    #[test]
    fn test_aqi_from_reading() {
        assert_eq!(aqi_from_reading(42.5), 43);
        assert_eq!(aqi_from_reading(-3.0), 0);
        assert_eq!(aqi_from_reading(900.0), 500);
        assert_eq!(aqi_from_reading(f64::INFINITY), 0);
    }
}
