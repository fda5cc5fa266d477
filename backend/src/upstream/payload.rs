//! Wire shape of the forecasting source's `/predict/city/{slug}` response.
//!
//! Every field is optional at the serde level so that a partially valid body
//! still decodes; required-field checks happen in the normalizer and surface
//! as `MalformedUpstreamPayload`.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{Pollutant, PollutantSnapshot};

/// Concentration map as sent upstream. Besides pollutant codes it may carry
/// weather keys (`temperatura`, `humedad`, ...) and `null` values.
pub type RawConcentrations = BTreeMap<String, Value>;

/// Top-level forecast body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamForecast {
    #[serde(default, rename = "nombre_ubicacion")]
    pub location_name: Option<String>,
    #[serde(default, rename = "aqi_actual_estimado")]
    pub current_aqi: Option<f64>,
    #[serde(default, rename = "contaminantes_actuales")]
    pub current_concentrations: Option<RawConcentrations>,
    #[serde(default, rename = "predicciones")]
    pub entries: Option<Vec<UpstreamEntry>>,
    #[serde(default, rename = "fuente_datos")]
    pub source: Option<String>,
    #[serde(default, rename = "advertencias")]
    pub warnings: Option<Warnings>,
}

/// One forecast horizon as sent upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEntry {
    #[serde(default, rename = "horizonte")]
    pub horizon: Option<String>,
    #[serde(default, rename = "aqi_predicho")]
    pub aqi: Option<f64>,
    #[serde(default, rename = "calidad")]
    pub category: Option<String>,
    #[serde(default, rename = "mensaje")]
    pub message: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "confianza")]
    pub confidence: Option<f64>,
    #[serde(default, rename = "contaminantes")]
    pub concentrations: Option<RawConcentrations>,
}

/// Warnings arrive either as a list or as a single string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Warnings {
    One(String),
    Many(Vec<String>),
}

impl Warnings {
    /// Non-empty warnings joined into one advisory line.
    pub fn joined(&self) -> Option<String> {
        let parts: Vec<&str> = match self {
            Warnings::One(s) => vec![s.as_str()],
            Warnings::Many(v) => v.iter().map(String::as_str).collect(),
        };
        let parts: Vec<&str> = parts
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Keep the numeric pollutant entries of a raw concentration map.
pub fn pollutant_snapshot(raw: &RawConcentrations) -> PollutantSnapshot {
    raw.iter()
        .filter_map(|(key, value)| {
            let pollutant = key.parse::<Pollutant>().ok()?;
            let concentration = value.as_f64()?;
            Some((pollutant, concentration))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_body() {
        let body = r##"{
            "ubicacion": {"latitud": 34.05, "longitud": -118.24},
            "nombre_ubicacion": "Los Angeles, CA",
            "aqi_actual_estimado": 42.5,
            "contaminantes_actuales": {"PM2.5": 10.2, "NO2": 18.0, "temperatura": 21.0, "O3": null},
            "predicciones": [
                {"horizonte": "3h", "aqi_predicho": 45.2, "calidad": "Bueno",
                 "mensaje": "Calidad del aire aceptable", "color": "#FFFF00", "confianza": 0.85,
                 "contaminantes": {"PM2.5": 11.0}}
            ],
            "datos_entrada_disponibles": true,
            "fuente_datos": "OpenAQ",
            "advertencias": []
        }"##;

        let forecast: UpstreamForecast = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.location_name.as_deref(), Some("Los Angeles, CA"));
        assert_eq!(forecast.current_aqi, Some(42.5));
        let entries = forecast.entries.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].horizon.as_deref(), Some("3h"));
        assert_eq!(entries[0].confidence, Some(0.85));
        assert_eq!(forecast.warnings, Some(Warnings::Many(vec![])));

        let snapshot = pollutant_snapshot(&forecast.current_concentrations.unwrap());
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[&Pollutant::Pm25], 10.2);
        assert!(!snapshot.contains_key(&Pollutant::O3));
    }

    #[test]
    fn test_decode_sparse_body() {
        let forecast: UpstreamForecast = serde_json::from_str("{}").unwrap();
        assert!(forecast.entries.is_none());
        assert!(forecast.current_aqi.is_none());
    }

    #[test]
    fn test_warnings_join() {
        assert_eq!(Warnings::Many(vec![]).joined(), None);
        assert_eq!(
            Warnings::Many(vec!["a".into(), " ".into(), "b".into()]).joined(),
            Some("a; b".to_string())
        );
        let single: Warnings = serde_json::from_str(r#""low coverage""#).unwrap();
        assert_eq!(single.joined(), Some("low coverage".to_string()));
    }
}
