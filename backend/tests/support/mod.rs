#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use aqi_forecast::error::{ForecastError, ForecastResult};
use aqi_forecast::services::PredictionService;
use aqi_forecast::upstream::{ForecastSource, UpstreamForecast};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars so parallel tests do not observe each other's changes.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// A well-formed forecast body for Los Angeles with horizons 3h, 6h, 12h, 24h.
pub fn forecast_body() -> Value {
    json!({
        "nombre_ubicacion": "Los Angeles, CA",
        "aqi_actual_estimado": 85.4,
        "contaminantes_actuales": {
            "PM2.5": 28.0,
            "PM10": 40.0,
            "temperatura": 21.5
        },
        "predicciones": [
            forecast_entry("3h", 90.0, 30.2),
            forecast_entry("6h", 96.5, 33.0),
            forecast_entry("12h", 104.0, 35.4),
            forecast_entry("24h", 78.25, 24.0)
        ],
        "fuente_datos": "OpenAQ",
        "advertencias": ["Sensitive groups should limit outdoor activity"]
    })
}

pub fn forecast_entry(horizon: &str, aqi: f64, pm25: f64) -> Value {
    json!({
        "horizonte": horizon,
        "aqi_predicho": aqi,
        "calidad": "Moderate",
        "mensaje": "Air quality is acceptable",
        "color": "#FFFF00",
        "confianza": 0.82,
        "contaminantes": { "PM2.5": pm25, "humedad": 55 }
    })
}

pub fn decode(body: Value) -> UpstreamForecast {
    serde_json::from_value(body).expect("fixture should decode")
}

/// Answers every fetch with the same result and records requested slugs.
pub struct StaticSource {
    result: ForecastResult<UpstreamForecast>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn live(body: Value) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(decode(body)),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ForecastError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            requested: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ForecastSource for StaticSource {
    async fn fetch(&self, location: &str) -> ForecastResult<UpstreamForecast> {
        self.requested.lock().unwrap().push(location.to_string());
        self.result.clone()
    }
}

pub fn service(source: Arc<StaticSource>) -> PredictionService {
    PredictionService::new(source, "los-angeles")
}
